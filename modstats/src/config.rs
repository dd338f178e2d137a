/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::num::NonZeroUsize;
use std::path::Path;

use anyhow::{Context, anyhow};
use yaml_rust::Yaml;

use modstats_statsd_client::StatsdClientConfig;
use modstats_types::Tag;

use crate::reporter::DEFAULT_MAX_BATCH_POINTS;

#[derive(Clone, Debug, PartialEq)]
pub struct ReporterConfig {
    app_name: String,
    max_batch_points: NonZeroUsize,
    static_tags: Vec<Tag>,
    statsd: StatsdClientConfig,
}

impl ReporterConfig {
    pub fn new<S: Into<String>>(app_name: S) -> Self {
        ReporterConfig {
            app_name: app_name.into(),
            max_batch_points: DEFAULT_MAX_BATCH_POINTS,
            static_tags: Vec::new(),
            statsd: StatsdClientConfig::default(),
        }
    }

    #[inline]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    #[inline]
    pub fn max_batch_points(&self) -> NonZeroUsize {
        self.max_batch_points
    }

    #[inline]
    pub fn static_tags(&self) -> &[Tag] {
        &self.static_tags
    }

    #[inline]
    pub fn statsd(&self) -> &StatsdClientConfig {
        &self.statsd
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let doc = modstats_yaml::load_file(path)?;
        ReporterConfig::parse_yaml(&doc)
            .context(format!("invalid reporter config in file {}", path.display()))
    }

    pub fn parse_yaml(v: &Yaml) -> anyhow::Result<Self> {
        let Yaml::Hash(map) = v else {
            return Err(anyhow!(
                "yaml value type for 'reporter config' should be 'map'"
            ));
        };

        let mut config = ReporterConfig::new(String::new());
        modstats_yaml::foreach_kv(map, |k, v| config.set_by_yaml_kv(k, v))?;
        config.check()?;
        Ok(config)
    }

    fn set_by_yaml_kv(&mut self, k: &str, v: &Yaml) -> anyhow::Result<()> {
        match modstats_yaml::key::normalize(k).as_str() {
            "app_name" | "app" => {
                self.app_name = modstats_yaml::value::as_string(v)
                    .context(format!("invalid string value for key {k}"))?;
            }
            "max_batch_points" | "batch_size" => {
                self.max_batch_points = modstats_yaml::value::as_nonzero_usize(v)
                    .context(format!("invalid nonzero usize value for key {k}"))?;
            }
            "static_tags" | "global_tags" => {
                self.static_tags = modstats_yaml::value::as_static_tags(v)
                    .context(format!("invalid static tags value for key {k}"))?;
            }
            "statsd" | "statsd_client" => {
                self.statsd = StatsdClientConfig::parse_yaml(v)
                    .context(format!("invalid statsd client config value for key {k}"))?;
            }
            _ => return Err(anyhow!("invalid key {k}")),
        }
        Ok(())
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.app_name.is_empty() {
            return Err(anyhow!("no app name has been set"));
        }
        Ok(())
    }
}
