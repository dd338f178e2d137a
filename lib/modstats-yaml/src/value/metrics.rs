/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::collections::BTreeSet;
use std::str::FromStr;

use anyhow::{Context, anyhow};
use yaml_rust::Yaml;

use modstats_types::{MetricName, Tag};

pub fn as_metric_name(v: &Yaml) -> anyhow::Result<MetricName> {
    if let Yaml::String(s) = v {
        MetricName::from_str(s).map_err(|e| anyhow!("invalid metric name: {e}"))
    } else {
        Err(anyhow!("yaml value type for 'metric name' should be 'string'"))
    }
}

/// Parse a map of static tags, keeping document order.
pub fn as_static_tags(v: &Yaml) -> anyhow::Result<Vec<Tag>> {
    let Yaml::Hash(map) = v else {
        return Err(anyhow!(
            "the yaml value type for 'static tags' should be 'map'"
        ));
    };

    let mut seen = BTreeSet::new();
    let mut tags = Vec::with_capacity(map.len());
    crate::foreach_kv(map, |k, v| {
        let value = crate::value::as_string(v).context("invalid tag yaml value")?;
        let tag = Tag::from_str(&format!("{k}:{value}"))
            .map_err(|e| anyhow!("invalid static tag {k}: {e}"))?;
        if !seen.insert(k.to_string()) {
            return Err(anyhow!("found duplicate value for tag name {k}"));
        }
        tags.push(tag);
        Ok(())
    })?;
    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_name() {
        let name = as_metric_name(&Yaml::String("modularization".to_string())).unwrap();
        assert_eq!(name.as_str(), "modularization");
        assert!(as_metric_name(&Yaml::String("a b".to_string())).is_err());
        assert!(as_metric_name(&Yaml::Integer(1)).is_err());
    }

    #[test]
    fn static_tags() {
        let yaml = yaml_doc!("env: production\nregion: us-east-1\nshard: 3");
        let tags = as_static_tags(&yaml).unwrap();
        assert_eq!(
            tags,
            vec![
                Tag::new("env", "production"),
                Tag::new("region", "us-east-1"),
                Tag::new("shard", "3"),
            ]
        );
    }

    #[test]
    fn static_tags_invalid() {
        let yaml = yaml_doc!("env: a|b");
        assert!(as_static_tags(&yaml).is_err());

        let yaml = yaml_doc!("'bad key': x");
        assert!(as_static_tags(&yaml).is_err());

        let yaml = yaml_doc!("- env");
        assert!(as_static_tags(&yaml).is_err());
    }
}
