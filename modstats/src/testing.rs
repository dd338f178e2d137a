/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::cell::Cell;
use std::collections::HashMap;
use std::io;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{DateTime, Utc};

use modstats_types::{GaugeMetric, MetricName, MetricValue};

use crate::backend::{MetricKind, MetricsBackend, MetricsBatch};
use crate::collect::{CollectContext, MetricsCategory, MetricsCollector};
use crate::metrics;
use crate::packwerk::{OwnershipResolver, Package, PackageGraph, Team};

#[derive(Default)]
pub(crate) struct StaticPackageGraph {
    packages: Vec<Package>,
    fail: bool,
    pub(crate) calls: Cell<usize>,
}

impl StaticPackageGraph {
    pub(crate) fn new(packages: Vec<Package>) -> Self {
        StaticPackageGraph {
            packages,
            ..Default::default()
        }
    }

    pub(crate) fn failing() -> Self {
        StaticPackageGraph {
            fail: true,
            ..Default::default()
        }
    }
}

impl PackageGraph for StaticPackageGraph {
    fn all_packages(&self) -> anyhow::Result<Vec<Package>> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(anyhow!("package graph unreadable"));
        }
        Ok(self.packages.clone())
    }
}

#[derive(Default)]
pub(crate) struct StaticOwnership {
    owners: HashMap<String, String>,
    fail: bool,
}

impl StaticOwnership {
    pub(crate) fn with_owner(mut self, package: &str, team: &str) -> Self {
        self.owners.insert(package.to_string(), team.to_string());
        self
    }

    pub(crate) fn failing() -> Self {
        StaticOwnership {
            fail: true,
            ..Default::default()
        }
    }
}

impl OwnershipResolver for StaticOwnership {
    fn team_for_package(&self, package: &Package) -> anyhow::Result<Option<Team>> {
        if self.fail {
            return Err(anyhow!("ownership lookup failed for {}", package.name));
        }
        Ok(self.owners.get(&package.name).map(Team::new))
    }
}

/// Emits `count` gauges named after its category.
pub(crate) struct FixedCollector {
    category: MetricsCategory,
    count: usize,
    fail: bool,
}

impl FixedCollector {
    pub(crate) fn new(category: MetricsCategory, count: usize) -> Self {
        FixedCollector {
            category,
            count,
            fail: false,
        }
    }

    pub(crate) fn failing(category: MetricsCategory) -> Self {
        FixedCollector {
            category,
            count: 0,
            fail: true,
        }
    }
}

impl MetricsCollector for FixedCollector {
    fn category(&self) -> MetricsCategory {
        self.category
    }

    fn collect(&self, ctx: &CollectContext<'_>) -> anyhow::Result<Vec<GaugeMetric>> {
        if self.fail {
            return Err(anyhow!("{} source unavailable", self.category));
        }
        let name = MetricName::from_str("modularization")?.join(self.category.as_str())?;
        Ok((0..self.count)
            .map(|i| {
                GaugeMetric::new(
                    name.clone(),
                    i,
                    vec![modstats_types::Tag::new("app", ctx.app_name)],
                )
            })
            .collect())
    }
}

/// Per package count of violating files, tagged through the shared helpers.
pub(crate) struct ViolationFilesCollector;

impl MetricsCollector for ViolationFilesCollector {
    fn category(&self) -> MetricsCategory {
        MetricsCategory::Files
    }

    fn collect(&self, ctx: &CollectContext<'_>) -> anyhow::Result<Vec<GaugeMetric>> {
        let name = MetricName::from_str("modularization.by_package.violations.files.count")?;
        ctx.packages
            .iter()
            .map(|package| {
                let tags = ctx.tags_for_package(package)?;
                Ok(GaugeMetric::new(
                    name.clone(),
                    metrics::file_count(&package.violations),
                    tags,
                ))
            })
            .collect()
    }
}

/// Per package count of source files under the package directory.
pub(crate) struct SourceFilesCollector;

impl MetricsCollector for SourceFilesCollector {
    fn category(&self) -> MetricsCategory {
        MetricsCategory::Files
    }

    fn collect(&self, ctx: &CollectContext<'_>) -> anyhow::Result<Vec<GaugeMetric>> {
        let name = MetricName::from_str("modularization.by_package.files.count")?;
        ctx.packages
            .iter()
            .map(|package| {
                let count = ctx
                    .source_code_files
                    .iter()
                    .filter(|f| f.path().starts_with(&package.directory))
                    .count();
                Ok(GaugeMetric::new(
                    name.clone(),
                    count,
                    ctx.tags_for_package(package)?,
                ))
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RecordedPoint {
    pub(crate) name: String,
    pub(crate) time: DateTime<Utc>,
    pub(crate) value: MetricValue,
    pub(crate) kind: MetricKind,
    pub(crate) tags: Vec<String>,
}

/// Keeps every finished batch. Batches with an index listed in `fail_batches`
/// error out on finish.
#[derive(Default)]
pub(crate) struct RecordingBackend {
    pub(crate) batches: Vec<Vec<RecordedPoint>>,
    pub(crate) opened: usize,
    pub(crate) fail_batches: Vec<usize>,
    pub(crate) aborted: usize,
}

pub(crate) struct RecordingBatch<'a> {
    backend: &'a mut RecordingBackend,
    index: usize,
    points: Vec<RecordedPoint>,
    finished: bool,
}

impl MetricsBackend for RecordingBackend {
    type Batch<'a> = RecordingBatch<'a>;

    fn begin_batch(&mut self) -> Self::Batch<'_> {
        let index = self.opened;
        self.opened += 1;
        RecordingBatch {
            backend: self,
            index,
            points: Vec::new(),
            finished: false,
        }
    }
}

impl MetricsBatch for RecordingBatch<'_> {
    fn emit_points(
        &mut self,
        name: &MetricName,
        points: &[(DateTime<Utc>, MetricValue)],
        kind: MetricKind,
        tags: &[String],
    ) -> io::Result<()> {
        for (time, value) in points {
            self.points.push(RecordedPoint {
                name: name.to_string(),
                time: *time,
                value: *value,
                kind,
                tags: tags.to_vec(),
            });
        }
        Ok(())
    }

    fn finish(mut self) -> io::Result<()> {
        self.finished = true;
        if self.backend.fail_batches.contains(&self.index) {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "payload rejected",
            ));
        }
        let points = std::mem::take(&mut self.points);
        self.backend.batches.push(points);
        Ok(())
    }
}

impl Drop for RecordingBatch<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.backend.aborted += 1;
        }
    }
}
