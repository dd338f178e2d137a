/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;
use std::num::NonZeroUsize;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use chrono::{DateTime, Utc};
use log::{debug, info};
use thiserror::Error;

use modstats_types::{GaugeMetric, Tag};

use crate::backend::{MetricKind, MetricsBackend, MetricsBatch};
use crate::collect::{BoxMetricsCollector, CollectContext, CollectorRegistry};
use crate::config::ReporterConfig;
use crate::packwerk::{OwnershipResolver, PackageGraph, SourceCodeFile};

/// Upper bound of points in one backend request.
pub const DEFAULT_MAX_BATCH_POINTS: NonZeroUsize = NonZeroUsize::new(1000).unwrap();

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to emit metric {name} in chunk #{chunk}: {source}")]
    Emit {
        chunk: usize,
        name: String,
        source: io::Error,
    },
    #[error("failed to transmit chunk #{chunk} of {points} points: {source}")]
    Transmit {
        chunk: usize,
        points: usize,
        source: io::Error,
    },
}

impl ReportError {
    /// Index of the chunk that failed. Earlier chunks have been delivered.
    pub fn chunk(&self) -> usize {
        match self {
            ReportError::Emit { chunk, .. } => *chunk,
            ReportError::Transmit { chunk, .. } => *chunk,
        }
    }
}

pub struct Reporter {
    package_graph: Arc<dyn PackageGraph>,
    ownership: Arc<dyn OwnershipResolver>,
    collectors: CollectorRegistry,
    max_batch_points: NonZeroUsize,
    static_tags: Vec<Tag>,
    app_name: Option<String>,
}

impl Reporter {
    pub fn new(
        package_graph: Arc<dyn PackageGraph>,
        ownership: Arc<dyn OwnershipResolver>,
    ) -> Self {
        Reporter {
            package_graph,
            ownership,
            collectors: CollectorRegistry::default(),
            max_batch_points: DEFAULT_MAX_BATCH_POINTS,
            static_tags: Vec::new(),
            app_name: None,
        }
    }

    pub fn with_config(
        config: &ReporterConfig,
        package_graph: Arc<dyn PackageGraph>,
        ownership: Arc<dyn OwnershipResolver>,
    ) -> Self {
        let mut reporter = Reporter::new(package_graph, ownership);
        reporter.max_batch_points = config.max_batch_points();
        reporter.static_tags = config.static_tags().to_vec();
        reporter.app_name = Some(config.app_name().to_string());
        reporter
    }

    pub fn register_collector(&mut self, collector: BoxMetricsCollector) -> anyhow::Result<()> {
        self.collectors.add(collector)
    }

    pub fn set_max_batch_points(&mut self, max: NonZeroUsize) {
        self.max_batch_points = max;
    }

    #[inline]
    pub fn max_batch_points(&self) -> usize {
        self.max_batch_points.get()
    }

    /// The app name from config, if this reporter was built with one.
    #[inline]
    pub fn app_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }

    #[inline]
    pub fn collectors(&self) -> &CollectorRegistry {
        &self.collectors
    }

    /// Run every registered collector once and concatenate their metrics.
    ///
    /// Packages are enumerated again on each call. The first failure aborts
    /// the whole aggregation, no partial result is returned.
    pub fn get_metrics(
        &self,
        source_code_files: &[SourceCodeFile],
        app_name: &str,
    ) -> anyhow::Result<Vec<GaugeMetric>> {
        let packages = self
            .package_graph
            .all_packages()
            .context("failed to enumerate packages")?;
        debug!("found {} packages for app {app_name}", packages.len());

        let ctx = CollectContext {
            source_code_files,
            packages: &packages,
            app_name,
            ownership: self.ownership.as_ref(),
        };

        let mut metrics = Vec::new();
        for collector in self.collectors.iter() {
            let category = collector.category();
            let collected = collector
                .collect(&ctx)
                .context(format!("failed to collect {category} metrics"))?;
            debug!("collected {} {category} metrics", collected.len());
            metrics.extend(collected);
        }
        Ok(metrics)
    }

    /// Same as [`Reporter::get_metrics`], tagged with the configured app name.
    pub fn get_configured_metrics(
        &self,
        source_code_files: &[SourceCodeFile],
    ) -> anyhow::Result<Vec<GaugeMetric>> {
        let Some(app_name) = self.app_name.as_deref() else {
            return Err(anyhow!("no app name configured for this reporter"));
        };
        self.get_metrics(source_code_files, app_name)
    }

    /// Send `metrics` as gauges in contiguous chunks, one backend batch per chunk.
    ///
    /// Every point carries `report_time`, so all of them land in the same
    /// backend bucket. A failed chunk stops the report, chunks already
    /// finished stay delivered.
    pub fn report<B: MetricsBackend>(
        &self,
        client: &mut B,
        report_time: DateTime<Utc>,
        metrics: &[GaugeMetric],
    ) -> Result<(), ReportError> {
        let static_tags: Vec<String> = self.static_tags.iter().map(Tag::to_string).collect();
        let mut chunks = 0;

        for (chunk, slice) in metrics.chunks(self.max_batch_points.get()).enumerate() {
            let mut batch = client.begin_batch();
            for metric in slice {
                let mut tags: Vec<String> = metric.rendered_tags().collect();
                tags.extend(static_tags.iter().cloned());
                batch
                    .emit_points(
                        metric.name(),
                        &[(report_time, metric.count())],
                        MetricKind::Gauge,
                        &tags,
                    )
                    .map_err(|source| ReportError::Emit {
                        chunk,
                        name: metric.name().to_string(),
                        source,
                    })?;
            }
            batch.finish().map_err(|source| ReportError::Transmit {
                chunk,
                points: slice.len(),
                source,
            })?;
            debug!("chunk #{chunk} with {} points sent", slice.len());
            chunks += 1;
        }

        info!(
            "reported {} metrics in {chunks} chunks at {}",
            metrics.len(),
            report_time.to_rfc3339()
        );
        Ok(())
    }
}
