/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;

use chrono::{DateTime, Utc};

use modstats_types::{MetricName, MetricValue};

mod statsd;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetricKind {
    Gauge,
    Count,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Gauge => "gauge",
            MetricKind::Count => "count",
        }
    }
}

/// One transmission unit of a backend.
///
/// Points are buffered by `emit_points` and delivered by `finish`. Dropping a
/// batch without calling `finish` must discard everything buffered so far.
pub trait MetricsBatch {
    fn emit_points(
        &mut self,
        name: &MetricName,
        points: &[(DateTime<Utc>, MetricValue)],
        kind: MetricKind,
        tags: &[String],
    ) -> io::Result<()>;

    fn finish(self) -> io::Result<()>
    where
        Self: Sized;
}

pub trait MetricsBackend {
    type Batch<'a>: MetricsBatch
    where
        Self: 'a;

    fn begin_batch(&mut self) -> Self::Batch<'_>;
}
