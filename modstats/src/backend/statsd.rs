/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;

use chrono::{DateTime, Utc};

use modstats_statsd_client::{StatsdBatch, StatsdClient};
use modstats_types::{MetricName, MetricValue, chars_allowed_in_tag};

use super::{MetricKind, MetricsBackend, MetricsBatch};

impl MetricsBatch for StatsdBatch<'_> {
    fn emit_points(
        &mut self,
        name: &MetricName,
        points: &[(DateTime<Utc>, MetricValue)],
        kind: MetricKind,
        tags: &[String],
    ) -> io::Result<()> {
        // checked up front so a rejected call leaves no line in the batch
        for tag in tags {
            chars_allowed_in_tag(tag).map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("invalid statsd tag {tag:?}: {e}"),
                )
            })?;
        }
        if let Some((_, value)) = points.iter().find(|(_, v)| !v.is_finite()) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("value {value} of metric {name} is not finite"),
            ));
        }

        for (time, value) in points {
            let mut formatter = match kind {
                MetricKind::Gauge => self.gauge(name.as_str(), *value),
                MetricKind::Count => self.count(name.as_str(), *value),
            };
            for tag in tags {
                formatter = formatter.with_tag_value(tag);
            }
            formatter.with_timestamp(time).send();
        }
        Ok(())
    }

    fn finish(self) -> io::Result<()> {
        StatsdBatch::finish(self).map(|_| ())
    }
}

impl MetricsBackend for StatsdClient {
    type Batch<'a> = StatsdBatch<'a>;

    fn begin_batch(&mut self) -> Self::Batch<'_> {
        StatsdClient::begin_batch(self)
    }
}
