/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use chrono::{DateTime, Utc};

use modstats_types::{MetricName, MetricValue};

use super::StatsdBatch;
use crate::{SinkBuf, StatsdTagGroup};

enum MetricType {
    Count,
    Gauge,
}

impl MetricType {
    fn as_str(&self) -> &'static str {
        match self {
            MetricType::Count => "c",
            MetricType::Gauge => "g",
        }
    }
}

/// Builder for one statsd line, written into the batch on [`MetricFormatter::send`].
pub struct MetricFormatter<'a> {
    buf: &'a mut SinkBuf,
    prefix: &'a MetricName,
    client_tags: &'a StatsdTagGroup,
    metric_type: MetricType,
    name: &'a str,
    value: MetricValue,
    local_tags: StatsdTagGroup,
    timestamp: Option<i64>,
}

impl StatsdBatch<'_> {
    pub fn count<'a, T: Into<MetricValue>>(
        &'a mut self,
        name: &'a str,
        value: T,
    ) -> MetricFormatter<'a> {
        self.metric_with_type(MetricType::Count, name, value.into())
    }

    pub fn gauge<'a, T: Into<MetricValue>>(
        &'a mut self,
        name: &'a str,
        value: T,
    ) -> MetricFormatter<'a> {
        self.metric_with_type(MetricType::Gauge, name, value.into())
    }

    fn metric_with_type<'a>(
        &'a mut self,
        metric_type: MetricType,
        name: &'a str,
        value: MetricValue,
    ) -> MetricFormatter<'a> {
        MetricFormatter {
            buf: &mut self.buf,
            prefix: &self.client.prefix,
            client_tags: &self.client.tags,
            metric_type,
            name,
            value,
            local_tags: StatsdTagGroup::default(),
            timestamp: None,
        }
    }
}

impl MetricFormatter<'_> {
    pub fn with_tag<T: AsRef<str>>(mut self, key: &str, value: T) -> Self {
        self.local_tags.add_tag(key, value);
        self
    }

    pub fn with_tag_value<T: AsRef<str>>(mut self, value: T) -> Self {
        self.local_tags.add_tag_value(value);
        self
    }

    /// Attach the point time, in unix seconds, as the DogStatsD `|T` field.
    pub fn with_timestamp(mut self, time: &DateTime<Utc>) -> Self {
        self.timestamp = Some(time.timestamp());
        self
    }

    pub fn send(self) {
        let MetricFormatter {
            buf,
            prefix,
            client_tags,
            metric_type,
            name,
            value,
            local_tags,
            timestamp,
        } = self;

        buf.push_line(|buf| {
            if !prefix.is_empty() {
                buf.extend_from_slice(prefix.as_bytes());
                buf.push(b'.');
            }
            buf.extend_from_slice(name.as_bytes());
            buf.push(b':');
            match value {
                MetricValue::Unsigned(u) => {
                    buf.extend_from_slice(itoa::Buffer::new().format(u).as_bytes())
                }
                MetricValue::Signed(i) => {
                    buf.extend_from_slice(itoa::Buffer::new().format(i).as_bytes())
                }
                MetricValue::Double(f) => {
                    buf.extend_from_slice(ryu::Buffer::new().format(f).as_bytes())
                }
            }
            buf.push(b'|');
            buf.extend_from_slice(metric_type.as_str().as_bytes());

            if !client_tags.is_empty() || !local_tags.is_empty() {
                buf.extend_from_slice(b"|#");
                buf.extend_from_slice(client_tags.as_bytes());
                if !client_tags.is_empty() && !local_tags.is_empty() {
                    buf.push(b',');
                }
                buf.extend_from_slice(local_tags.as_bytes());
            }

            if let Some(ts) = timestamp {
                buf.extend_from_slice(b"|T");
                buf.extend_from_slice(itoa::Buffer::new().format(ts).as_bytes());
            }
        });
    }
}
