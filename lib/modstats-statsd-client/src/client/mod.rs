/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;

use log::{debug, warn};

use modstats_types::MetricName;

use crate::{SinkBuf, StatsdMetricsSink, StatsdTagGroup};

mod formatter;
pub use formatter::MetricFormatter;

pub struct StatsdClient {
    prefix: MetricName,
    sink: StatsdMetricsSink,
    tags: StatsdTagGroup,
}

impl StatsdClient {
    pub(crate) fn new(prefix: MetricName, sink: StatsdMetricsSink) -> Self {
        StatsdClient {
            prefix,
            sink,
            tags: Default::default(),
        }
    }

    /// Add a tag to every line sent by this client.
    pub fn with_tag<T: AsRef<str>>(mut self, key: &str, value: T) -> Self {
        self.tags.add_tag(key, value);
        self
    }

    pub fn with_tag_value<T: AsRef<str>>(mut self, value: T) -> Self {
        self.tags.add_tag_value(value);
        self
    }

    /// Open a batch. Lines are only sent by [`StatsdBatch::finish`].
    pub fn begin_batch(&mut self) -> StatsdBatch<'_> {
        StatsdBatch {
            client: self,
            buf: SinkBuf::default(),
        }
    }
}

/// A group of lines sent together on finish, or discarded on drop.
pub struct StatsdBatch<'a> {
    client: &'a mut StatsdClient,
    buf: SinkBuf,
}

impl StatsdBatch<'_> {
    /// Number of lines buffered so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Send every buffered line and return the number of datagrams written.
    pub fn finish(mut self) -> io::Result<usize> {
        let lines = self.buf.len();
        let r = self.client.sink.send_batch(&self.buf);
        self.buf.clear();
        let packets = r?;
        debug!("sent {lines} statsd lines in {packets} datagrams");
        Ok(packets)
    }
}

impl Drop for StatsdBatch<'_> {
    fn drop(&mut self) {
        if !self.buf.is_empty() {
            warn!(
                "statsd batch dropped without finish, {} lines discarded",
                self.buf.len()
            );
        }
    }
}
