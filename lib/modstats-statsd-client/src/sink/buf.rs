/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

/// Newline separated statsd lines, with the end offset of every line.
#[derive(Default)]
pub(crate) struct SinkBuf {
    buf: Vec<u8>,
    ends: Vec<usize>,
}

impl SinkBuf {
    pub(crate) fn push_line<F>(&mut self, format: F)
    where
        F: FnOnce(&mut Vec<u8>),
    {
        if !self.ends.is_empty() {
            self.buf.push(b'\n');
        }
        format(&mut self.buf);
        self.ends.push(self.buf.len());
    }

    /// Number of lines.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.ends.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.buf.clear();
        self.ends.clear();
    }

    fn line_start(&self, line: usize) -> usize {
        if line == 0 { 0 } else { self.ends[line - 1] + 1 }
    }

    pub(crate) fn packets(&self, max_segment_size: usize) -> SinkBufPackets<'_> {
        SinkBufPackets {
            buf: self,
            next_line: 0,
            max_segment_size,
        }
    }
}

/// Lines are never split. A single line larger than the segment size is yielded alone.
pub(crate) struct SinkBufPackets<'a> {
    buf: &'a SinkBuf,
    next_line: usize,
    max_segment_size: usize,
}

impl<'a> Iterator for SinkBufPackets<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let total = self.buf.ends.len();
        if self.next_line >= total {
            return None;
        }

        let start = self.buf.line_start(self.next_line);
        let mut last = self.next_line;
        while last + 1 < total && self.buf.ends[last + 1] - start <= self.max_segment_size {
            last += 1;
        }
        self.next_line = last + 1;
        Some(&self.buf.buf[start..self.buf.ends[last]])
    }
}
