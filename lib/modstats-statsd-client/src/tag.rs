/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

/// Comma separated `key:value` list, in the order the tags were added.
#[derive(Clone, Debug, Default)]
pub struct StatsdTagGroup {
    buf: Vec<u8>,
}

impl StatsdTagGroup {
    pub fn add_tag<T: AsRef<str>>(&mut self, key: &str, value: T) {
        self.push_delimiter();
        self.buf.extend_from_slice(key.as_bytes());
        self.buf.push(b':');
        self.buf.extend_from_slice(value.as_ref().as_bytes());
    }

    /// Add an already rendered tag, such as `team:Payments`.
    pub fn add_tag_value<T: AsRef<str>>(&mut self, value: T) {
        self.push_delimiter();
        self.buf.extend_from_slice(value.as_ref().as_bytes());
    }

    #[inline]
    fn push_delimiter(&mut self) {
        if !self.buf.is_empty() {
            self.buf.push(b',');
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline]
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.buf.as_slice()
    }
}
