/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::str::FromStr;

use super::{ParseError, chars_allowed_in_name};

/// A dot-delimited metric identifier, such as `modularization.all_packages.count`.
///
/// The default value is empty and is only meaningful as "no prefix".
#[derive(Clone, Debug, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct MetricName(String);

impl MetricName {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Append a child node, joined by a dot.
    pub fn join(&self, node: &str) -> Result<Self, ParseError> {
        chars_allowed_in_name(node)?;
        if self.0.is_empty() {
            Ok(MetricName(node.to_string()))
        } else {
            Ok(MetricName(format!("{}.{node}", self.0)))
        }
    }
}

impl FromStr for MetricName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        chars_allowed_in_name(s)?;
        Ok(MetricName(s.to_string()))
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MetricName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
