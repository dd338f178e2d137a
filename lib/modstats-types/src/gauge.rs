/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use crate::{MetricName, MetricValue, Tag};

/// A single data point to be reported at one instant.
///
/// Tag order is preserved as given so that output stays reproducible.
#[derive(Clone, Debug, PartialEq)]
pub struct GaugeMetric {
    name: MetricName,
    count: MetricValue,
    tags: Vec<Tag>,
}

impl GaugeMetric {
    pub fn new<V: Into<MetricValue>>(name: MetricName, count: V, tags: Vec<Tag>) -> Self {
        GaugeMetric {
            name,
            count: count.into(),
            tags,
        }
    }

    #[inline]
    pub fn name(&self) -> &MetricName {
        &self.name
    }

    #[inline]
    pub fn count(&self) -> MetricValue {
        self.count
    }

    #[inline]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Tags rendered as `key:value` strings, in order.
    pub fn rendered_tags(&self) -> impl Iterator<Item = String> + '_ {
        self.tags.iter().map(Tag::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn accessors() {
        let name = MetricName::from_str("modularization.all_packages.count").unwrap();
        let tags = vec![Tag::new("app", "core_app"), Tag::new("team", "Unknown")];
        let metric = GaugeMetric::new(name.clone(), 12usize, tags.clone());
        assert_eq!(metric.name(), &name);
        assert_eq!(metric.count(), MetricValue::Unsigned(12));
        assert_eq!(metric.tags(), tags.as_slice());

        let rendered: Vec<String> = metric.rendered_tags().collect();
        assert_eq!(rendered, vec!["app:core_app", "team:Unknown"]);
    }
}
