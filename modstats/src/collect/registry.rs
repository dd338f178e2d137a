/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use anyhow::anyhow;

use super::{BoxMetricsCollector, MetricsCategory};

/// Collectors in registration order, at most one per category.
#[derive(Default)]
pub struct CollectorRegistry {
    inner: Vec<BoxMetricsCollector>,
}

impl CollectorRegistry {
    pub fn add(&mut self, collector: BoxMetricsCollector) -> anyhow::Result<()> {
        let category = collector.category();
        if self.contains(category) {
            return Err(anyhow!("duplicate collector for {category} metrics"));
        }
        self.inner.push(collector);
        Ok(())
    }

    pub fn contains(&self, category: MetricsCategory) -> bool {
        self.inner.iter().any(|c| c.category() == category)
    }

    pub fn categories(&self) -> Vec<MetricsCategory> {
        self.inner.iter().map(|c| c.category()).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &BoxMetricsCollector> {
        self.inner.iter()
    }
}
