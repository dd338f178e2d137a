/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

//! Modularization statistics: derive tags for package level metrics and
//! ship them to a metrics backend as time aligned gauge batches.

pub mod backend;
pub mod collect;
pub mod config;
pub mod metrics;
pub mod packwerk;
pub mod reporter;

#[cfg(test)]
mod testing;

pub use modstats_types::{GaugeMetric, MetricName, MetricValue, Tag};
