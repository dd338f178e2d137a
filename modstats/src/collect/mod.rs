/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt;

use modstats_types::{GaugeMetric, Tag};

use crate::packwerk::{OwnershipResolver, Package, SourceCodeFile};

mod registry;
pub use registry::CollectorRegistry;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetricsCategory {
    Files,
    PublicUsage,
    ProtectionUsage,
    RubocopProtectionsExclusions,
    Packages,
    PackagesByTeam,
    NestedPackages,
}

impl MetricsCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricsCategory::Files => "files",
            MetricsCategory::PublicUsage => "public_usage",
            MetricsCategory::ProtectionUsage => "protection_usage",
            MetricsCategory::RubocopProtectionsExclusions => "rubocop_protections_exclusions",
            MetricsCategory::Packages => "packages",
            MetricsCategory::PackagesByTeam => "packages_by_team",
            MetricsCategory::NestedPackages => "nested_packages",
        }
    }
}

impl fmt::Display for MetricsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs of one aggregation run, shared by every collector.
pub struct CollectContext<'a> {
    pub source_code_files: &'a [SourceCodeFile],
    pub packages: &'a [Package],
    pub app_name: &'a str,
    pub ownership: &'a dyn OwnershipResolver,
}

impl CollectContext<'_> {
    pub fn tags_for_package(&self, package: &Package) -> anyhow::Result<Vec<Tag>> {
        crate::metrics::tags_for_package(package, self.app_name, self.ownership)
    }
}

/// One family of metrics. Each registered collector runs once per aggregation.
pub trait MetricsCollector {
    fn category(&self) -> MetricsCategory;

    fn collect(&self, ctx: &CollectContext<'_>) -> anyhow::Result<Vec<GaugeMetric>>;
}

pub type BoxMetricsCollector = Box<dyn MetricsCollector>;
