/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

//! Tag derivation shared by every metric family.
//!
//! All package and team attribution goes through these helpers so that the
//! same sentinel and the same root naming apply to every emitted metric.

use std::io;

use modstats_types::Tag;

use crate::packwerk::{OwnershipResolver, Package, ROOT_PACKAGE_NAME, Violation};

pub const UNKNOWN_OWNER: &str = "Unknown";
pub const ROOT_PACKAGE_LABEL: &str = "root";

const README_FILE_NAME: &str = "README.md";

fn owner_or_unknown(team_name: Option<&str>) -> &str {
    match team_name {
        Some(name) if !name.is_empty() => name,
        _ => UNKNOWN_OWNER,
    }
}

pub fn tags_for_team(team_name: Option<&str>) -> Vec<Tag> {
    vec![Tag::new("team", owner_or_unknown(team_name))]
}

/// Tag the target team of a relationship, such as a cross team violation.
pub fn tags_for_to_team(team_name: Option<&str>) -> Vec<Tag> {
    vec![Tag::new("to_team", owner_or_unknown(team_name))]
}

pub fn tags_for_package(
    package: &Package,
    app_name: &str,
    ownership: &dyn OwnershipResolver,
) -> anyhow::Result<Vec<Tag>> {
    let team = ownership.team_for_package(package)?;
    let mut tags = vec![
        Tag::new("package", humanized_package_name(&package.name)),
        Tag::new("app", app_name),
    ];
    tags.extend(tags_for_team(team.as_ref().map(|t| t.name.as_str())));
    Ok(tags)
}

pub fn humanized_package_name(name: &str) -> &str {
    if name == ROOT_PACKAGE_NAME {
        ROOT_PACKAGE_LABEL
    } else {
        name
    }
}

/// Total number of violating files, a file listed by two violations counts twice.
pub fn file_count(violations: &[Violation]) -> usize {
    violations.iter().map(|v| v.files.len()).sum()
}

pub fn has_readme(package: &Package) -> io::Result<bool> {
    package.directory.join(README_FILE_NAME).try_exists()
}
