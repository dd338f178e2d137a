/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

//! Shapes of the package graph and ownership collaborators.
//!
//! Package discovery and ownership rules live outside of this crate, only
//! the fields read by the reporter are modelled here.

use std::path::{Path, PathBuf};

/// Name of the package rooted at the top of the codebase.
pub const ROOT_PACKAGE_NAME: &str = ".";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceCodeFile {
    path: PathBuf,
}

impl SourceCodeFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        SourceCodeFile { path: path.into() }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A recorded dependency from files of one package onto another package.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub to_package_name: String,
    pub files: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub directory: PathBuf,
    pub violations: Vec<Violation>,
}

impl Package {
    pub fn new<N, D>(name: N, directory: D) -> Self
    where
        N: Into<String>,
        D: Into<PathBuf>,
    {
        Package {
            name: name.into(),
            directory: directory.into(),
            violations: Vec::new(),
        }
    }

    pub fn with_violation(mut self, violation: Violation) -> Self {
        self.violations.push(violation);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Team {
    pub name: String,
}

impl Team {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Team { name: name.into() }
    }
}

pub trait PackageGraph {
    /// Enumerate every package in the codebase.
    fn all_packages(&self) -> anyhow::Result<Vec<Package>>;
}

pub trait OwnershipResolver {
    fn team_for_package(&self, package: &Package) -> anyhow::Result<Option<Team>>;
}
