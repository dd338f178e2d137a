/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::path::PathBuf;

use anyhow::anyhow;
use yaml_rust::Yaml;

pub fn as_absolute_path(v: &Yaml) -> anyhow::Result<PathBuf> {
    let Yaml::String(path) = v else {
        return Err(anyhow!(
            "yaml value type for absolute path should be string"
        ));
    };
    let path = PathBuf::from(path);
    if path.is_relative() {
        return Err(anyhow!(
            "invalid value: {} is not an absolute path",
            path.display()
        ));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute() {
        let p = as_absolute_path(&Yaml::String("/var/run/datadog/dsd.socket".to_string())).unwrap();
        assert_eq!(p, PathBuf::from("/var/run/datadog/dsd.socket"));
        assert!(as_absolute_path(&Yaml::String("dsd.socket".to_string())).is_err());
        assert!(as_absolute_path(&Yaml::Integer(1)).is_err());
    }
}
