/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

/// Load a yaml document from a literal, panicking on error. Meant for tests.
#[macro_export]
macro_rules! yaml_doc {
    ($s:expr) => {
        $crate::load_doc($s).unwrap()
    };
}
