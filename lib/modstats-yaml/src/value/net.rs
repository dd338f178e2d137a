/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use anyhow::anyhow;
use yaml_rust::Yaml;

pub fn as_sockaddr(v: &Yaml) -> anyhow::Result<SocketAddr> {
    if let Yaml::String(s) = v {
        SocketAddr::from_str(s).map_err(|e| anyhow!("invalid socket address {s}: {e}"))
    } else {
        Err(anyhow!(
            "yaml value type for 'socket address' should be 'string'"
        ))
    }
}

pub fn as_ipaddr(v: &Yaml) -> anyhow::Result<IpAddr> {
    if let Yaml::String(s) = v {
        IpAddr::from_str(s).map_err(|e| anyhow!("invalid ip address {s}: {e}"))
    } else {
        Err(anyhow!("yaml value type for 'ip address' should be 'string'"))
    }
}
