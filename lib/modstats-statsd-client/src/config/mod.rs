/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};
#[cfg(unix)]
use std::os::unix::net::UnixDatagram;
#[cfg(unix)]
use std::path::PathBuf;

use thiserror::Error;

use modstats_types::MetricName;

use crate::{StatsdClient, StatsdMetricsSink};

#[cfg(feature = "yaml")]
mod yaml;

const UDP_DEFAULT_PORT: u16 = 8125;
const UDP_DEFAULT_MAX_SEGMENT_SIZE: usize = 1432;
#[cfg(unix)]
const UNIX_DEFAULT_MAX_SEGMENT_SIZE: usize = 4096;

#[derive(Debug, Error)]
pub enum StatsdClientBuildError {
    #[error("socket error: {0:?}")]
    SocketError(io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsdBackend {
    Udp(SocketAddr, Option<IpAddr>),
    #[cfg(unix)]
    Unix(PathBuf),
}

impl Default for StatsdBackend {
    fn default() -> Self {
        StatsdBackend::Udp(
            SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), UDP_DEFAULT_PORT),
            None,
        )
    }
}

impl StatsdBackend {
    fn default_max_segment_size(&self) -> usize {
        match self {
            StatsdBackend::Udp(_, _) => UDP_DEFAULT_MAX_SEGMENT_SIZE,
            #[cfg(unix)]
            StatsdBackend::Unix(_) => UNIX_DEFAULT_MAX_SEGMENT_SIZE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsdClientConfig {
    backend: StatsdBackend,
    prefix: MetricName,
    max_segment_size: Option<usize>,
}

impl StatsdClientConfig {
    pub fn with_prefix(prefix: MetricName) -> Self {
        StatsdClientConfig {
            prefix,
            ..Default::default()
        }
    }

    pub fn set_backend(&mut self, target: StatsdBackend) {
        self.backend = target;
    }

    pub fn set_prefix(&mut self, prefix: MetricName) {
        self.prefix = prefix;
    }

    pub fn set_max_segment_size(&mut self, size: usize) {
        self.max_segment_size = Some(size);
    }

    #[inline]
    pub fn backend(&self) -> &StatsdBackend {
        &self.backend
    }

    #[inline]
    pub fn prefix(&self) -> &MetricName {
        &self.prefix
    }

    pub fn max_segment_size(&self) -> usize {
        self.max_segment_size
            .unwrap_or_else(|| self.backend.default_max_segment_size())
    }

    pub fn build(&self) -> Result<StatsdClient, StatsdClientBuildError> {
        let max_segment_size = self.max_segment_size();
        let sink = match &self.backend {
            StatsdBackend::Udp(addr, bind) => {
                let bind_ip = bind.unwrap_or(match addr {
                    SocketAddr::V4(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
                    SocketAddr::V6(_) => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
                });
                let socket = UdpSocket::bind(SocketAddr::new(bind_ip, 0))
                    .map_err(StatsdClientBuildError::SocketError)?;
                socket
                    .connect(addr)
                    .map_err(StatsdClientBuildError::SocketError)?;
                StatsdMetricsSink::udp(socket, max_segment_size)
            }
            #[cfg(unix)]
            StatsdBackend::Unix(path) => {
                let socket =
                    UnixDatagram::unbound().map_err(StatsdClientBuildError::SocketError)?;
                socket
                    .connect(path)
                    .map_err(StatsdClientBuildError::SocketError)?;
                StatsdMetricsSink::unix(socket, max_segment_size)
            }
        };

        Ok(StatsdClient::new(self.prefix.clone(), sink))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn defaults() {
        let config = StatsdClientConfig::default();
        assert_eq!(
            config.backend(),
            &StatsdBackend::Udp(SocketAddr::from_str("127.0.0.1:8125").unwrap(), None)
        );
        assert!(config.prefix().is_empty());
        assert_eq!(config.max_segment_size(), 1432);
    }

    #[cfg(unix)]
    #[test]
    fn unix_segment_size() {
        let mut config = StatsdClientConfig::default();
        config.set_backend(StatsdBackend::Unix(PathBuf::from("/tmp/dsd.socket")));
        assert_eq!(config.max_segment_size(), 4096);
        config.set_max_segment_size(8192);
        assert_eq!(config.max_segment_size(), 8192);
    }

    #[test]
    fn build_udp() {
        let mut config =
            StatsdClientConfig::with_prefix(MetricName::from_str("modularization").unwrap());
        config.set_backend(StatsdBackend::Udp(
            SocketAddr::from_str("127.0.0.1:8125").unwrap(),
            Some(IpAddr::V4(Ipv4Addr::LOCALHOST)),
        ));
        assert!(config.build().is_ok());
    }
}
