/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::net::{IpAddr, SocketAddr};
#[cfg(unix)]
use std::path::PathBuf;

use anyhow::{Context, anyhow};
use yaml_rust::Yaml;

use super::{StatsdBackend, StatsdClientConfig};

impl StatsdBackend {
    pub fn parse_udp_yaml(v: &Yaml) -> anyhow::Result<Self> {
        match v {
            Yaml::Hash(map) => {
                let mut addr: Option<SocketAddr> = None;
                let mut bind: Option<IpAddr> = None;

                modstats_yaml::foreach_kv(map, |k, v| {
                    match modstats_yaml::key::normalize(k).as_str() {
                        "address" | "addr" => {
                            addr = Some(modstats_yaml::value::as_sockaddr(v).context(format!(
                                "invalid statsd udp peer socket address value for key {k}"
                            ))?);
                            Ok(())
                        }
                        "bind_ip" | "bind" => {
                            bind = Some(
                                modstats_yaml::value::as_ipaddr(v)
                                    .context(format!("invalid value for key {k}"))?,
                            );
                            Ok(())
                        }
                        _ => Err(anyhow!("invalid key {k}")),
                    }
                })?;

                let addr = addr.ok_or_else(|| anyhow!("no target address has been set"))?;
                Ok(StatsdBackend::Udp(addr, bind))
            }
            Yaml::String(_) => {
                let addr = modstats_yaml::value::as_sockaddr(v)?;
                Ok(StatsdBackend::Udp(addr, None))
            }
            _ => Err(anyhow!("invalid yaml value for udp statsd backend")),
        }
    }

    #[cfg(unix)]
    pub fn parse_unix_yaml(v: &Yaml) -> anyhow::Result<Self> {
        match v {
            Yaml::Hash(map) => {
                let mut path: Option<PathBuf> = None;

                modstats_yaml::foreach_kv(map, |k, v| {
                    match modstats_yaml::key::normalize(k).as_str() {
                        "path" => {
                            path = Some(
                                modstats_yaml::value::as_absolute_path(v)
                                    .context(format!("invalid value for key {k}"))?,
                            );
                            Ok(())
                        }
                        _ => Err(anyhow!("invalid key {k}")),
                    }
                })?;

                let path = path.ok_or_else(|| anyhow!("no path has been set"))?;
                Ok(StatsdBackend::Unix(path))
            }
            Yaml::String(_) => {
                let path = modstats_yaml::value::as_absolute_path(v)?;
                Ok(StatsdBackend::Unix(path))
            }
            _ => Err(anyhow!("invalid yaml value for unix statsd backend")),
        }
    }
}

impl StatsdClientConfig {
    pub fn parse_yaml(v: &Yaml) -> anyhow::Result<Self> {
        if let Yaml::Hash(map) = v {
            let mut config = StatsdClientConfig::default();
            modstats_yaml::foreach_kv(map, |k, v| config.set_by_yaml_kv(k, v))?;
            Ok(config)
        } else {
            Err(anyhow!(
                "yaml value type for 'statsd client config' should be 'map'"
            ))
        }
    }

    fn set_by_yaml_kv(&mut self, k: &str, v: &Yaml) -> anyhow::Result<()> {
        match modstats_yaml::key::normalize(k).as_str() {
            "target_udp" | "backend_udp" => {
                let target = StatsdBackend::parse_udp_yaml(v)
                    .context(format!("invalid value for key {k}"))?;
                self.set_backend(target);
            }
            #[cfg(unix)]
            "target_unix" | "backend_unix" => {
                let target = StatsdBackend::parse_unix_yaml(v)
                    .context(format!("invalid value for key {k}"))?;
                self.set_backend(target);
            }
            "target" | "backend" => {
                let Yaml::Hash(map) = v else {
                    return Err(anyhow!("yaml value type for key {k} should be 'map'"));
                };
                modstats_yaml::foreach_kv(map, |k, v| {
                    let target = match modstats_yaml::key::normalize(k).as_str() {
                        "udp" => StatsdBackend::parse_udp_yaml(v),
                        #[cfg(unix)]
                        "unix" => StatsdBackend::parse_unix_yaml(v),
                        _ => return Err(anyhow!("invalid key {k}")),
                    };
                    self.set_backend(target.context(format!("invalid value for key {k}"))?);
                    Ok(())
                })
                .context(format!("invalid value for key {k}"))?;
            }
            "prefix" => {
                let prefix = modstats_yaml::value::as_metric_name(v)
                    .context(format!("invalid metric name value for key {k}"))?;
                self.set_prefix(prefix);
            }
            "max_segment_size" => {
                let size = modstats_yaml::value::as_nonzero_usize(v)
                    .context(format!("invalid nonzero usize value for key {k}"))?;
                self.set_max_segment_size(size.get());
            }
            _ => return Err(anyhow!("invalid key {k}")),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modstats_yaml::yaml_doc;
    use std::str::FromStr;

    #[test]
    fn parse_udp_yaml_ok() {
        let yaml = yaml_doc!(r#""127.0.0.1:8125""#);
        assert_eq!(
            StatsdBackend::parse_udp_yaml(&yaml).unwrap(),
            StatsdBackend::Udp(SocketAddr::from_str("127.0.0.1:8125").unwrap(), None)
        );

        let yaml = yaml_doc!(
            r#"
                address: "10.0.0.2:8125"
                bind_ip: "10.0.0.1"
            "#
        );
        assert_eq!(
            StatsdBackend::parse_udp_yaml(&yaml).unwrap(),
            StatsdBackend::Udp(
                SocketAddr::from_str("10.0.0.2:8125").unwrap(),
                Some(IpAddr::from_str("10.0.0.1").unwrap())
            )
        );
    }

    #[test]
    fn parse_udp_yaml_err() {
        let yaml = yaml_doc!("invalid_key: value");
        assert!(StatsdBackend::parse_udp_yaml(&yaml).is_err());

        let yaml = yaml_doc!("address: invalid-addr");
        assert!(StatsdBackend::parse_udp_yaml(&yaml).is_err());

        let yaml = yaml_doc!("bind_ip: 127.0.0.1");
        assert!(StatsdBackend::parse_udp_yaml(&yaml).is_err());

        assert!(StatsdBackend::parse_udp_yaml(&Yaml::Integer(8125)).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn parse_unix_yaml() {
        let yaml = yaml_doc!("path: /var/run/datadog/dsd.socket");
        assert_eq!(
            StatsdBackend::parse_unix_yaml(&yaml).unwrap(),
            StatsdBackend::Unix(PathBuf::from("/var/run/datadog/dsd.socket"))
        );

        let yaml = yaml_doc!("path: relative/dsd.socket");
        assert!(StatsdBackend::parse_unix_yaml(&yaml).is_err());

        assert!(StatsdBackend::parse_unix_yaml(&Yaml::Null).is_err());
    }

    #[test]
    fn parse_yaml_ok() {
        let yaml = yaml_doc!(
            r#"
                target_udp: "127.0.0.1:18125"
                prefix: modularization
                max-segment-size: 8192
            "#
        );
        let config = StatsdClientConfig::parse_yaml(&yaml).unwrap();
        assert_eq!(
            config.backend(),
            &StatsdBackend::Udp(SocketAddr::from_str("127.0.0.1:18125").unwrap(), None)
        );
        assert_eq!(config.prefix().as_str(), "modularization");
        assert_eq!(config.max_segment_size(), 8192);
    }

    #[test]
    fn parse_yaml_target_map() {
        let yaml = yaml_doc!(
            r#"
                target:
                  udp:
                    address: "127.0.0.1:8125"
            "#
        );
        let config = StatsdClientConfig::parse_yaml(&yaml).unwrap();
        assert_eq!(config.max_segment_size(), 1432);

        let yaml = yaml_doc!(
            r#"
                target:
                  tcp: "127.0.0.1:8125"
            "#
        );
        assert!(StatsdClientConfig::parse_yaml(&yaml).is_err());
    }

    #[test]
    fn parse_yaml_err() {
        let yaml = yaml_doc!("emit_interval: 10s");
        assert!(StatsdClientConfig::parse_yaml(&yaml).is_err());

        let yaml = yaml_doc!("max_segment_size: 0");
        assert!(StatsdClientConfig::parse_yaml(&yaml).is_err());

        let yaml = yaml_doc!("prefix: 'bad prefix'");
        assert!(StatsdClientConfig::parse_yaml(&yaml).is_err());

        assert!(StatsdClientConfig::parse_yaml(&Yaml::Array(vec![])).is_err());
    }
}
