// Copyright 2024 RustFS Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Resolves command line options and the Vitastor config file into an
//! [`ExporterConfig`].

use super::{ExporterConfig, Opt, VitastorConf};
use crate::error::ConfigError;
use crate::server::HEALTH_PATH;
use crate::store::{DEFAULT_PREFIX, KeyLayout};
use std::io::ErrorKind;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Loader for the exporter configuration.
#[derive(Debug, Clone)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Merge `opt` with the Vitastor config file it points to.
    ///
    /// Command line values win over the file. A file that is missing,
    /// unreadable or not valid JSON is logged and treated as empty.
    pub fn load(opt: &Opt) -> Result<ExporterConfig, ConfigError> {
        let conf = match Self::read_vitastor_conf(&opt.vitastor_conf) {
            Ok(conf) => conf,
            Err(ConfigError::FileRead { path, source }) if source.kind() == ErrorKind::NotFound => {
                info!("Vitastor config {} not found, using command line settings only", path.display());
                VitastorConf::default()
            }
            Err(e) => {
                warn!("Ignoring Vitastor config: {}", e);
                VitastorConf::default()
            }
        };
        Self::resolve(opt, conf)
    }

    /// Read and parse a Vitastor client config file.
    pub fn read_vitastor_conf(path: &Path) -> Result<VitastorConf, ConfigError> {
        let raw = std::fs::read(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&raw).map_err(|source| ConfigError::FileParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply precedence and normalisation rules.
    pub fn resolve(opt: &Opt, conf: VitastorConf) -> Result<ExporterConfig, ConfigError> {
        let raw_endpoints = if opt.etcd_url.is_empty() {
            conf.etcd_address.map(|a| a.addresses()).unwrap_or_default()
        } else {
            debug!("etcd endpoints taken from the command line");
            opt.etcd_url.clone()
        };
        let endpoints: Vec<String> = raw_endpoints.iter().filter_map(|e| normalize_endpoint(e)).collect();
        if endpoints.is_empty() {
            warn!("No etcd endpoints configured, every scrape will report etcd errors");
        }

        let prefix = opt
            .vitastor_prefix
            .clone()
            .or(conf.etcd_prefix)
            .unwrap_or_else(|| DEFAULT_PREFIX.to_string());
        let prefix = KeyLayout::new(&prefix).prefix().to_string();

        let metrics_path = normalize_path(&opt.metrics_path);
        if metrics_path == HEALTH_PATH || !is_static_route(&metrics_path) {
            return Err(ConfigError::invalid_value("metrics-path", &opt.metrics_path));
        }
        if opt.etcd_connect_timeout == 0 {
            return Err(ConfigError::invalid_value("etcd-connect-timeout", "0"));
        }
        if opt.etcd_request_timeout == 0 {
            return Err(ConfigError::invalid_value("etcd-request-timeout", "0"));
        }

        Ok(ExporterConfig {
            listen_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, opt.port)),
            metrics_path,
            vitastor_conf: opt.vitastor_conf.clone(),
            endpoints,
            prefix,
            connect_timeout: Duration::from_secs(opt.etcd_connect_timeout),
            request_timeout: Duration::from_secs(opt.etcd_request_timeout),
        })
    }

    /// Prints a summary of the configuration to the log.
    pub fn print_summary(config: &ExporterConfig) {
        info!("=== Exporter Configuration ===");
        info!("Listen address: {}", config.listen_addr);
        info!("Metrics path: {}", config.metrics_path);
        info!("Vitastor config: {}", config.vitastor_conf.display());
        info!("etcd endpoints: {}", config.endpoints.join(","));
        info!("etcd prefix: {}", config.prefix);
        info!(
            "etcd timeouts: connect {}s, request {}s",
            config.connect_timeout.as_secs(),
            config.request_timeout.as_secs()
        );
    }
}

/// `10.0.0.1:2379/v3` becomes `http://10.0.0.1:2379`. Blank entries are dropped.
pub(crate) fn normalize_endpoint(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let trimmed = trimmed.strip_suffix("/v3").unwrap_or(trimmed).trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.contains("://") {
        Some(trimmed.to_string())
    } else {
        Some(format!("http://{trimmed}"))
    }
}

fn normalize_path(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Route paths may not carry axum captures (`{id}`, `:id`, `*rest`) or
/// whitespace.
fn is_static_route(path: &str) -> bool {
    if path.contains(['{', '}']) || path.chars().any(char::is_whitespace) {
        return false;
    }
    path.split('/').all(|segment| !segment.starts_with([':', '*']))
}
