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

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Fully resolved exporter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExporterConfig {
    /// Address the HTTP server binds to.
    pub listen_addr: SocketAddr,
    /// Path the metrics are served on, always starting with `/`.
    pub metrics_path: String,
    /// Vitastor config file the endpoints and prefix may come from.
    pub vitastor_conf: PathBuf,
    /// Normalised etcd endpoints (`http://host:port`).
    pub endpoints: Vec<String>,
    /// etcd key prefix of the cluster.
    pub prefix: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

/// Logging settings, known before the rest of the configuration is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` still takes precedence.
    pub level: String,
    /// Emit JSON lines instead of the human readable format.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: super::DEFAULT_LOG_LEVEL.to_string(),
            json: false,
        }
    }
}

impl From<&super::Opt> for LoggingConfig {
    fn from(opt: &super::Opt) -> Self {
        Self {
            level: opt.log_level.clone(),
            json: opt.log_json,
        }
    }
}
