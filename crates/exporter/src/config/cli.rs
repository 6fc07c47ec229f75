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

use crate::version::{LONG_VERSION, SHORT_VERSION};
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_METRICS_PATH: &str = "/metrics";
pub const DEFAULT_VITASTOR_CONF: &str = "/etc/vitastor/vitastor.conf";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Command line options of the exporter
#[derive(Parser, Debug, Clone)]
#[command(
    name = "vitastor-exporter",
    about = "Prometheus exporter for Vitastor clusters",
    version = SHORT_VERSION,
    long_version = LONG_VERSION,
    long_about = r#"
Vitastor Exporter - republishes the state a Vitastor cluster keeps in etcd
as Prometheus metrics.

Every scrape reads pool, OSD, monitor, image and cluster statistics straight
from etcd. Nothing is cached between scrapes.

ENVIRONMENT VARIABLES:
  All command-line options can also be set via environment variables.
  Command-line arguments take precedence over environment variables.

EXAMPLES:
  # Read etcd endpoints and prefix from /etc/vitastor/vitastor.conf
  vitastor-exporter

  # Explicit endpoints
  vitastor-exporter --etcd-url 10.0.0.1:2379,10.0.0.2:2379 --port 9101
"#
)]
pub struct Opt {
    /// HTTP listen port
    #[arg(long, env = "VITASTOR_EXPORTER_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Path the metrics are served on
    #[arg(long = "metrics-path", env = "VITASTOR_EXPORTER_METRICS_PATH", default_value = DEFAULT_METRICS_PATH)]
    pub metrics_path: String,

    /// Vitastor client configuration file
    #[arg(long = "vitastor-conf", env = "VITASTOR_CONF", default_value = DEFAULT_VITASTOR_CONF)]
    pub vitastor_conf: PathBuf,

    /// etcd endpoints, overrides `etcd_address` from the config file
    #[arg(long = "etcd-url", env = "VITASTOR_ETCD_URL", value_delimiter = ',')]
    pub etcd_url: Vec<String>,

    /// etcd key prefix of the cluster, overrides `etcd_prefix` from the config file
    #[arg(long = "vitastor-prefix", env = "VITASTOR_PREFIX")]
    pub vitastor_prefix: Option<String>,

    /// Seconds to wait for an etcd connection
    #[arg(long = "etcd-connect-timeout", env = "VITASTOR_ETCD_CONNECT_TIMEOUT", default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS)]
    pub etcd_connect_timeout: u64,

    /// Seconds to wait for a single etcd read
    #[arg(long = "etcd-request-timeout", env = "VITASTOR_ETCD_REQUEST_TIMEOUT", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub etcd_request_timeout: u64,

    /// Log level configuration
    #[arg(long = "log-level", env = "RUST_LOG", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long = "log-json", env = "VITASTOR_EXPORTER_LOG_JSON")]
    pub log_json: bool,
}
