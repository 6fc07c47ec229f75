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

//! Main application entry point for the Vitastor exporter.

use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use vitastor_exporter::config::{ConfigLoader, LoggingConfig, Opt};
use vitastor_exporter::logging::init_logging;
use vitastor_exporter::server::{self, AppState, HEALTH_PATH};
use vitastor_exporter::store::{EtcdConnector, KeyLayout};
use vitastor_exporter::{AppError, register_collectors};
use vitastor_metrics::Registry;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let opt = Opt::parse();

    // Logging first so configuration problems are reported.
    init_logging(&LoggingConfig::from(&opt))?;

    let config = ConfigLoader::load(&opt)?;
    ConfigLoader::print_summary(&config);

    let connector = Arc::new(EtcdConnector::new(
        config.endpoints.clone(),
        config.connect_timeout,
        config.request_timeout,
    ));
    info!(endpoints = ?connector.endpoints(), "etcd connector ready");

    let mut registry = Registry::new();
    register_collectors(&mut registry, connector, KeyLayout::new(&config.prefix))?;
    info!(collectors = ?registry.collector_names(), "collectors registered");

    let app = server::router(AppState::new(registry), &config.metrics_path);

    let listener = TcpListener::bind(config.listen_addr).await.map_err(|e| {
        error!("Unable to bind {}: {}", config.listen_addr, e);
        e
    })?;

    info!("Server listening on http://{}", config.listen_addr);
    info!("Available endpoints:");
    info!("  GET {} - Prometheus metrics", config.metrics_path);
    info!("  GET {} - Service health check", HEALTH_PATH);

    server::serve(listener, app).await?;
    info!("Server stopped");
    Ok(())
}
