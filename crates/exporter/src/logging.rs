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

//! Tracing subscriber setup.

use crate::config::LoggingConfig;
use crate::error::AppError;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Installs the global tracing subscriber.
///
/// `config.level` is the default directive; `RUST_LOG` directives are
/// applied on top of it.
pub fn init_logging(config: &LoggingConfig) -> Result<(), AppError> {
    let filter = EnvFilter::builder()
        .with_default_directive(config.level.parse().unwrap_or(LevelFilter::INFO.into()))
        .from_env_lossy();

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let installed = if config.json {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };
    installed.map_err(|e| AppError::logging(e.to_string()))?;

    tracing::info!("Logging initialized with level: {}", config.level);
    Ok(())
}
