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

//! Error types for the exporter

mod collect;
mod config;
mod store;

pub use collect::*;
pub use config::*;
pub use store::*;

use vitastor_metrics::RegistryError;

/// Top-level error returned from process startup.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Collector registration error
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Logging setup error
    #[error("Logging error: {0}")]
    Logging(String),

    /// IO error, e.g. the HTTP listener could not bind
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn logging(msg: impl Into<String>) -> Self {
        Self::Logging(msg.into())
    }
}
