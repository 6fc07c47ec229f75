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

//! Coordination store error types

use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No endpoint was configured
    #[error("No etcd endpoints configured")]
    NoEndpoints,

    /// Connecting to the store failed
    #[error("Unable to connect to etcd: {0}")]
    Connect(String),

    /// The connection attempt exceeded its deadline
    #[error("Timed out connecting to etcd after {0:?}")]
    ConnectTimeout(Duration),

    /// A read failed
    #[error("Unable to read '{key}' from etcd: {message}")]
    Request { key: String, message: String },

    /// A read exceeded its deadline
    #[error("Timed out reading '{key}' from etcd after {timeout:?}")]
    RequestTimeout { key: String, timeout: Duration },

    /// Injected failure of the in-memory store
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn request(key: &str, err: impl std::fmt::Display) -> Self {
        Self::Request {
            key: key.to_string(),
            message: err.to_string(),
        }
    }
}
