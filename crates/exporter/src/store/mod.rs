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

//! Read-only access to the coordination store.
//!
//! Every collector invocation opens its own [`KvSession`] through a
//! [`StoreConnector`] and drops it before returning, so a session never
//! outlives one scrape of one collector.

mod etcd;
mod keys;
#[cfg(any(test, feature = "test-util"))]
mod memory;

pub use etcd::EtcdConnector;
pub use keys::{DEFAULT_PREFIX, KeyLayout, child_id};
#[cfg(any(test, feature = "test-util"))]
pub use memory::MemoryStore;

use crate::error::StoreError;
use async_trait::async_trait;

/// One key/value pair as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// An open connection to the store.
#[async_trait]
pub trait KvSession: Send {
    /// Read a single key. `Ok(None)` if the key does not exist.
    async fn get(&mut self, key: &str) -> Result<Option<KeyValue>, StoreError>;

    /// Read every key starting with `prefix`, sorted by key.
    async fn get_prefix(&mut self, prefix: &str) -> Result<Vec<KeyValue>, StoreError>;
}

/// Opens sessions against the store.
#[async_trait]
pub trait StoreConnector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn KvSession>, StoreError>;
}
