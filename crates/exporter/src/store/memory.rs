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

//! In-memory store for tests. Built only with `cfg(test)` or the
//! `test-util` feature.

use super::{KeyValue, KvSession, StoreConnector};
use crate::error::StoreError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A fixed key/value snapshot with optional fault injection.
///
/// Every `connect` hands out a session over a copy of the snapshot and
/// counts it as open until the session is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: BTreeMap<String, Vec<u8>>,
    fail_connect: bool,
    failing_prefixes: Vec<String>,
    open_sessions: Arc<AtomicUsize>,
    opened_total: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a key.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Make every `connect` fail.
    pub fn failing_connect(mut self) -> Self {
        self.fail_connect = true;
        self
    }

    /// Make every read of a key starting with `prefix` fail.
    pub fn failing_reads_under(mut self, prefix: impl Into<String>) -> Self {
        self.failing_prefixes.push(prefix.into());
        self
    }

    /// Sessions currently open.
    pub fn open_sessions(&self) -> usize {
        self.open_sessions.load(Ordering::SeqCst)
    }

    /// Sessions opened since creation.
    pub fn opened_total(&self) -> usize {
        self.opened_total.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StoreConnector for MemoryStore {
    async fn connect(&self) -> Result<Box<dyn KvSession>, StoreError> {
        if self.fail_connect {
            return Err(StoreError::Unavailable("connect refused".to_string()));
        }
        self.open_sessions.fetch_add(1, Ordering::SeqCst);
        self.opened_total.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemorySession {
            data: self.data.clone(),
            failing_prefixes: self.failing_prefixes.clone(),
            open_sessions: Arc::clone(&self.open_sessions),
        }))
    }
}

struct MemorySession {
    data: BTreeMap<String, Vec<u8>>,
    failing_prefixes: Vec<String>,
    open_sessions: Arc<AtomicUsize>,
}

impl MemorySession {
    fn check(&self, key: &str) -> Result<(), StoreError> {
        if self.failing_prefixes.iter().any(|p| key.starts_with(p.as_str())) {
            return Err(StoreError::request(key, "injected read failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl KvSession for MemorySession {
    async fn get(&mut self, key: &str) -> Result<Option<KeyValue>, StoreError> {
        self.check(key)?;
        Ok(self.data.get(key).map(|value| KeyValue::new(key, value.clone())))
    }

    async fn get_prefix(&mut self, prefix: &str) -> Result<Vec<KeyValue>, StoreError> {
        self.check(prefix)?;
        Ok(self
            .data
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| KeyValue::new(key.clone(), value.clone()))
            .collect())
    }
}

impl Drop for MemorySession {
    fn drop(&mut self) {
        self.open_sessions.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_and_prefix() {
        let store = MemoryStore::new()
            .with("/v/osd/stats/1", "a")
            .with("/v/osd/stats/2", "b")
            .with("/v/osd/state/1", "c");

        let mut session = store.connect().await.unwrap();
        let kv = session.get("/v/osd/stats/1").await.unwrap().unwrap();
        assert_eq!(kv.value, b"a");
        assert!(session.get("/v/missing").await.unwrap().is_none());

        let kvs = session.get_prefix("/v/osd/stats/").await.unwrap();
        let keys: Vec<_> = kvs.iter().map(|kv| kv.key.as_str()).collect();
        assert_eq!(keys, vec!["/v/osd/stats/1", "/v/osd/stats/2"]);
    }

    #[tokio::test]
    async fn test_session_accounting() {
        let store = MemoryStore::new();
        {
            let _first = store.connect().await.unwrap();
            let _second = store.connect().await.unwrap();
            assert_eq!(store.open_sessions(), 2);
        }
        assert_eq!(store.open_sessions(), 0);
        assert_eq!(store.opened_total(), 2);
    }

    #[tokio::test]
    async fn test_fault_injection() {
        let refused = MemoryStore::new().failing_connect();
        assert!(refused.connect().await.is_err());

        let store = MemoryStore::new().with("/v/stats", "{}").failing_reads_under("/v/stats");
        let mut session = store.connect().await.unwrap();
        assert!(session.get("/v/stats").await.is_err());
    }
}
