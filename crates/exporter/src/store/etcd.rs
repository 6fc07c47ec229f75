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

//! etcd v3 implementation of the store traits.

use super::{KeyValue, KvSession, StoreConnector};
use crate::error::StoreError;
use async_trait::async_trait;
use etcd_client::{Client, ConnectOptions, GetOptions};
use std::time::Duration;
use tracing::debug;

/// Opens a new etcd client for every session.
#[derive(Debug, Clone)]
pub struct EtcdConnector {
    endpoints: Vec<String>,
    connect_timeout: Duration,
    request_timeout: Duration,
}

impl EtcdConnector {
    pub fn new(endpoints: Vec<String>, connect_timeout: Duration, request_timeout: Duration) -> Self {
        Self {
            endpoints,
            connect_timeout,
            request_timeout,
        }
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }
}

#[async_trait]
impl StoreConnector for EtcdConnector {
    async fn connect(&self) -> Result<Box<dyn KvSession>, StoreError> {
        if self.endpoints.is_empty() {
            return Err(StoreError::NoEndpoints);
        }

        // Read deadlines are enforced per range call so they surface as
        // `RequestTimeout` rather than a transport status.
        let options = ConnectOptions::new().with_connect_timeout(self.connect_timeout);

        let client = tokio::time::timeout(self.connect_timeout, Client::connect(self.endpoints.as_slice(), Some(options)))
            .await
            .map_err(|_| StoreError::ConnectTimeout(self.connect_timeout))?
            .map_err(|e| StoreError::Connect(e.to_string()))?;

        debug!(endpoints = ?self.endpoints, "etcd session opened");
        Ok(Box::new(EtcdSession {
            client,
            request_timeout: self.request_timeout,
        }))
    }
}

/// A connected etcd client. Dropping it closes the underlying channel.
struct EtcdSession {
    client: Client,
    request_timeout: Duration,
}

impl EtcdSession {
    async fn range(&mut self, key: &str, options: Option<GetOptions>) -> Result<Vec<KeyValue>, StoreError> {
        let response = tokio::time::timeout(self.request_timeout, self.client.get(key, options))
            .await
            .map_err(|_| StoreError::RequestTimeout {
                key: key.to_string(),
                timeout: self.request_timeout,
            })?
            .map_err(|e| StoreError::request(key, e))?;

        Ok(response
            .kvs()
            .iter()
            .map(|kv| KeyValue::new(String::from_utf8_lossy(kv.key()).into_owned(), kv.value()))
            .collect())
    }
}

#[async_trait]
impl KvSession for EtcdSession {
    async fn get(&mut self, key: &str) -> Result<Option<KeyValue>, StoreError> {
        Ok(self.range(key, None).await?.into_iter().next())
    }

    async fn get_prefix(&mut self, prefix: &str) -> Result<Vec<KeyValue>, StoreError> {
        self.range(prefix, Some(GetOptions::new().with_prefix())).await
    }
}

impl Drop for EtcdSession {
    fn drop(&mut self) {
        debug!("etcd session closed");
    }
}
