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

use super::{StatNumber, null_as_default};
use serde::Deserialize;
use std::collections::BTreeMap;

/// `<prefix>/config/pools`: pool id → pool configuration.
pub type Pools = BTreeMap<String, PoolConfig>;

/// Static topology of one pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PoolConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scheme: String,
    pub pg_size: Option<StatNumber>,
    pub parity_chunks: Option<StatNumber>,
    pub pg_minsize: Option<StatNumber>,
    pub pg_count: Option<StatNumber>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub failure_domain: String,
}

/// `<prefix>/pool/stats/<pool id>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PoolStats {
    pub used_raw_tb: Option<StatNumber>,
    pub total_raw_tb: Option<StatNumber>,
    pub raw_to_usable: Option<StatNumber>,
    pub space_efficiency: Option<StatNumber>,
}
