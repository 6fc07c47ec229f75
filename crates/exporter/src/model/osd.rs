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

/// `<prefix>/osd/state/<osd num>`, present while the OSD holds its lease.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OsdState {
    #[serde(default, deserialize_with = "null_as_default")]
    pub addresses: Vec<String>,
    pub host: Option<String>,
    pub port: Option<StatNumber>,
    pub state: Option<String>,
    pub blockstore_enabled: Option<bool>,
    pub primary_enabled: Option<bool>,
}

/// `<prefix>/osd/stats/<osd num>`, left behind after the OSD goes down.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OsdStats {
    pub host: Option<String>,
    pub data_block_size: Option<StatNumber>,
    pub bitmap_granularity: Option<StatNumber>,
    pub size: Option<StatNumber>,
    pub free: Option<StatNumber>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub op_stats: BTreeMap<String, OsdOpStat>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subop_stats: BTreeMap<String, OsdOpStat>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recovery_stats: BTreeMap<String, OsdOpStat>,
}

/// Cumulative counters of one operation kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OsdOpStat {
    pub bytes: Option<StatNumber>,
    pub count: Option<StatNumber>,
    pub usec: Option<StatNumber>,
}
