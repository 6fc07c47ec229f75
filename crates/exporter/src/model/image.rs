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

/// `<prefix>/inode/stats/<pool id>/<image num>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ImageStats {
    pub raw_used: Option<StatNumber>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub read: IoStat,
    #[serde(default, deserialize_with = "null_as_default")]
    pub write: IoStat,
    #[serde(default, deserialize_with = "null_as_default")]
    pub delete: IoStat,
}

/// Totals and current rates of one I/O kind.
///
/// Also used for the cluster-wide op, subop and recovery categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IoStat {
    pub count: Option<StatNumber>,
    pub usec: Option<StatNumber>,
    pub bytes: Option<StatNumber>,
    pub bps: Option<StatNumber>,
    pub iops: Option<StatNumber>,
    pub lat: Option<StatNumber>,
}
