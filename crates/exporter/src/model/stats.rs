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

use super::{IoStat, StatNumber, null_as_default};
use serde::Deserialize;
use std::collections::BTreeMap;

/// `<prefix>/stats`: cluster-wide aggregate written by the master monitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GlobalStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub op_stats: BTreeMap<String, IoStat>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subop_stats: BTreeMap<String, IoStat>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recovery_stats: BTreeMap<String, IoStat>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub object_counts: ObjectStats,
    #[serde(default, deserialize_with = "null_as_default")]
    pub object_bytes: ObjectStats,
}

/// Object totals by health class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ObjectStats {
    #[serde(alias = "total")]
    pub object: Option<StatNumber>,
    pub clean: Option<StatNumber>,
    pub misplaced: Option<StatNumber>,
    pub degraded: Option<StatNumber>,
    pub incomplete: Option<StatNumber>,
}

impl ObjectStats {
    /// `(object_type, value)` pairs in emission order.
    pub fn by_type(&self) -> [(&'static str, Option<&StatNumber>); 5] {
        [
            ("clean", self.clean.as_ref()),
            ("degraded", self.degraded.as_ref()),
            ("misplaced", self.misplaced.as_ref()),
            ("incomplete", self.incomplete.as_ref()),
            ("total", self.object.as_ref()),
        ]
    }
}
