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

use serde::Deserialize;

/// `etcd_address` is written either as one comma-separated string or as a
/// list of addresses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EtcdAddress {
    List(Vec<String>),
    Joined(String),
}

impl EtcdAddress {
    /// Raw addresses, split on commas.
    pub fn addresses(&self) -> Vec<String> {
        match self {
            EtcdAddress::List(list) => list.iter().flat_map(|a| a.split(',')).map(str::to_string).collect(),
            EtcdAddress::Joined(joined) => joined.split(',').map(str::to_string).collect(),
        }
    }
}

/// The subset of `/etc/vitastor/vitastor.conf` the exporter reads. Every
/// other client option in the file is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VitastorConf {
    pub etcd_address: Option<EtcdAddress>,
    pub etcd_prefix: Option<String>,
}
