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

//! JSON documents published by a Vitastor cluster in etcd.
//!
//! All numeric leaves are [`StatNumber`]s: absent or unparseable fields
//! produce no sample, they are never zero-filled by the decoder.

mod image;
mod monitor;
mod number;
mod osd;
mod pool;
mod stats;

pub use image::{ImageStats, IoStat};
pub use monitor::{MasterPointer, Monitor};
pub use number::StatNumber;
pub use osd::{OsdOpStat, OsdState, OsdStats};
pub use pool::{PoolConfig, PoolStats, Pools};
pub use stats::{GlobalStats, ObjectStats};

use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
