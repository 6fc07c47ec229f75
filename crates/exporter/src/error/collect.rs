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

//! Collector error types

use super::StoreError;

/// Reasons a collector drops its whole contribution to a scrape.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    /// Connecting to or reading from the store failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A document every other sample depends on could not be decoded
    #[error("Unable to parse '{key}': {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
