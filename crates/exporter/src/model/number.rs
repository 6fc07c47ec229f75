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

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// A numeric field kept as its source literal.
///
/// Vitastor writes counters as JSON integers, floats, or strings holding a
/// number, and some counters outgrow `u64`. The literal is kept untouched
/// and only converted to `f64` when a sample is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatNumber(String);

impl StatNumber {
    pub fn new(literal: impl Into<String>) -> Self {
        Self(literal.into())
    }

    /// The literal as it appeared in the document.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Finite floating point value, or `None` if the literal is not a number.
    pub fn as_f64(&self) -> Option<f64> {
        self.0.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

impl fmt::Display for StatNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for StatNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Any JSON type is accepted here; a non-numeric one fails later in
        // `as_f64`, which drops that single sample instead of the record.
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => Self(n.to_string()),
            Value::String(s) => Self(s),
            other => Self(other.to_string()),
        })
    }
}
