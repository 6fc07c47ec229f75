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

use super::null_as_default;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `<prefix>/mon/member/<id>`: one running monitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Monitor {
    #[serde(default, deserialize_with = "flexible_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hostname: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ip: Vec<String>,
}

impl Monitor {
    /// First advertised address, or `""` if the monitor lists none.
    pub fn first_ip(&self) -> &str {
        self.ip.first().map(String::as_str).unwrap_or("")
    }
}

/// `<prefix>/mon/master`: which monitor currently leads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MasterPointer {
    #[serde(default, deserialize_with = "flexible_id")]
    pub id: Option<String>,
}

/// Monitor ids are lease ids; depending on the writer they are stored as a
/// JSON string or a JSON number.
fn flexible_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(other) => {
            return Err(serde::de::Error::custom(format!("unexpected monitor id {other}")));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_id_string_or_number() {
        let text: MasterPointer = serde_json::from_str(r#"{"id": "7587843910924427011"}"#).unwrap();
        let number: MasterPointer = serde_json::from_str(r#"{"id": 7587843910924427011}"#).unwrap();
        assert_eq!(text.id.as_deref(), Some("7587843910924427011"));
        assert_eq!(text, number);
    }

    #[test]
    fn test_master_without_id() {
        let master: MasterPointer = serde_json::from_str(r#"{"ip": ["10.0.0.1"]}"#).unwrap();
        assert!(master.id.is_none());
        assert!(serde_json::from_str::<MasterPointer>(r#"{"id": [1]}"#).is_err());
    }

    #[test]
    fn test_member_first_ip() {
        let member: Monitor = serde_json::from_str(r#"{"hostname": "mon1", "ip": ["10.0.0.1", "10.0.1.1"]}"#).unwrap();
        assert_eq!(member.first_ip(), "10.0.0.1");

        let empty: Monitor = serde_json::from_str(r#"{"hostname": "mon2", "ip": []}"#).unwrap();
        assert_eq!(empty.first_ip(), "");
        let null: Monitor = serde_json::from_str(r#"{"ip": null}"#).unwrap();
        assert_eq!(null.first_ip(), "");
        assert!(null.hostname.is_empty());
    }

    #[test]
    fn test_member_null_hostname() {
        let member: Monitor = serde_json::from_str(r#"{"id": 5, "hostname": null, "ip": ["10.0.0.5"]}"#).unwrap();
        assert_eq!(member.id.as_deref(), Some("5"));
        assert!(member.hostname.is_empty());
        assert_eq!(member.first_ip(), "10.0.0.5");
    }
}
