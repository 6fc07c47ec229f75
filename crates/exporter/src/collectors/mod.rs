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

//! Translators from Vitastor etcd documents to Prometheus samples.
//!
//! Each collector opens its own store session per scrape, reads the keys it
//! needs and turns every numeric leaf into one sample. A store failure drops
//! the collector's output for that scrape; a single undecodable record is
//! logged and skipped.

mod build_info;
mod image;
mod monitor;
mod osd;
mod pool;
mod stats;

pub use build_info::BuildInfoCollector;
pub use image::ImageCollector;
pub use monitor::MonitorCollector;
pub use osd::OsdCollector;
pub use pool::PoolCollector;
pub use stats::GlobalStatsCollector;

use crate::error::CollectError;
use crate::model::StatNumber;
use crate::store::{KeyLayout, KeyValue, StoreConnector, child_id};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::warn;
use vitastor_metrics::{MetricDescriptor, PrometheusMetric, Registry, RegistryError};

/// Register every Vitastor collector, in gather order.
pub fn register_collectors(
    registry: &mut Registry,
    connector: Arc<dyn StoreConnector>,
    layout: KeyLayout,
) -> Result<(), RegistryError> {
    registry.register(Arc::new(PoolCollector::new(connector.clone(), layout.clone())))?;
    registry.register(Arc::new(OsdCollector::new(connector.clone(), layout.clone())))?;
    registry.register(Arc::new(MonitorCollector::new(connector.clone(), layout.clone())))?;
    registry.register(Arc::new(ImageCollector::new(connector.clone(), layout.clone())))?;
    registry.register(Arc::new(GlobalStatsCollector::new(connector, layout)))?;
    registry.register(Arc::new(BuildInfoCollector))?;
    Ok(())
}

fn decode<T: DeserializeOwned>(kv: &KeyValue) -> Result<T, CollectError> {
    serde_json::from_slice(&kv.value).map_err(|source| CollectError::Decode {
        key: kv.key.clone(),
        source,
    })
}

/// One decoded record of a prefix scan.
struct Record<T> {
    key: String,
    id: String,
    doc: T,
}

/// Decode every record of a prefix scan below `dir`, in key order. Records
/// without an id or with an undecodable body are logged and skipped.
fn decode_records<T: DeserializeOwned>(records: Vec<KeyValue>, dir: &str) -> Vec<Record<T>> {
    records
        .into_iter()
        .filter_map(|kv| {
            let Some(id) = child_id(&kv.key, dir).map(str::to_string) else {
                warn!(key = %kv.key, "skipping record without an id");
                return None;
            };
            match decode(&kv) {
                Ok(doc) => Some(Record { key: kv.key, id, doc }),
                Err(e) => {
                    warn!(error = %e, "skipping undecodable record");
                    None
                }
            }
        })
        .collect()
}

/// A sample of `desc`, or `None` if the field is absent or not a number.
fn sample(desc: &MetricDescriptor, value: Option<&StatNumber>) -> Option<PrometheusMetric> {
    value
        .and_then(StatNumber::as_f64)
        .map(|v| PrometheusMetric::from_descriptor(desc, v))
}

/// Ids in numeric order where they are numbers, lexicographic otherwise.
fn sorted_ids<'a>(ids: impl IntoIterator<Item = &'a String>) -> Vec<&'a str> {
    let mut ids: Vec<&str> = ids.into_iter().map(String::as_str).collect();
    ids.sort_by_key(|id| (id.parse::<u64>().unwrap_or(u64::MAX), *id));
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use vitastor_metrics::MetricType;

    const TEST: MetricDescriptor = MetricDescriptor::new("test", MetricType::Gauge, "Test", &[]);

    #[test]
    fn test_sample_omits_missing_and_invalid() {
        assert!(sample(&TEST, None).is_none());
        assert!(sample(&TEST, Some(&StatNumber::new("n/a"))).is_none());
        assert_eq!(sample(&TEST, Some(&StatNumber::new("2"))).map(|m| m.value), Some(2.0));
    }

    #[test]
    fn test_decode_records_skips_bad_entries() {
        let records = vec![
            KeyValue::new("/v/osd/stats/1", r#"{"a": 1}"#),
            KeyValue::new("/v/osd/stats/2", "garbage"),
            KeyValue::new("/v/osd/stats/", "{}"),
            KeyValue::new("/v/osd/stats/3/extra", "{}"),
        ];
        let decoded: Vec<Record<serde_json::Value>> = decode_records(records, "/v/osd/stats/");
        let ids: Vec<_> = decoded.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(decoded[1].key, "/v/osd/stats/3/extra");
        assert_eq!(decoded[0].doc["a"], 1);
    }

    #[test]
    fn test_sorted_ids() {
        let ids = ["10".to_string(), "2".to_string(), "x".to_string(), "1".to_string()];
        assert_eq!(sorted_ids(&ids), vec!["1", "2", "10", "x"]);
    }

    #[test]
    fn test_register_collectors_order() {
        let mut registry = Registry::new();
        register_collectors(&mut registry, Arc::new(MemoryStore::new()), KeyLayout::default()).unwrap();
        assert_eq!(
            registry.collector_names(),
            vec!["pool", "osd", "monitor", "image", "global_stats", "build_info"]
        );
        assert!(registry.descriptor("vitastor_osd_stat_usec").is_some());

        let err = register_collectors(&mut registry, Arc::new(MemoryStore::new()), KeyLayout::default());
        assert_eq!(err, Err(RegistryError::DuplicateCollector("pool")));
    }
}
