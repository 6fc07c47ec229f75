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

use super::{Record, decode_records, sample};
use crate::error::CollectError;
use crate::model::{OsdOpStat, OsdState, OsdStats};
use crate::store::{KeyLayout, StoreConnector};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;
use vitastor_metrics::{BoxError, Collector, MetricDescriptor, MetricType, PrometheusMetric};

const OSD_STATUS: MetricDescriptor = MetricDescriptor::new(
    "vitastor_osd_status",
    MetricType::Gauge,
    "OSD info. 1 if OSD up, 0 if down",
    &["osd_num", "host", "port"],
);
const OSD_DATA_BLOCK_SIZE: MetricDescriptor = MetricDescriptor::new(
    "vitastor_osd_data_block_size_bytes",
    MetricType::Gauge,
    "OSD block size in bytes",
    &["osd_num"],
);
const OSD_BITMAP_GRANULARITY: MetricDescriptor = MetricDescriptor::new(
    "vitastor_osd_bitmap_granularity",
    MetricType::Gauge,
    "OSD bitmap granularity in bytes",
    &["osd_num"],
);
const OSD_SIZE: MetricDescriptor =
    MetricDescriptor::new("vitastor_osd_size_bytes", MetricType::Gauge, "OSD size in bytes", &["osd_num"]);
const OSD_FREE: MetricDescriptor =
    MetricDescriptor::new("vitastor_osd_free_bytes", MetricType::Gauge, "OSD free size in bytes", &["osd_num"]);
const OSD_STAT_BYTES: MetricDescriptor = MetricDescriptor::new(
    "vitastor_osd_stat_bytes",
    MetricType::Counter,
    "OSD stat size",
    &["osd_num", "stat_type", "stat_name"],
);
const OSD_STAT_COUNT: MetricDescriptor = MetricDescriptor::new(
    "vitastor_osd_stat_count",
    MetricType::Counter,
    "OSD stat count",
    &["osd_num", "stat_type", "stat_name"],
);
const OSD_STAT_USEC: MetricDescriptor = MetricDescriptor::new(
    "vitastor_osd_stat_usec",
    MetricType::Counter,
    "OSD stat time in usecs",
    &["osd_num", "stat_type", "stat_name"],
);

static FAMILIES: [MetricDescriptor; 8] = [
    OSD_STATUS,
    OSD_DATA_BLOCK_SIZE,
    OSD_BITMAP_GRANULARITY,
    OSD_SIZE,
    OSD_FREE,
    OSD_STAT_BYTES,
    OSD_STAT_COUNT,
    OSD_STAT_USEC,
];

const UNKNOWN_PORT: &str = "unknown";

/// Which counters a stat category carries.
struct Category {
    label: &'static str,
    with_bytes: bool,
}

const OP: Category = Category {
    label: "op",
    with_bytes: true,
};
// Sub-operations never report bytes.
const SUBOP: Category = Category {
    label: "subop",
    with_bytes: false,
};
const RECOVERY: Category = Category {
    label: "rec",
    with_bytes: true,
};

/// OSD liveness, capacity and per-operation counters.
///
/// Stats records outlive the OSD process, state records only exist while the
/// OSD holds its etcd lease. Every OSD with stats is reported; a missing
/// state record marks it down.
pub struct OsdCollector {
    connector: Arc<dyn StoreConnector>,
    layout: KeyLayout,
}

impl OsdCollector {
    pub fn new(connector: Arc<dyn StoreConnector>, layout: KeyLayout) -> Self {
        Self { connector, layout }
    }

    async fn scrape(&self) -> Result<Vec<PrometheusMetric>, CollectError> {
        let mut session = self.connector.connect().await?;

        let state_dir = self.layout.osd_state_dir();
        let stats_dir = self.layout.osd_stats_dir();
        let states: BTreeMap<u64, OsdState> = by_osd_num(decode_records(session.get_prefix(&state_dir).await?, &state_dir));
        let stats: BTreeMap<u64, OsdStats> = by_osd_num(decode_records(session.get_prefix(&stats_dir).await?, &stats_dir));
        drop(session);

        let mut metrics = Vec::new();
        for (osd_num, stat) in &stats {
            let osd = osd_num.to_string();

            let status = match states.get(osd_num) {
                Some(state) => PrometheusMetric::from_descriptor(&OSD_STATUS, 1.0)
                    .with_label("osd_num", osd.clone())
                    .with_label("host", state.host.clone().unwrap_or_default())
                    .with_label(
                        "port",
                        state
                            .port
                            .as_ref()
                            .map_or_else(|| UNKNOWN_PORT.to_string(), |p| p.to_string()),
                    ),
                None => PrometheusMetric::from_descriptor(&OSD_STATUS, 0.0)
                    .with_label("osd_num", osd.clone())
                    .with_label("host", stat.host.clone().unwrap_or_default())
                    .with_label("port", UNKNOWN_PORT),
            };
            metrics.push(status);

            let capacity = [
                (&OSD_DATA_BLOCK_SIZE, stat.data_block_size.as_ref()),
                (&OSD_BITMAP_GRANULARITY, stat.bitmap_granularity.as_ref()),
                (&OSD_SIZE, stat.size.as_ref()),
                (&OSD_FREE, stat.free.as_ref()),
            ];
            metrics.extend(
                capacity
                    .into_iter()
                    .filter_map(|(desc, value)| sample(desc, value))
                    .map(|m| m.with_label("osd_num", osd.clone())),
            );

            push_op_stats(&mut metrics, &osd, &OP, &stat.op_stats);
            push_op_stats(&mut metrics, &osd, &SUBOP, &stat.subop_stats);
            push_op_stats(&mut metrics, &osd, &RECOVERY, &stat.recovery_stats);
        }

        Ok(metrics)
    }
}

fn by_osd_num<T>(records: Vec<Record<T>>) -> BTreeMap<u64, T> {
    records
        .into_iter()
        .filter_map(|record| match record.id.parse::<u64>() {
            Ok(num) => Some((num, record.doc)),
            Err(_) => {
                warn!(key = %record.key, "skipping OSD record with a non-numeric id");
                None
            }
        })
        .collect()
}

fn push_op_stats(metrics: &mut Vec<PrometheusMetric>, osd: &str, category: &Category, stats: &BTreeMap<String, OsdOpStat>) {
    for (name, stat) in stats {
        let bytes = if category.with_bytes { stat.bytes.as_ref() } else { None };
        let counters = [
            (&OSD_STAT_BYTES, bytes),
            (&OSD_STAT_COUNT, stat.count.as_ref()),
            (&OSD_STAT_USEC, stat.usec.as_ref()),
        ];
        metrics.extend(counters.into_iter().filter_map(|(desc, value)| sample(desc, value)).map(|m| {
            m.with_label("osd_num", osd.to_string())
                .with_label("stat_type", category.label)
                .with_label("stat_name", name.clone())
        }));
    }
}

#[async_trait]
impl Collector for OsdCollector {
    fn name(&self) -> &'static str {
        "osd"
    }

    fn describe(&self) -> &'static [MetricDescriptor] {
        &FAMILIES
    }

    async fn collect(&self) -> Result<Vec<PrometheusMetric>, BoxError> {
        Ok(self.scrape().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    async fn collect(store: MemoryStore) -> Vec<PrometheusMetric> {
        OsdCollector::new(Arc::new(store), KeyLayout::default())
            .collect()
            .await
            .unwrap()
    }

    fn find<'a>(metrics: &'a [PrometheusMetric], name: &str, labels: &[(&str, &str)]) -> Option<&'a PrometheusMetric> {
        metrics
            .iter()
            .find(|m| m.name == name && labels.iter().all(|(k, v)| m.label(k) == Some(*v)))
    }

    #[tokio::test]
    async fn test_down_osd_scenario() {
        let store = MemoryStore::new().with(
            "/vitastor/osd/stats/1",
            r#"{"host": "node1", "op_stats": {"read": {"bytes": 1024, "count": 10, "usec": 500}}}"#,
        );
        let metrics = collect(store).await;

        let status = find(&metrics, "vitastor_osd_status", &[("osd_num", "1")]).unwrap();
        assert_eq!(status.value, 0.0);
        assert_eq!(status.label("host"), Some("node1"));
        assert_eq!(status.label("port"), Some("unknown"));

        let read = [("osd_num", "1"), ("stat_type", "op"), ("stat_name", "read")];
        assert_eq!(find(&metrics, "vitastor_osd_stat_bytes", &read).map(|m| m.value), Some(1024.0));
        assert_eq!(find(&metrics, "vitastor_osd_stat_count", &read).map(|m| m.value), Some(10.0));
        assert_eq!(find(&metrics, "vitastor_osd_stat_usec", &read).map(|m| m.value), Some(500.0));
        assert_eq!(metrics.len(), 4);
    }

    #[tokio::test]
    async fn test_up_osd_uses_state_labels() {
        let store = MemoryStore::new()
            .with("/vitastor/osd/state/2", r#"{"state": "up", "host": "node2", "port": 46131}"#)
            .with("/vitastor/osd/state/3", r#"{"state": "up", "host": "node3"}"#)
            .with("/vitastor/osd/stats/2", r#"{"host": "stale", "size": 1000, "free": "400", "data_block_size": 131072, "bitmap_granularity": 4096}"#)
            .with("/vitastor/osd/stats/3", r#"{"host": "node3"}"#);
        let metrics = collect(store).await;

        let up = find(&metrics, "vitastor_osd_status", &[("osd_num", "2")]).unwrap();
        assert_eq!(up.value, 1.0);
        assert_eq!(up.label("host"), Some("node2"));
        assert_eq!(up.label("port"), Some("46131"));
        assert_eq!(find(&metrics, "vitastor_osd_status", &[("osd_num", "3")]).unwrap().label("port"), Some("unknown"));

        let osd2 = [("osd_num", "2")];
        assert_eq!(find(&metrics, "vitastor_osd_size_bytes", &osd2).map(|m| m.value), Some(1000.0));
        assert_eq!(find(&metrics, "vitastor_osd_free_bytes", &osd2).map(|m| m.value), Some(400.0));
        assert_eq!(find(&metrics, "vitastor_osd_data_block_size_bytes", &osd2).map(|m| m.value), Some(131072.0));
        assert_eq!(find(&metrics, "vitastor_osd_bitmap_granularity", &osd2).map(|m| m.value), Some(4096.0));
        assert!(find(&metrics, "vitastor_osd_size_bytes", &[("osd_num", "3")]).is_none());
    }

    #[tokio::test]
    async fn test_categories_and_omission() {
        let store = MemoryStore::new().with(
            "/vitastor/osd/stats/1",
            r#"{
                "op_stats": {"primary_write": {"count": 3, "usec": 30}},
                "subop_stats": {"write_stable": {"bytes": 99, "count": 2, "usec": 8}},
                "recovery_stats": {"degraded": {"bytes": 4096, "count": 1, "usec": 7}}
            }"#,
        );
        let metrics = collect(store).await;

        assert!(find(&metrics, "vitastor_osd_stat_bytes", &[("stat_name", "primary_write")]).is_none());
        assert!(find(&metrics, "vitastor_osd_stat_bytes", &[("stat_type", "subop")]).is_none());
        assert_eq!(
            find(&metrics, "vitastor_osd_stat_count", &[("stat_type", "subop"), ("stat_name", "write_stable")]).map(|m| m.value),
            Some(2.0)
        );
        let rec = [("stat_type", "rec"), ("stat_name", "degraded")];
        assert_eq!(find(&metrics, "vitastor_osd_stat_bytes", &rec).map(|m| m.value), Some(4096.0));
        assert_eq!(find(&metrics, "vitastor_osd_stat_usec", &rec).map(|m| m.value), Some(7.0));
        // status + 2 op + 2 subop + 3 rec
        assert_eq!(metrics.len(), 8);
    }

    #[tokio::test]
    async fn test_numeric_order_and_bad_records() {
        let store = MemoryStore::new()
            .with("/vitastor/osd/stats/10", "{}")
            .with("/vitastor/osd/stats/9", "{}")
            .with("/vitastor/osd/stats/abc", "{}")
            .with("/vitastor/osd/stats/11", "not json");
        let metrics = collect(store).await;
        let order: Vec<_> = metrics.iter().filter_map(|m| m.label("osd_num")).collect();
        assert_eq!(order, vec!["9", "10"]);
    }

    #[tokio::test]
    async fn test_integer_and_string_numbers_agree() {
        let numeric = collect(MemoryStore::new().with("/vitastor/osd/stats/1", r#"{"size": 1024, "op_stats": {"read": {"count": 5}}}"#)).await;
        let text = collect(MemoryStore::new().with("/vitastor/osd/stats/1", r#"{"size": "1024", "op_stats": {"read": {"count": "5"}}}"#)).await;
        assert_eq!(numeric, text);
    }

    #[tokio::test]
    async fn test_read_failure_aborts() {
        let store = MemoryStore::new()
            .with("/vitastor/osd/stats/1", "{}")
            .failing_reads_under("/vitastor/osd/state/");
        let collector = OsdCollector::new(Arc::new(store.clone()), KeyLayout::default());
        assert!(collector.collect().await.is_err());
        assert_eq!(store.open_sessions(), 0);
    }
}
