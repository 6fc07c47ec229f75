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

use super::{decode, sample};
use crate::error::CollectError;
use crate::model::{GlobalStats, IoStat, ObjectStats, StatNumber};
use crate::store::{KeyLayout, StoreConnector};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;
use vitastor_metrics::{BoxError, Collector, MetricDescriptor, MetricType, PrometheusMetric};

const STAT_LABELS: &[&str] = &["stat_type", "stat_name"];

const GLOBAL_STAT_BYTES: MetricDescriptor =
    MetricDescriptor::new("vitastor_global_stat_bytes", MetricType::Counter, "Global stat size", STAT_LABELS);
const GLOBAL_STAT_COUNT: MetricDescriptor =
    MetricDescriptor::new("vitastor_global_stat_count", MetricType::Counter, "Global stat count", STAT_LABELS);
const GLOBAL_STAT_USEC: MetricDescriptor = MetricDescriptor::new(
    "vitastor_global_stat_usec",
    MetricType::Counter,
    "Global stat time in usecs",
    STAT_LABELS,
);
const GLOBAL_STAT_BPS: MetricDescriptor = MetricDescriptor::new(
    "vitastor_global_stat_bps",
    MetricType::Gauge,
    "Global stat bytes per second",
    STAT_LABELS,
);
const GLOBAL_STAT_IOPS: MetricDescriptor =
    MetricDescriptor::new("vitastor_global_stat_iops", MetricType::Gauge, "Global stat IOPS", STAT_LABELS);
const GLOBAL_STAT_LAT: MetricDescriptor = MetricDescriptor::new(
    "vitastor_global_stat_lat",
    MetricType::Gauge,
    "Global stat latency in usecs",
    STAT_LABELS,
);
const GLOBAL_OBJECT_COUNT: MetricDescriptor = MetricDescriptor::new(
    "vitastor_global_object_count",
    MetricType::Gauge,
    "Global object count",
    &["object_type"],
);
const GLOBAL_OBJECT_BYTES: MetricDescriptor = MetricDescriptor::new(
    "vitastor_global_object_bytes",
    MetricType::Gauge,
    "Global object size in bytes",
    &["object_type"],
);

static FAMILIES: [MetricDescriptor; 8] = [
    GLOBAL_STAT_BYTES,
    GLOBAL_STAT_COUNT,
    GLOBAL_STAT_USEC,
    GLOBAL_STAT_BPS,
    GLOBAL_STAT_IOPS,
    GLOBAL_STAT_LAT,
    GLOBAL_OBJECT_COUNT,
    GLOBAL_OBJECT_BYTES,
];

/// Fields reported for one stat category.
#[derive(Clone, Copy)]
enum Field {
    Bytes,
    Count,
    Usec,
    Bps,
    Iops,
    Lat,
}

impl Field {
    fn descriptor(self) -> &'static MetricDescriptor {
        match self {
            Field::Bytes => &GLOBAL_STAT_BYTES,
            Field::Count => &GLOBAL_STAT_COUNT,
            Field::Usec => &GLOBAL_STAT_USEC,
            Field::Bps => &GLOBAL_STAT_BPS,
            Field::Iops => &GLOBAL_STAT_IOPS,
            Field::Lat => &GLOBAL_STAT_LAT,
        }
    }

    fn of(self, stat: &IoStat) -> Option<&StatNumber> {
        match self {
            Field::Bytes => stat.bytes.as_ref(),
            Field::Count => stat.count.as_ref(),
            Field::Usec => stat.usec.as_ref(),
            Field::Bps => stat.bps.as_ref(),
            Field::Iops => stat.iops.as_ref(),
            Field::Lat => stat.lat.as_ref(),
        }
    }
}

const OP_FIELDS: &[Field] = &[Field::Bytes, Field::Count, Field::Usec, Field::Bps, Field::Iops, Field::Lat];
const SUBOP_FIELDS: &[Field] = &[Field::Count, Field::Usec, Field::Lat, Field::Iops];
const RECOVERY_FIELDS: &[Field] = &[Field::Bytes, Field::Count];

/// Cluster-wide operation statistics and object health.
pub struct GlobalStatsCollector {
    connector: Arc<dyn StoreConnector>,
    layout: KeyLayout,
}

impl GlobalStatsCollector {
    pub fn new(connector: Arc<dyn StoreConnector>, layout: KeyLayout) -> Self {
        Self { connector, layout }
    }

    async fn scrape(&self) -> Result<Vec<PrometheusMetric>, CollectError> {
        let mut session = self.connector.connect().await?;

        let key = self.layout.global_stats();
        let Some(kv) = session.get(&key).await? else {
            debug!(key = %key, "no global stats");
            return Ok(Vec::new());
        };
        let stats: GlobalStats = decode(&kv)?;

        let mut metrics = Vec::new();
        push_stats(&mut metrics, "op", OP_FIELDS, &stats.op_stats);
        push_stats(&mut metrics, "subop", SUBOP_FIELDS, &stats.subop_stats);
        push_stats(&mut metrics, "rec", RECOVERY_FIELDS, &stats.recovery_stats);
        push_objects(&mut metrics, &GLOBAL_OBJECT_COUNT, &stats.object_counts);
        push_objects(&mut metrics, &GLOBAL_OBJECT_BYTES, &stats.object_bytes);
        Ok(metrics)
    }
}

fn push_stats(metrics: &mut Vec<PrometheusMetric>, stat_type: &'static str, fields: &[Field], stats: &BTreeMap<String, IoStat>) {
    for (name, stat) in stats {
        for field in fields {
            if let Some(m) = sample(field.descriptor(), field.of(stat)) {
                metrics.push(m.with_label("stat_type", stat_type).with_label("stat_name", name.clone()));
            }
        }
    }
}

fn push_objects(metrics: &mut Vec<PrometheusMetric>, desc: &MetricDescriptor, objects: &ObjectStats) {
    for (object_type, value) in objects.by_type() {
        if let Some(m) = sample(desc, value) {
            metrics.push(m.with_label("object_type", object_type));
        }
    }
}

#[async_trait]
impl Collector for GlobalStatsCollector {
    fn name(&self) -> &'static str {
        "global_stats"
    }

    fn describe(&self) -> &'static [MetricDescriptor] {
        &FAMILIES
    }

    async fn collect(&self) -> Result<Vec<PrometheusMetric>, BoxError> {
        Ok(self.scrape().await?)
    }
}
