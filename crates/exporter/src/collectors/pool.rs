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

use super::{decode, sorted_ids};
use crate::error::CollectError;
use crate::model::{PoolStats, Pools, StatNumber};
use crate::store::{KeyLayout, StoreConnector};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};
use vitastor_metrics::{BoxError, Collector, MetricDescriptor, MetricType, PrometheusMetric};

const POOL_INFO: MetricDescriptor = MetricDescriptor::new(
    "vitastor_pool_info",
    MetricType::Gauge,
    "Pool info",
    &[
        "pool_name",
        "pool_id",
        "pool_scheme",
        "pg_size",
        "parity_chunks",
        "pg_minsize",
        "pg_count",
        "failure_domain",
    ],
);
const POOL_USED_RAW_TB: MetricDescriptor = MetricDescriptor::new(
    "vitastor_pool_used_raw_tb",
    MetricType::Gauge,
    "Raw used space of pool in TB",
    &["pool_name", "pool_id"],
);
const POOL_TOTAL_RAW_TB: MetricDescriptor = MetricDescriptor::new(
    "vitastor_pool_total_raw_tb",
    MetricType::Gauge,
    "Total raw space of pool in TB",
    &["pool_name", "pool_id"],
);
const POOL_SPACE_EFFICIENCY: MetricDescriptor = MetricDescriptor::new(
    "vitastor_pool_space_efficiency",
    MetricType::Gauge,
    "Pool space usage efficiency",
    &["pool_name", "pool_id"],
);
const POOL_RAW_TO_USABLE: MetricDescriptor = MetricDescriptor::new(
    "vitastor_pool_raw_to_usable",
    MetricType::Gauge,
    "Raw to usable space ratio",
    &["pool_name", "pool_id"],
);

static FAMILIES: [MetricDescriptor; 5] = [
    POOL_INFO,
    POOL_USED_RAW_TB,
    POOL_TOTAL_RAW_TB,
    POOL_SPACE_EFFICIENCY,
    POOL_RAW_TO_USABLE,
];

/// Pool topology and capacity.
///
/// Unlike the other collectors, capacity gauges of a pool without usable
/// stats are reported as 0 rather than left out.
pub struct PoolCollector {
    connector: Arc<dyn StoreConnector>,
    layout: KeyLayout,
}

impl PoolCollector {
    pub fn new(connector: Arc<dyn StoreConnector>, layout: KeyLayout) -> Self {
        Self { connector, layout }
    }

    async fn scrape(&self) -> Result<Vec<PrometheusMetric>, CollectError> {
        let mut session = self.connector.connect().await?;

        let config_key = self.layout.pool_config();
        let Some(kv) = session.get(&config_key).await? else {
            debug!(key = %config_key, "no pool configuration");
            return Ok(Vec::new());
        };
        let pools: Pools = decode(&kv)?;

        let mut metrics = Vec::with_capacity(pools.len() * FAMILIES.len());
        for pool_id in sorted_ids(pools.keys()) {
            let Some(pool) = pools.get(pool_id) else {
                continue;
            };

            let stats_key = self.layout.pool_stats(pool_id);
            let stats = match session.get(&stats_key).await? {
                Some(kv) => decode::<PoolStats>(&kv).unwrap_or_else(|e| {
                    warn!(pool_id, error = %e, "unable to parse pool stats");
                    PoolStats::default()
                }),
                None => PoolStats::default(),
            };

            metrics.push(
                PrometheusMetric::from_descriptor(&POOL_INFO, 1.0)
                    .with_label("pool_name", pool.name.clone())
                    .with_label("pool_id", pool_id.to_string())
                    .with_label("pool_scheme", pool.scheme.clone())
                    .with_label("pg_size", int_label(pool.pg_size.as_ref()))
                    .with_label("parity_chunks", int_label(pool.parity_chunks.as_ref()))
                    .with_label("pg_minsize", int_label(pool.pg_minsize.as_ref()))
                    .with_label("pg_count", int_label(pool.pg_count.as_ref()))
                    .with_label("failure_domain", pool.failure_domain.clone()),
            );

            let gauges = [
                (&POOL_USED_RAW_TB, stats.used_raw_tb.as_ref()),
                (&POOL_TOTAL_RAW_TB, stats.total_raw_tb.as_ref()),
                (&POOL_SPACE_EFFICIENCY, stats.space_efficiency.as_ref()),
                (&POOL_RAW_TO_USABLE, stats.raw_to_usable.as_ref()),
            ];
            for (desc, value) in gauges {
                let value = value.and_then(StatNumber::as_f64).unwrap_or(0.0);
                metrics.push(
                    PrometheusMetric::from_descriptor(desc, value)
                        .with_label("pool_name", pool.name.clone())
                        .with_label("pool_id", pool_id.to_string()),
                );
            }
        }

        Ok(metrics)
    }
}

/// Integer topology label; absent settings render as "0".
fn int_label(value: Option<&StatNumber>) -> String {
    value.map_or_else(|| "0".to_string(), StatNumber::to_string)
}

#[async_trait]
impl Collector for PoolCollector {
    fn name(&self) -> &'static str {
        "pool"
    }

    fn describe(&self) -> &'static [MetricDescriptor] {
        &FAMILIES
    }

    async fn collect(&self) -> Result<Vec<PrometheusMetric>, BoxError> {
        Ok(self.scrape().await?)
    }
}
