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

use super::{decode, decode_records, sample, sorted_ids};
use crate::error::CollectError;
use crate::model::{ImageStats, IoStat, Pools};
use crate::store::{KeyLayout, StoreConnector};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use vitastor_metrics::{BoxError, Collector, MetricDescriptor, MetricType, PrometheusMetric};

const IMAGE_RAW_USED: MetricDescriptor = MetricDescriptor::new(
    "vitastor_image_raw_used",
    MetricType::Gauge,
    "Image raw used in bytes",
    &["pool_id", "image_num"],
);
const IMAGE_READ: MetricDescriptor = MetricDescriptor::new(
    "vitastor_image_read",
    MetricType::Counter,
    "Image read stat",
    &["pool_id", "image_num", "stat_name"],
);
const IMAGE_WRITE: MetricDescriptor = MetricDescriptor::new(
    "vitastor_image_write",
    MetricType::Counter,
    "Image write stat",
    &["pool_id", "image_num", "stat_name"],
);
const IMAGE_DELETE: MetricDescriptor = MetricDescriptor::new(
    "vitastor_image_delete",
    MetricType::Counter,
    "Image delete stat",
    &["pool_id", "image_num", "stat_name"],
);

static FAMILIES: [MetricDescriptor; 4] = [IMAGE_RAW_USED, IMAGE_READ, IMAGE_WRITE, IMAGE_DELETE];

/// Per-image usage and I/O statistics, discovered pool by pool.
pub struct ImageCollector {
    connector: Arc<dyn StoreConnector>,
    layout: KeyLayout,
}

impl ImageCollector {
    pub fn new(connector: Arc<dyn StoreConnector>, layout: KeyLayout) -> Self {
        Self { connector, layout }
    }

    async fn scrape(&self) -> Result<Vec<PrometheusMetric>, CollectError> {
        let mut session = self.connector.connect().await?;

        let config_key = self.layout.pool_config();
        let Some(kv) = session.get(&config_key).await? else {
            debug!(key = %config_key, "no pool configuration, skipping images");
            return Ok(Vec::new());
        };
        let pools: Pools = decode(&kv)?;

        let mut metrics = Vec::new();
        for pool_id in sorted_ids(pools.keys()) {
            let dir = self.layout.image_stats_dir(pool_id);
            let images = decode_records::<ImageStats>(session.get_prefix(&dir).await?, &dir);

            for image in images {
                let labels = |m: PrometheusMetric| {
                    m.with_label("pool_id", pool_id.to_string())
                        .with_label("image_num", image.id.clone())
                };
                metrics.extend(sample(&IMAGE_RAW_USED, image.doc.raw_used.as_ref()).map(labels));
                for (desc, io) in [
                    (&IMAGE_READ, &image.doc.read),
                    (&IMAGE_WRITE, &image.doc.write),
                    (&IMAGE_DELETE, &image.doc.delete),
                ] {
                    metrics.extend(io_samples(desc, io).map(labels));
                }
            }
        }

        Ok(metrics)
    }
}

/// One sample per present field, labelled with its `stat_name`.
fn io_samples<'a>(desc: &'a MetricDescriptor, io: &'a IoStat) -> impl Iterator<Item = PrometheusMetric> + 'a {
    [
        ("count", io.count.as_ref()),
        ("usecs", io.usec.as_ref()),
        ("bytes", io.bytes.as_ref()),
        ("bps", io.bps.as_ref()),
        ("iops", io.iops.as_ref()),
        ("lat", io.lat.as_ref()),
    ]
    .into_iter()
    .filter_map(move |(name, value)| sample(desc, value).map(|m| m.with_label("stat_name", name)))
}

#[async_trait]
impl Collector for ImageCollector {
    fn name(&self) -> &'static str {
        "image"
    }

    fn describe(&self) -> &'static [MetricDescriptor] {
        &FAMILIES
    }

    async fn collect(&self) -> Result<Vec<PrometheusMetric>, BoxError> {
        Ok(self.scrape().await?)
    }
}
