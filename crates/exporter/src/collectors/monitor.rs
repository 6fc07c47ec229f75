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

use super::{decode, decode_records};
use crate::error::CollectError;
use crate::model::{MasterPointer, Monitor};
use crate::store::{KeyLayout, StoreConnector};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};
use vitastor_metrics::{BoxError, Collector, MetricDescriptor, MetricType, PrometheusMetric};

const MONITOR_INFO: MetricDescriptor = MetricDescriptor::new(
    "vitastor_monitor_info",
    MetricType::Gauge,
    "Monitor info, 1 is master, 0 is standby",
    &["monitor_id", "monitor_hostname", "monitor_ip"],
);

static FAMILIES: [MetricDescriptor; 1] = [MONITOR_INFO];

/// Monitor membership and leadership.
pub struct MonitorCollector {
    connector: Arc<dyn StoreConnector>,
    layout: KeyLayout,
}

impl MonitorCollector {
    pub fn new(connector: Arc<dyn StoreConnector>, layout: KeyLayout) -> Self {
        Self { connector, layout }
    }

    async fn scrape(&self) -> Result<Vec<PrometheusMetric>, CollectError> {
        let mut session = self.connector.connect().await?;

        let master_key = self.layout.mon_master();
        let Some(kv) = session.get(&master_key).await? else {
            debug!(key = %master_key, "no master monitor");
            return Ok(Vec::new());
        };
        let master: MasterPointer = match decode(&kv) {
            Ok(master) => master,
            Err(e) => {
                warn!(error = %e, "unable to parse master monitor block");
                return Ok(Vec::new());
            }
        };

        let member_dir = self.layout.mon_member_dir();
        let members = decode_records::<Monitor>(session.get_prefix(&member_dir).await?, &member_dir);

        Ok(members
            .into_iter()
            .map(|member| {
                let is_master = master.id.as_deref() == Some(member.id.as_str());
                let ip = member.doc.first_ip().to_string();
                PrometheusMetric::from_descriptor(&MONITOR_INFO, if is_master { 1.0 } else { 0.0 })
                    .with_label("monitor_id", member.key)
                    .with_label("monitor_hostname", member.doc.hostname)
                    .with_label("monitor_ip", ip)
            })
            .collect())
    }
}

#[async_trait]
impl Collector for MonitorCollector {
    fn name(&self) -> &'static str {
        "monitor"
    }

    fn describe(&self) -> &'static [MetricDescriptor] {
        &FAMILIES
    }

    async fn collect(&self) -> Result<Vec<PrometheusMetric>, BoxError> {
        Ok(self.scrape().await?)
    }
}
