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

//! Collector registry.
//!
//! The registry is built once at process start. Every collector declares the
//! families it emits up front; registration fails if two collectors claim the
//! same family. After that the registry is read-only and can be shared across
//! concurrent scrapes behind an `Arc`.

use crate::{MetricDescriptor, PrometheusMetric};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Error type returned by [`Collector::collect`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A source of metric samples, invoked once per scrape.
#[async_trait]
pub trait Collector: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Every family this collector may emit.
    fn describe(&self) -> &'static [MetricDescriptor];

    /// Produce the samples for the current scrape.
    ///
    /// An error drops this collector's contribution for the scrape only.
    async fn collect(&self) -> Result<Vec<PrometheusMetric>, BoxError>;
}

/// Registration errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("collector '{0}' is already registered")]
    DuplicateCollector(&'static str),
    #[error("metric family '{family}' of collector '{collector}' is already registered")]
    DuplicateFamily {
        family: &'static str,
        collector: &'static str,
    },
}

/// Ordered set of collectors plus the descriptors of all their families.
#[derive(Default)]
pub struct Registry {
    collectors: Vec<Arc<dyn Collector>>,
    families: HashMap<&'static str, MetricDescriptor>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("collectors", &self.collector_names())
            .field("families", &self.families.len())
            .finish()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collector. Collectors are gathered in registration order.
    pub fn register(&mut self, collector: Arc<dyn Collector>) -> Result<(), RegistryError> {
        let name = collector.name();
        if self.collectors.iter().any(|c| c.name() == name) {
            return Err(RegistryError::DuplicateCollector(name));
        }
        for desc in collector.describe() {
            if self.families.contains_key(desc.name) {
                return Err(RegistryError::DuplicateFamily {
                    family: desc.name,
                    collector: name,
                });
            }
        }

        self.families
            .extend(collector.describe().iter().map(|desc| (desc.name, *desc)));
        self.collectors.push(collector);
        debug!(collector = name, "collector registered");
        Ok(())
    }

    /// Names of the registered collectors, in gather order.
    pub fn collector_names(&self) -> Vec<&'static str> {
        self.collectors.iter().map(|c| c.name()).collect()
    }

    /// Descriptor of a registered family.
    pub fn descriptor(&self, family: &str) -> Option<&MetricDescriptor> {
        self.families.get(family)
    }

    /// Run every collector once, sequentially, and concatenate the samples.
    ///
    /// Failed collectors are logged and skipped. Samples of undeclared
    /// families or with undeclared labels are dropped.
    pub async fn gather(&self) -> Vec<PrometheusMetric> {
        let mut metrics = Vec::new();

        for collector in &self.collectors {
            let name = collector.name();
            let started = Instant::now();
            match collector.collect().await {
                Ok(samples) => {
                    let total = samples.len();
                    metrics.extend(samples.into_iter().filter(|sample| accepts(collector.describe(), sample)));
                    debug!(collector = name, samples = total, elapsed_ms = started.elapsed().as_millis() as u64, "collector finished");
                }
                Err(e) => {
                    warn!(collector = name, error = %e, "collector failed, its metrics are omitted from this scrape");
                }
            }
        }

        metrics
    }
}

fn accepts(declared: &[MetricDescriptor], sample: &PrometheusMetric) -> bool {
    let Some(desc) = declared.iter().find(|d| d.name == sample.name) else {
        warn!(family = sample.name, "dropping sample of undeclared family");
        return false;
    };
    if let Some((key, _)) = sample.labels.iter().find(|(key, _)| !desc.has_label(key)) {
        warn!(family = sample.name, label = *key, "dropping sample with undeclared label");
        return false;
    }
    true
}
