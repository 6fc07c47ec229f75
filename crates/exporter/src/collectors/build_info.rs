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

use crate::version;
use async_trait::async_trait;
use vitastor_metrics::{BoxError, Collector, MetricDescriptor, MetricType, PrometheusMetric};

const BUILD_INFO: MetricDescriptor = MetricDescriptor::new(
    "vitastor_exporter_build_info",
    MetricType::Gauge,
    "Exporter build metadata, constant 1",
    &["version", "revision", "branch", "rustversion"],
);

static FAMILIES: [MetricDescriptor; 1] = [BUILD_INFO];

/// Constant build metadata of the running exporter.
pub struct BuildInfoCollector;

#[async_trait]
impl Collector for BuildInfoCollector {
    fn name(&self) -> &'static str {
        "build_info"
    }

    fn describe(&self) -> &'static [MetricDescriptor] {
        &FAMILIES
    }

    async fn collect(&self) -> Result<Vec<PrometheusMetric>, BoxError> {
        Ok(vec![
            PrometheusMetric::from_descriptor(&BUILD_INFO, 1.0)
                .with_label("version", version::VERSION)
                .with_label("revision", version::REVISION)
                .with_label("branch", version::BRANCH)
                .with_label("rustversion", version::RUST_VERSION),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_info() {
        let metrics = BuildInfoCollector.collect().await.unwrap();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].value, 1.0);
        assert_eq!(metrics[0].label("version"), Some(env!("CARGO_PKG_VERSION")));
    }
}
