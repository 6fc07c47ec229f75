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

//! Prometheus plumbing for the Vitastor exporter.
//!
//! - [`PrometheusMetric`]: one labelled sample
//! - [`MetricDescriptor`]: static description of a metric family
//! - [`render_metrics`]: text exposition format renderer
//! - [`Collector`] / [`Registry`]: the per-scrape collection contract
//!
//! # Example
//!
//! ```
//! use vitastor_metrics::{render_metrics, MetricDescriptor, MetricType, PrometheusMetric};
//!
//! const FREE: MetricDescriptor =
//!     MetricDescriptor::new("vitastor_osd_free_bytes", MetricType::Gauge, "OSD free size in bytes", &["osd_num"]);
//!
//! let sample = PrometheusMetric::from_descriptor(&FREE, 1024.0).with_label("osd_num", "1");
//! let output = render_metrics(&[sample]);
//! assert!(output.contains("vitastor_osd_free_bytes{osd_num=\"1\"} 1024"));
//! ```

mod descriptor;
mod format;
mod metric_type;
mod registry;

pub use descriptor::MetricDescriptor;
pub use format::{PrometheusMetric, TEXT_CONTENT_TYPE, render_metrics};
pub use metric_type::MetricType;
pub use registry::{BoxError, Collector, Registry, RegistryError};
