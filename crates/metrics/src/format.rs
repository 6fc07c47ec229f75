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

//! Prometheus text exposition format renderer.
//!
//! Samples of one family must be contiguous in the exposition output, but
//! collectors emit them interleaved (one OSD at a time, say). The renderer
//! groups samples by family name, keeping families in order of first
//! appearance and samples in emission order.

use crate::{MetricDescriptor, MetricType};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::Write;

/// Content type of the text exposition format, version 0.0.4.
pub const TEXT_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// A single Prometheus metric with labels and value.
///
/// This struct is optimized for performance by using `&'static str` for
/// the name and help text, which are typically compile-time constants.
/// Labels use `Cow<'static, str>` to avoid allocations when possible.
#[derive(Debug, Clone, PartialEq)]
pub struct PrometheusMetric {
    /// The metric name (e.g., "vitastor_pool_info").
    pub name: &'static str,
    /// The type of this metric (counter or gauge).
    pub metric_type: MetricType,
    /// Human-readable description shown in Prometheus UI.
    pub help: &'static str,
    /// Key-value label pairs for this metric instance.
    pub labels: Vec<(&'static str, Cow<'static, str>)>,
    /// The numeric value of this metric.
    pub value: f64,
}

impl PrometheusMetric {
    /// Creates a new metric with the given name, type, help text, and value.
    #[inline]
    pub const fn new(name: &'static str, metric_type: MetricType, help: &'static str, value: f64) -> Self {
        Self {
            name,
            metric_type,
            help,
            labels: Vec::new(),
            value,
        }
    }

    /// Creates a new sample of the family described by `desc`.
    #[inline]
    pub const fn from_descriptor(desc: &MetricDescriptor, value: f64) -> Self {
        Self::new(desc.name, desc.metric_type, desc.help, value)
    }

    /// Adds a single label to this metric.
    #[inline]
    pub fn with_label(mut self, key: &'static str, value: impl Into<Cow<'static, str>>) -> Self {
        self.labels.push((key, value.into()));
        self
    }

    /// Returns the value of label `key`, if set.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_ref())
    }
}

/// Render metrics in Prometheus text exposition format
pub fn render_metrics(metrics: &[PrometheusMetric]) -> String {
    let mut order: Vec<&'static str> = Vec::new();
    let mut families: HashMap<&'static str, Vec<&PrometheusMetric>> = HashMap::new();
    for metric in metrics {
        families
            .entry(metric.name)
            .or_insert_with(|| {
                order.push(metric.name);
                Vec::new()
            })
            .push(metric);
    }

    let mut output = String::new();
    for name in order {
        let Some(samples) = families.get(name) else {
            continue;
        };
        let head = samples[0];
        let _ = writeln!(output, "# HELP {} {}", head.name, escape_help(head.help));
        let _ = writeln!(output, "# TYPE {} {}", head.name, head.metric_type.as_str());

        for metric in samples {
            if metric.labels.is_empty() {
                let _ = writeln!(output, "{} {}", metric.name, format_value(metric.value));
            } else {
                let labels: Vec<String> = metric
                    .labels
                    .iter()
                    .map(|(k, v)| format!("{}=\"{}\"", k, escape_label_value(v)))
                    .collect();
                let _ = writeln!(output, "{}{{{}}} {}", metric.name, labels.join(","), format_value(metric.value));
            }
        }
    }

    output
}

/// Escape label values for the exposition format
fn escape_label_value(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Escape help text
fn escape_help(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Format float value for Prometheus
fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        if v.is_sign_positive() { "+Inf" } else { "-Inf" }.to_string()
    } else if v.fract() == 0.0 {
        format!("{:.0}", v)
    } else {
        format!("{}", v)
    }
}
