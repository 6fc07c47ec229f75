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

use crate::MetricType;

/// MetricDescriptor - Static description of one metric family.
///
/// Descriptors are compile-time constants owned by the collector that emits
/// the family. They are handed to the [`Registry`](crate::Registry) once at
/// startup so it can reject two collectors claiming the same family name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDescriptor {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub help: &'static str,
    pub variable_labels: &'static [&'static str],
}

impl MetricDescriptor {
    /// Create a new metric descriptor
    pub const fn new(
        name: &'static str,
        metric_type: MetricType,
        help: &'static str,
        variable_labels: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            metric_type,
            help,
            variable_labels,
        }
    }

    /// check whether the label is declared for this family
    pub fn has_label(&self, label: &str) -> bool {
        self.variable_labels.iter().any(|l| *l == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESC: MetricDescriptor = MetricDescriptor::new(
        "vitastor_pool_used_raw_tb",
        MetricType::Gauge,
        "Raw used space of pool in TB",
        &["pool_name", "pool_id"],
    );

    #[test]
    fn test_has_label() {
        assert!(DESC.has_label("pool_id"));
        assert!(!DESC.has_label("osd_num"));
    }
}
