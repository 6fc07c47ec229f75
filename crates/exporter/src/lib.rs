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

//! Prometheus exporter for Vitastor clusters.
//!
//! Collectors read the JSON documents a Vitastor cluster keeps in etcd and
//! translate them into Prometheus samples on every scrape:
//!
//! - [`collectors::PoolCollector`]: pool topology and capacity
//! - [`collectors::OsdCollector`]: OSD liveness, capacity and op counters
//! - [`collectors::MonitorCollector`]: monitor membership and leadership
//! - [`collectors::ImageCollector`]: per-image usage and I/O
//! - [`collectors::GlobalStatsCollector`]: cluster-wide stats and object health

pub mod collectors;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod server;
pub mod store;
pub mod version;

pub use collectors::register_collectors;
pub use error::AppError;
