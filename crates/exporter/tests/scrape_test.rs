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

//! End-to-end scrapes of a fixture cluster through the HTTP router.

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use std::sync::Arc;
use tower::ServiceExt;
use vitastor_exporter::register_collectors;
use vitastor_exporter::server::{AppState, router};
use vitastor_exporter::store::{KeyLayout, MemoryStore};
use vitastor_metrics::{Registry, TEXT_CONTENT_TYPE};

fn cluster() -> MemoryStore {
    MemoryStore::new()
        .with(
            "/vitastor/config/pools",
            r#"{"1": {"name": "pool1", "scheme": "replicated", "pg_size": 3, "pg_minsize": 2, "pg_count": 32, "failure_domain": "host"}}"#,
        )
        .with(
            "/vitastor/pool/stats/1",
            r#"{"used_raw_tb": 1.5, "total_raw_tb": 10.0, "raw_to_usable": 3.0, "space_efficiency": 0.9}"#,
        )
        .with("/vitastor/osd/state/1", r#"{"state": "up", "host": "node1", "port": 46131}"#)
        .with(
            "/vitastor/osd/stats/1",
            r#"{"host": "node1", "size": 1099511627776, "free": 549755813888,
                "op_stats": {"primary_write": {"count": 10, "usec": 500, "bytes": 40960}}}"#,
        )
        .with(
            "/vitastor/osd/stats/2",
            r#"{"host": "node2", "op_stats": {"read": {"bytes": 1024, "count": 10, "usec": 500}}}"#,
        )
        .with("/vitastor/mon/master", r#"{"id": "1001"}"#)
        .with("/vitastor/mon/member/1001", r#"{"hostname": "mon1", "ip": ["10.0.0.1"]}"#)
        .with("/vitastor/mon/member/1002", r#"{"hostname": "mon2", "ip": ["10.0.0.2"]}"#)
        .with(
            "/vitastor/inode/stats/1/1",
            r#"{"raw_used": 3221225472, "write": {"count": 4, "usec": 80, "bytes": 16384, "bps": 0, "iops": 0, "lat": 20}}"#,
        )
        .with(
            "/vitastor/stats",
            r#"{"op_stats": {"primary_write": {"count": 100, "usec": 1000, "bytes": 409600, "bps": 4096, "iops": 1, "lat": 10}},
                "object_counts": {"object": 10, "clean": 10, "misplaced": 0, "degraded": 0, "incomplete": 0}}"#,
        )
}

fn app(store: MemoryStore) -> axum::Router {
    let mut registry = Registry::new();
    register_collectors(&mut registry, Arc::new(store), KeyLayout::default()).unwrap();
    router(AppState::new(registry), "/metrics")
}

async fn scrape(app: axum::Router) -> String {
    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], TEXT_CONTENT_TYPE);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

#[tokio::test]
async fn test_full_scrape() {
    let body = scrape(app(cluster())).await;

    let expected_lines = [
        r#"vitastor_pool_info{pool_name="pool1",pool_id="1",pool_scheme="replicated",pg_size="3",parity_chunks="0",pg_minsize="2",pg_count="32",failure_domain="host"} 1"#,
        r#"vitastor_pool_used_raw_tb{pool_name="pool1",pool_id="1"} 1.5"#,
        r#"vitastor_pool_space_efficiency{pool_name="pool1",pool_id="1"} 0.9"#,
        r#"vitastor_osd_status{osd_num="1",host="node1",port="46131"} 1"#,
        r#"vitastor_osd_status{osd_num="2",host="node2",port="unknown"} 0"#,
        r#"vitastor_osd_size_bytes{osd_num="1"} 1099511627776"#,
        r#"vitastor_osd_stat_bytes{osd_num="2",stat_type="op",stat_name="read"} 1024"#,
        r#"vitastor_monitor_info{monitor_id="/vitastor/mon/member/1001",monitor_hostname="mon1",monitor_ip="10.0.0.1"} 1"#,
        r#"vitastor_monitor_info{monitor_id="/vitastor/mon/member/1002",monitor_hostname="mon2",monitor_ip="10.0.0.2"} 0"#,
        r#"vitastor_image_raw_used{pool_id="1",image_num="1"} 3221225472"#,
        r#"vitastor_image_write{pool_id="1",image_num="1",stat_name="usecs"} 80"#,
        r#"vitastor_global_stat_bps{stat_type="op",stat_name="primary_write"} 4096"#,
        r#"vitastor_global_object_count{object_type="total"} 10"#,
        "# TYPE vitastor_osd_stat_count counter",
        "# TYPE vitastor_pool_info gauge",
        "# HELP vitastor_monitor_info Monitor info, 1 is master, 0 is standby",
    ];
    for line in expected_lines {
        assert!(body.lines().any(|l| l == line), "missing line {line}\n{body}");
    }
    assert!(body.contains("vitastor_exporter_build_info{"));
    assert!(!body.contains("process_"));
}

#[tokio::test]
async fn test_families_render_in_gather_order() {
    let body = scrape(app(cluster())).await;
    let families: Vec<&str> = body
        .lines()
        .filter_map(|l| l.strip_prefix("# TYPE "))
        .filter_map(|l| l.split(' ').next())
        .collect();

    let position = |name: &str| families.iter().position(|f| *f == name).unwrap();
    assert!(position("vitastor_pool_info") < position("vitastor_osd_status"));
    assert!(position("vitastor_osd_status") < position("vitastor_monitor_info"));
    assert!(position("vitastor_monitor_info") < position("vitastor_image_raw_used"));
    assert!(position("vitastor_image_raw_used") < position("vitastor_global_stat_count"));
    assert_eq!(families.last(), Some(&"vitastor_exporter_build_info"));

    let mut unique = families.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), families.len(), "every family is rendered once");
}

#[tokio::test]
async fn test_repeated_scrapes_are_identical_and_release_sessions() {
    let store = cluster();
    let app = app(store.clone());

    let first = scrape(app.clone()).await;
    let second = scrape(app).await;
    assert_eq!(first, second);
    // five store-backed collectors per scrape
    assert_eq!(store.opened_total(), 10);
    assert_eq!(store.open_sessions(), 0);
}

#[tokio::test]
async fn test_failing_subtree_only_drops_its_collector() {
    let body = scrape(app(cluster().failing_reads_under("/vitastor/osd/"))).await;

    assert!(!body.contains("vitastor_osd_"));
    assert!(body.contains("vitastor_pool_info{"));
    assert!(body.contains("vitastor_monitor_info{"));
    assert!(body.contains("vitastor_global_stat_count{"));
}

#[tokio::test]
async fn test_unreachable_store_still_answers() {
    let body = scrape(app(cluster().failing_connect())).await;

    let samples: Vec<&str> = body.lines().filter(|l| !l.starts_with('#')).collect();
    assert_eq!(samples.len(), 1);
    assert!(samples[0].starts_with("vitastor_exporter_build_info{"));
}

#[tokio::test]
async fn test_custom_metrics_path_and_health() {
    let mut registry = Registry::new();
    register_collectors(&mut registry, Arc::new(cluster()), KeyLayout::default()).unwrap();
    let app = router(AppState::new(registry), "/vitastor/metrics");

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/vitastor/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(doc["collectors"][0], "pool");
    assert_eq!(doc["collectors"].as_array().map(Vec::len), Some(6));
}
