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

//! Request handlers.

use super::AppState;
use crate::version;
use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Json},
};
use serde_json::json;
use vitastor_metrics::{TEXT_CONTENT_TYPE, render_metrics};

/// Runs every collector and renders the text exposition format.
///
/// Collector failures only shrink the output, the status stays 200.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let samples = state.registry.gather().await;
    ([(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)], render_metrics(&samples))
}

/// Health check endpoint to verify service availability.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": jiff::Timestamp::now().to_string(),
        "service": "vitastor-exporter",
        "version": version::SHORT_VERSION,
        "collectors": state.registry.collector_names(),
    }))
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}

#[cfg(test)]
mod tests {
    use super::super::{AppState, router};
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;
    use vitastor_metrics::{Registry, TEXT_CONTENT_TYPE};

    fn app() -> axum::Router {
        router(AppState::new(Registry::new()), "/metrics")
    }

    async fn get(uri: &str) -> axum::response::Response {
        app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_empty_registry_renders_empty_body() {
        let response = get("/metrics").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], TEXT_CONTENT_TYPE);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_health() {
        let response = get("/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(doc["status"], "healthy");
        assert_eq!(doc["service"], "vitastor-exporter");
    }

    #[tokio::test]
    async fn test_unknown_path() {
        assert_eq!(get("/").await.status(), StatusCode::NOT_FOUND);
        assert_eq!(get("/metrics/extra").await.status(), StatusCode::NOT_FOUND);
    }
}
