// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Routing tests: health, unknown paths and wrong methods

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use serde_json::json;

use super::support::TestApp;

#[tokio::test]
async fn test_health_returns_healthy() {
    let app = TestApp::new();
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy"}));
}

#[tokio::test]
async fn test_health_ignores_downstream_state() {
    let app = TestApp::with_failing_search();
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(app.embedder.texts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let app = TestApp::new();
    let request = Request::builder()
        .uri("/v1/videos")
        .body(Body::empty())
        .unwrap();

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Resource not found"}));
}

#[tokio::test]
async fn test_get_on_post_route_is_405() {
    let app = TestApp::new();
    for uri in ["/process-video", "/search"] {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let (status, body) = app.send(request).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "GET {}", uri);
        assert_eq!(body, json!({"error": "Method not allowed"}));
    }
}

#[tokio::test]
async fn test_post_on_health_is_405() {
    let app = TestApp::new();
    let (status, body) = app.post_json("/health", "{}").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"], "Method not allowed");
}
