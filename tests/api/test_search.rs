// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /search endpoint tests

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use serde_json::json;

use super::support::TestApp;

#[tokio::test]
async fn test_search_success() {
    let app = TestApp::new();
    let (status, body) = app
        .post_json("/search", r#"{"query": "cat on a sofa", "limit": 3}"#)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["query"], "cat on a sofa");
    assert_eq!(body["results"][0]["video_id"], "cat-1");
    assert_eq!(body["results"][0]["score"], 0.91);
    assert_eq!(body["results"][0]["metadata"]["gcs_uri"], "gs://videos/cat.mp4");

    assert_eq!(
        *app.embedder.texts.lock().unwrap(),
        vec!["cat on a sofa".to_string()]
    );
    assert_eq!(*app.index.limits.lock().unwrap(), vec![3]);
}

#[tokio::test]
async fn test_search_limit_defaults_to_five() {
    let app = TestApp::new();
    let (status, _) = app.post_json("/search", r#"{"query": "cats"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(*app.index.limits.lock().unwrap(), vec![5]);
}

#[tokio::test]
async fn test_search_without_query_is_400() {
    let app = TestApp::new();
    let (status, body) = app.post_json("/search", r#"{"limit": 2}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Missing required parameter: 'query'"}));
    assert!(app.index.limits.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_invalid_limit_is_400() {
    let app = TestApp::new();
    let (status, body) = app
        .post_json("/search", r#"{"query": "cats", "limit": 0}"#)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "'limit' must be an integer between 1 and 100");
}

#[tokio::test]
async fn test_search_wrong_content_type_is_400() {
    let app = TestApp::new();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/search")
        .header("content-type", "text/plain")
        .body(Body::from(r#"{"query": "cats"}"#))
        .unwrap();

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Content-Type must be application/json");
}

#[tokio::test]
async fn test_search_downstream_failure_is_500() {
    let app = TestApp::with_failing_search();
    let (status, body) = app.post_json("/search", r#"{"query": "cats"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "Unexpected error: Vector search failed: Vector search index endpoint is not configured"
    );
}
