// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /process-video endpoint tests

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use serde_json::json;

use super::support::TestApp;

#[tokio::test]
async fn test_process_video_success() {
    let app = TestApp::new();
    let (status, body) = app
        .post_json(
            "/process-video",
            r#"{"gcsUri": "gs://videos/cat.mp4", "videoId": "cat-1"}"#,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["video_id"], "cat-1");
    assert_eq!(body["metadata"]["gcs_uri"], "gs://videos/cat.mp4");
    assert_eq!(body["metadata"]["labels"][0]["description"], "cat");
    assert_eq!(body["metadata"]["scenes"][0]["end_time"], 3.5);
    assert_eq!(body["metadata"]["transcript"], "meow ");

    // Label descriptions and transcript are what gets embedded
    assert_eq!(*app.embedder.texts.lock().unwrap(), vec!["cat meow ".to_string()]);

    let upserts = app.index.upserts.lock().unwrap();
    assert_eq!(upserts.len(), 1);
    assert_eq!(upserts[0].0, "cat-1");
    assert_eq!(upserts[0].1.video_id, "cat-1");
}

#[tokio::test]
async fn test_missing_video_id_is_400() {
    let app = TestApp::new();
    let (status, body) = app
        .post_json("/process-video", r#"{"gcsUri": "gs://videos/cat.mp4"}"#)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"error": "Missing required parameters. 'gcsUri' and 'videoId' are required."})
    );
    assert!(app.index.upserts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_non_gs_uri_is_400() {
    let app = TestApp::new();
    let (status, body) = app
        .post_json(
            "/process-video",
            r#"{"gcsUri": "s3://videos/cat.mp4", "videoId": "cat-1"}"#,
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid gcsUri format. Must start with 'gs://'");
}

#[tokio::test]
async fn test_missing_content_type_is_400() {
    let app = TestApp::new();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/process-video")
        .body(Body::from(
            r#"{"gcsUri": "gs://videos/cat.mp4", "videoId": "cat-1"}"#,
        ))
        .unwrap();

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Content-Type must be application/json");
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = TestApp::new();
    let (status, body) = app.post_json("/process-video", "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid JSON body"));
}

#[tokio::test]
async fn test_analysis_failure_is_500() {
    let app = TestApp::with_failing_analysis("caller lacks storage.objects.get");
    let (status, body) = app
        .post_json(
            "/process-video",
            r#"{"gcsUri": "gs://private/cat.mp4", "videoId": "cat-1"}"#,
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Error processing video: "));
    assert!(message.contains("caller lacks storage.objects.get"));
    assert!(app.embedder.texts.lock().unwrap().is_empty());
    assert!(app.index.upserts.lock().unwrap().is_empty());
}
