// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared fixtures for the API tests: in-memory stand-ins for the cloud services

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt;
use video_vectorizer::{
    api::{create_app, AppState},
    embeddings::TextEmbedder,
    gcp::GcpError,
    vector::{SearchResult, VectorIndex, VideoMetadata},
    video::{Label, Scene, VideoAnalysisResult, VideoAnalyzer},
    VideoVectorizer,
};

pub struct StubAnalyzer {
    pub fail_with: Option<String>,
}

#[async_trait]
impl VideoAnalyzer for StubAnalyzer {
    async fn analyze(&self, _gcs_uri: &str) -> Result<VideoAnalysisResult, GcpError> {
        if let Some(message) = &self.fail_with {
            return Err(GcpError::Api {
                service: "Video Intelligence",
                status: 403,
                message: message.clone(),
            });
        }
        Ok(VideoAnalysisResult {
            labels: vec![Label {
                description: "cat".to_string(),
                confidence: 0.92,
            }],
            scenes: vec![Scene {
                start_time: 0.0,
                end_time: 3.5,
            }],
            transcript: "meow ".to_string(),
        })
    }
}

#[derive(Default)]
pub struct StubEmbedder {
    pub texts: Mutex<Vec<String>>,
}

#[async_trait]
impl TextEmbedder for StubEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, GcpError> {
        self.texts.lock().unwrap().push(text.to_string());
        Ok(vec![0.25, 0.5, 0.75])
    }
}

#[derive(Default)]
pub struct StubIndex {
    pub upserts: Mutex<Vec<(String, VideoMetadata)>>,
    pub limits: Mutex<Vec<usize>>,
    pub fail_search: bool,
}

#[async_trait]
impl VectorIndex for StubIndex {
    async fn upsert(
        &self,
        id: &str,
        _embedding: &[f32],
        metadata: &VideoMetadata,
    ) -> Result<(), GcpError> {
        self.upserts
            .lock()
            .unwrap()
            .push((id.to_string(), metadata.clone()));
        Ok(())
    }

    async fn find_neighbors(
        &self,
        _embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchResult>, GcpError> {
        self.limits.lock().unwrap().push(limit);
        if self.fail_search {
            return Err(GcpError::NotConfigured(
                "Vector search index endpoint".to_string(),
            ));
        }
        Ok(vec![SearchResult {
            video_id: "cat-1".to_string(),
            score: 0.91,
            metadata: serde_json::json!({"video_id": "cat-1", "gcs_uri": "gs://videos/cat.mp4"}),
        }])
    }
}

/// Test harness holding the router and the stubs behind it
pub struct TestApp {
    pub router: Router,
    pub embedder: Arc<StubEmbedder>,
    pub index: Arc<StubIndex>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::build(None, false)
    }

    pub fn with_failing_analysis(message: &str) -> Self {
        Self::build(Some(message.to_string()), false)
    }

    pub fn with_failing_search() -> Self {
        Self::build(None, true)
    }

    fn build(analysis_error: Option<String>, fail_search: bool) -> Self {
        let embedder = Arc::new(StubEmbedder::default());
        let index = Arc::new(StubIndex {
            fail_search,
            ..Default::default()
        });
        let vectorizer = VideoVectorizer::new(
            Arc::new(StubAnalyzer {
                fail_with: analysis_error,
            }),
            embedder.clone(),
            index.clone(),
        );
        let router = create_app(AppState::new(Arc::new(vectorizer), 100));

        Self {
            router,
            embedder,
            index,
        }
    }

    pub async fn post_json(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }
}
