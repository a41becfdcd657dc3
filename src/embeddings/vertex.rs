// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vertex AI text embedding client (`publishers/google/models/*:predict`)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::TextEmbedder;
use crate::gcp::{AccessTokenProvider, GcpError, GoogleApiClient};

const SERVICE: &str = "Vertex AI embeddings";

/// Default embedding model
pub const DEFAULT_EMBEDDING_MODEL: &str = "textembedding-gecko@001";

pub struct VertexEmbeddingClient {
    api: GoogleApiClient,
    predict_url: String,
    model: String,
}

impl VertexEmbeddingClient {
    /// Create a client for `model` in the given project and region
    pub fn new(
        tokens: Arc<dyn AccessTokenProvider>,
        project_id: &str,
        location: &str,
        model: &str,
    ) -> Result<Self, GcpError> {
        let api = GoogleApiClient::new(SERVICE, tokens, Duration::from_secs(30))?;
        Ok(Self {
            api,
            predict_url: predict_url(project_id, location, model),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

fn predict_url(project_id: &str, location: &str, model: &str) -> String {
    format!(
        "https://{location}-aiplatform.googleapis.com/v1/projects/{project_id}/locations/{location}/publishers/google/models/{model}:predict"
    )
}

#[async_trait]
impl TextEmbedder for VertexEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, GcpError> {
        let request = PredictRequest {
            instances: vec![EmbeddingInstance { content: text }],
        };

        let response: PredictResponse = self.api.post_json(&self.predict_url, &request).await?;
        let values = response.into_values()?;
        debug!(
            "Generated {}-dimensional embedding with {}",
            values.len(),
            self.model
        );
        Ok(values)
    }
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    instances: Vec<EmbeddingInstance<'a>>,
}

#[derive(Debug, Serialize)]
struct EmbeddingInstance<'a> {
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

impl PredictResponse {
    fn into_values(self) -> Result<Vec<f32>, GcpError> {
        let prediction = self
            .predictions
            .into_iter()
            .next()
            .ok_or_else(|| GcpError::UnexpectedResponse {
                service: SERVICE,
                message: "no predictions returned".to_string(),
            })?;

        if prediction.embeddings.values.is_empty() {
            return Err(GcpError::UnexpectedResponse {
                service: SERVICE,
                message: "prediction contained an empty embedding".to_string(),
            });
        }
        Ok(prediction.embeddings.values)
    }
}

#[derive(Debug, Deserialize)]
struct Prediction {
    embeddings: EmbeddingValues,
}

#[derive(Debug, Deserialize)]
struct EmbeddingValues {
    #[serde(default)]
    values: Vec<f32>,
}
