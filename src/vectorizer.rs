// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Video ingestion and search pipeline
//!
//! `process_video` runs analyze → summarize → embed → index for one video;
//! `search` embeds a text query and looks up its nearest videos. Each step is
//! a single call to an external service; nothing is retried or cached.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::ServiceConfig;
use crate::embeddings::{TextEmbedder, VertexEmbeddingClient};
use crate::gcp::{self, GcpError};
use crate::vector::{SearchResult, VectorIndex, VertexVectorIndex, VideoMetadata};
use crate::video::{VideoAnalysisResult, VideoAnalyzer, VideoIntelligenceClient};

/// Pipeline failures, tagged with the stage that failed
#[derive(Debug, Error)]
pub enum VectorizerError {
    #[error("Video analysis failed: {0}")]
    Analysis(#[source] GcpError),

    #[error("Embedding generation failed: {0}")]
    Embedding(#[source] GcpError),

    #[error("Vector upsert failed: {0}")]
    Indexing(#[source] GcpError),

    #[error("Vector search failed: {0}")]
    Search(#[source] GcpError),
}

/// Result record of processing one video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ProcessOutcome {
    Success {
        video_id: String,
        metadata: VideoMetadata,
    },
    Error {
        video_id: String,
        error: String,
    },
}

/// Orchestrates the analysis, embedding and index services
pub struct VideoVectorizer {
    analyzer: Arc<dyn VideoAnalyzer>,
    embedder: Arc<dyn TextEmbedder>,
    index: Arc<dyn VectorIndex>,
}

impl VideoVectorizer {
    pub fn new(
        analyzer: Arc<dyn VideoAnalyzer>,
        embedder: Arc<dyn TextEmbedder>,
        index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            analyzer,
            embedder,
            index,
        }
    }

    /// Build the Google Cloud clients described by `config`
    pub fn from_config(config: &ServiceConfig) -> Result<Self, GcpError> {
        let tokens = gcp::token_provider(config.access_token.as_deref())?;
        info!("Using {} access tokens", tokens.name());

        let analyzer = VideoIntelligenceClient::new(tokens.clone(), config.video_intelligence())?;
        let embedder = VertexEmbeddingClient::new(
            tokens.clone(),
            &config.project_id,
            &config.location,
            &config.embedding_model,
        )?;
        info!("Embedding model: {}", embedder.model());

        let index = VertexVectorIndex::new(
            tokens,
            &config.project_id,
            &config.location,
            &config.vector_index_id,
            config.index_endpoint.clone(),
        )?;
        if !index.can_query() {
            warn!(
                "VECTOR_INDEX_ENDPOINT_ID/DEPLOYED_INDEX_ID not set; \
                 /search will fail until configured"
            );
        }

        Ok(Self::new(
            Arc::new(analyzer),
            Arc::new(embedder),
            Arc::new(index),
        ))
    }

    pub async fn analyze_video(
        &self,
        gcs_uri: &str,
    ) -> Result<VideoAnalysisResult, VectorizerError> {
        self.analyzer
            .analyze(gcs_uri)
            .await
            .map_err(VectorizerError::Analysis)
    }

    pub async fn generate_embeddings(&self, text: &str) -> Result<Vec<f32>, VectorizerError> {
        self.embedder
            .embed(text)
            .await
            .map_err(VectorizerError::Embedding)
    }

    /// Upsert the embedding under `metadata.video_id`
    pub async fn store_vectors(
        &self,
        embedding: &[f32],
        metadata: &VideoMetadata,
    ) -> Result<(), VectorizerError> {
        self.index
            .upsert(&metadata.video_id, embedding, metadata)
            .await
            .map_err(VectorizerError::Indexing)
    }

    pub async fn search_videos(
        &self,
        query_embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchResult>, VectorizerError> {
        self.index
            .find_neighbors(query_embedding, limit)
            .await
            .map_err(VectorizerError::Search)
    }

    /// Embed `query` and return up to `limit` matching videos
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchResult>, VectorizerError> {
        let embedding = self.generate_embeddings(query).await?;
        self.search_videos(&embedding, limit).await
    }

    /// Run the full ingestion pipeline for one video
    ///
    /// Failures are logged and reported in the returned record rather than
    /// propagated.
    pub async fn process_video(&self, gcs_uri: &str, video_id: &str) -> ProcessOutcome {
        match self.run_pipeline(gcs_uri, video_id).await {
            Ok(metadata) => {
                info!("Processed video {} ({})", video_id, gcs_uri);
                ProcessOutcome::Success {
                    video_id: video_id.to_string(),
                    metadata,
                }
            }
            Err(e) => {
                error!("Error processing video {}: {}", video_id, e);
                ProcessOutcome::Error {
                    video_id: video_id.to_string(),
                    error: e.to_string(),
                }
            }
        }
    }

    async fn run_pipeline(
        &self,
        gcs_uri: &str,
        video_id: &str,
    ) -> Result<VideoMetadata, VectorizerError> {
        let analysis = self.analyze_video(gcs_uri).await?;
        let search_text = analysis.search_text();
        let embedding = self.generate_embeddings(&search_text).await?;
        let metadata = VideoMetadata::from_analysis(video_id, gcs_uri, analysis);
        self.store_vectors(&embedding, &metadata).await?;
        Ok(metadata)
    }
}
