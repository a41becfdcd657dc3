// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vector index access
//!
//! The index itself is Vertex AI Vector Search; this module only upserts
//! datapoints and runs nearest-neighbor queries against a deployed index.

pub mod types;
pub mod vertex;

use async_trait::async_trait;

use crate::gcp::GcpError;

pub use types::{SearchResult, VideoMetadata};
pub use vertex::{IndexEndpointConfig, VertexVectorIndex};

/// Storage and nearest-neighbor lookup for video embeddings
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Insert or overwrite the datapoint `id`
    async fn upsert(
        &self,
        id: &str,
        embedding: &[f32],
        metadata: &VideoMetadata,
    ) -> Result<(), GcpError>;

    /// Return up to `limit` datapoints closest to `embedding`, best first
    async fn find_neighbors(
        &self,
        embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchResult>, GcpError>;
}
