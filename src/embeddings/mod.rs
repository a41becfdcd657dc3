// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text embedding generation

pub mod vertex;

use async_trait::async_trait;

use crate::gcp::GcpError;

pub use vertex::{VertexEmbeddingClient, DEFAULT_EMBEDDING_MODEL};

/// Turns text into a dense vector
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextEmbedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, GcpError>;
}
