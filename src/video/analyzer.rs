// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Video analyzer trait definition

use async_trait::async_trait;

use super::types::VideoAnalysisResult;
use crate::gcp::GcpError;

/// Extracts labels, shots and speech from a stored video
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoAnalyzer: Send + Sync {
    /// Analyze the video at `gcs_uri` (gs://bucket/object)
    async fn analyze(&self, gcs_uri: &str) -> Result<VideoAnalysisResult, GcpError>;
}
