// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Types stored in and returned from the vector index

use serde::{Deserialize, Serialize};

use crate::video::{Label, Scene, VideoAnalysisResult};

/// Metadata attached to a video's datapoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub video_id: String,
    pub gcs_uri: String,
    pub labels: Vec<Label>,
    pub scenes: Vec<Scene>,
    pub transcript: String,
}

impl VideoMetadata {
    pub fn from_analysis(video_id: &str, gcs_uri: &str, analysis: VideoAnalysisResult) -> Self {
        Self {
            video_id: video_id.to_string(),
            gcs_uri: gcs_uri.to_string(),
            labels: analysis.labels,
            scenes: analysis.scenes,
            transcript: analysis.transcript,
        }
    }
}

/// One nearest-neighbor match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub video_id: String,
    /// Distance reported by the index
    pub score: f64,
    /// Metadata as stored with the datapoint, `null` when the index returns none
    pub metadata: serde_json::Value,
}
