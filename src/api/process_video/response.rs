// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process-video response type

use serde::{Deserialize, Serialize};

use crate::vector::VideoMetadata;

/// Response body for a successful POST /process-video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessVideoResponse {
    /// Always "success"
    pub status: String,
    pub video_id: String,
    /// Metadata stored alongside the video's embedding
    pub metadata: VideoMetadata,
}

impl ProcessVideoResponse {
    pub fn success(video_id: String, metadata: VideoMetadata) -> Self {
        Self {
            status: "success".to_string(),
            video_id,
            metadata,
        }
    }
}
