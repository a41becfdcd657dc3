// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Video analysis result types

use serde::{Deserialize, Serialize};

/// A label detected somewhere in the video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Entity description, e.g. "cat"
    pub description: String,
    /// Detection confidence in [0, 1]
    pub confidence: f32,
}

/// A shot boundary, offsets in seconds from the start of the video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub start_time: f64,
    pub end_time: f64,
}

/// Labels, shots and speech extracted from one video
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoAnalysisResult {
    pub labels: Vec<Label>,
    pub scenes: Vec<Scene>,
    /// Every transcript alternative, each followed by a single space
    pub transcript: String,
}

impl VideoAnalysisResult {
    /// Text that represents the video for embedding: label descriptions, then transcript
    pub fn search_text(&self) -> String {
        let labels = self
            .labels
            .iter()
            .map(|label| label.description.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        format!("{} {}", labels, self.transcript)
    }
}
