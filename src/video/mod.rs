// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Video content analysis
//!
//! Wraps the Video Intelligence API behind the [`VideoAnalyzer`] trait so the
//! pipeline can be exercised without cloud access.

pub mod analyzer;
pub mod intelligence;
pub mod types;

pub use analyzer::VideoAnalyzer;
pub use intelligence::{VideoIntelligenceClient, VideoIntelligenceConfig};
pub use types::{Label, Scene, VideoAnalysisResult};
