// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the video vectorizer service

/// Semantic version number
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Service name reported in logs
pub const SERVICE_NAME: &str = env!("CARGO_PKG_NAME");

/// Downstream capabilities this build talks to
pub const FEATURES: &[&str] = &[
    "video-intelligence-analysis",
    "vertex-text-embeddings",
    "vector-search-upsert",
    "vector-search-find-neighbors",
];
