// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search API response types

use serde::{Deserialize, Serialize};

use crate::vector::SearchResult;

/// Response body for POST /search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchApiResponse {
    /// Always "success"
    pub status: String,
    /// The search query as submitted
    pub query: String,
    /// Matches, closest first
    pub results: Vec<SearchResult>,
}

impl SearchApiResponse {
    pub fn new(query: String, results: Vec<SearchResult>) -> Self {
        Self {
            status: "success".to_string(),
            query,
            results,
        }
    }
}
