// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search API endpoint handler

use axum::{extract::State, Json};
use tracing::{debug, error, info, warn};

use super::request::SearchApiRequest;
use super::response::SearchApiResponse;
use crate::api::extract::JsonBody;
use crate::api::http_server::AppState;
use crate::api::ApiError;

/// POST /search - Find videos matching a text query
///
/// # Request
/// - `query`: Search query string (required)
/// - `limit`: Number of results (1..=MAX_SEARCH_LIMIT, default 5)
///
/// # Response
/// - `status`: "success"
/// - `query`: Original search query
/// - `results`: Array of `{video_id, score, metadata}`
///
/// # Errors
/// - 400 Bad Request: Wrong content type, missing query or invalid limit
/// - 500 Internal Server Error: Embedding or index lookup failed
pub async fn search_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Json<SearchApiResponse>, ApiError> {
    let request = SearchApiRequest::from_json(body, state.max_search_limit).map_err(|e| {
        warn!("Search validation failed: {}", e);
        e
    })?;

    debug!("Search request: {:?} (limit {})", request.query, request.limit);

    let results = state
        .vectorizer
        .search(&request.query, request.limit)
        .await
        .map_err(|e| {
            error!("Search failed for '{}': {}", request.query, e);
            ApiError::InternalError(format!("Unexpected error: {}", e))
        })?;

    info!(
        "Search complete: {} results for '{}'",
        results.len(),
        request.query
    );

    Ok(Json(SearchApiResponse::new(request.query, results)))
}
