// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process-video endpoint handler

use axum::{extract::State, Json};
use tracing::{info, warn};

use super::request::ProcessVideoRequest;
use super::response::ProcessVideoResponse;
use crate::api::extract::JsonBody;
use crate::api::http_server::AppState;
use crate::api::ApiError;
use crate::vectorizer::ProcessOutcome;

/// POST /process-video - Analyze, embed and index one video
///
/// # Request
/// - `gcsUri`: Cloud Storage URI of the video (required, `gs://` scheme)
/// - `videoId`: Unique id for the video (required)
///
/// # Response
/// - `status`: "success"
/// - `video_id`: Echo of `videoId`
/// - `metadata`: Labels, scenes and transcript stored with the embedding
///
/// # Errors
/// - 400 Bad Request: Wrong content type, missing or malformed fields
/// - 500 Internal Server Error: Any downstream failure
pub async fn process_video_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Json<ProcessVideoResponse>, ApiError> {
    let request = ProcessVideoRequest::from_json(body).map_err(|e| {
        warn!("Process-video validation failed: {}", e);
        e
    })?;

    info!(
        "Process-video request: {} ({})",
        request.video_id, request.gcs_uri
    );

    match state
        .vectorizer
        .process_video(&request.gcs_uri, &request.video_id)
        .await
    {
        ProcessOutcome::Success { video_id, metadata } => {
            Ok(Json(ProcessVideoResponse::success(video_id, metadata)))
        }
        ProcessOutcome::Error { error, .. } => Err(ApiError::InternalError(format!(
            "Error processing video: {}",
            error
        ))),
    }
}
