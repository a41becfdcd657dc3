// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process-video request type

use serde::Deserialize;
use serde_json::Value;

use crate::api::ApiError;

const MISSING_PARAMETERS: &str =
    "Missing required parameters. 'gcsUri' and 'videoId' are required.";

/// Body of POST /process-video as sent by the client
///
/// # Example
/// ```json
/// {
///   "gcsUri": "gs://bucket-name/video.mp4",
///   "videoId": "unique-video-id"
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessVideoBody {
    pub gcs_uri: Option<Value>,
    pub video_id: Option<Value>,
}

impl ProcessVideoBody {
    /// Validate the body
    ///
    /// # Validation Rules
    /// 1. Both `gcsUri` and `videoId` must be present and non-null
    /// 2. Both fields must be strings, `videoId` not blank
    /// 3. `gcsUri` must look like `gs://<bucket>/<object>`
    pub fn validate(&self) -> Result<ProcessVideoRequest, ApiError> {
        let (Some(gcs_uri), Some(video_id)) = (&self.gcs_uri, &self.video_id) else {
            return Err(ApiError::InvalidRequest(MISSING_PARAMETERS.to_string()));
        };

        let gcs_uri = string_field("gcsUri", gcs_uri)?;
        let video_id = string_field("videoId", video_id)?;

        validate_gcs_uri(gcs_uri)?;
        if video_id.trim().is_empty() {
            return Err(ApiError::InvalidRequest(
                "'videoId' cannot be empty".to_string(),
            ));
        }

        Ok(ProcessVideoRequest {
            gcs_uri: gcs_uri.to_string(),
            video_id: video_id.to_string(),
        })
    }
}

/// Validated process-video request
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessVideoRequest {
    /// Location of the source video
    pub gcs_uri: String,
    /// Caller-chosen unique id; becomes the datapoint id
    pub video_id: String,
}

impl ProcessVideoRequest {
    /// Decode and validate a JSON body
    pub fn from_json(body: Value) -> Result<Self, ApiError> {
        if !body.is_object() {
            return Err(ApiError::InvalidRequest(MISSING_PARAMETERS.to_string()));
        }
        let body: ProcessVideoBody = serde_json::from_value(body)
            .map_err(|_| ApiError::InvalidRequest(MISSING_PARAMETERS.to_string()))?;
        body.validate()
    }
}

fn string_field<'a>(name: &str, value: &'a Value) -> Result<&'a str, ApiError> {
    value
        .as_str()
        .ok_or_else(|| ApiError::InvalidRequest(format!("'{}' must be a string", name)))
}

/// Check that `uri` names an object in a Cloud Storage bucket
pub fn validate_gcs_uri(uri: &str) -> Result<(), ApiError> {
    let Some(path) = uri.strip_prefix("gs://") else {
        return Err(ApiError::InvalidRequest(
            "Invalid gcsUri format. Must start with 'gs://'".to_string(),
        ));
    };

    match path.split_once('/') {
        Some((bucket, object)) if !bucket.is_empty() && !object.is_empty() => Ok(()),
        _ => Err(ApiError::InvalidRequest(
            "Invalid gcsUri format. Expected 'gs://<bucket>/<object>'".to_string(),
        )),
    }
}
