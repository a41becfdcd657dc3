// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Google Cloud Video Intelligence client
//!
//! Starts a `videos:annotate` long-running operation with label detection,
//! shot change detection and speech transcription, then polls it until it
//! finishes or the analysis deadline passes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::analyzer::VideoAnalyzer;
use super::types::{Label, Scene, VideoAnalysisResult};
use crate::gcp::{AccessTokenProvider, GcpError, GoogleApiClient};

const VIDEO_INTELLIGENCE_URL: &str = "https://videointelligence.googleapis.com/v1";
const SERVICE: &str = "Video Intelligence";

const FEATURES: [&str; 3] = [
    "LABEL_DETECTION",
    "SHOT_CHANGE_DETECTION",
    "SPEECH_TRANSCRIPTION",
];

/// Settings for [`VideoIntelligenceClient`]
#[derive(Debug, Clone)]
pub struct VideoIntelligenceConfig {
    /// BCP-47 language of the speech track
    pub language_code: String,
    /// Deadline for the whole annotate operation
    pub timeout: Duration,
    /// Delay between operation polls
    pub poll_interval: Duration,
}

impl Default for VideoIntelligenceConfig {
    fn default() -> Self {
        Self {
            language_code: "ja-JP".to_string(),
            timeout: Duration::from_secs(600),
            poll_interval: Duration::from_secs(5),
        }
    }
}

pub struct VideoIntelligenceClient {
    api: GoogleApiClient,
    config: VideoIntelligenceConfig,
    base_url: String,
}

impl VideoIntelligenceClient {
    pub fn new(
        tokens: Arc<dyn AccessTokenProvider>,
        config: VideoIntelligenceConfig,
    ) -> Result<Self, GcpError> {
        Self::with_base_url(tokens, config, VIDEO_INTELLIGENCE_URL)
    }

    /// Create a client against a non-default API root (e.g. a regional or test endpoint)
    pub fn with_base_url(
        tokens: Arc<dyn AccessTokenProvider>,
        config: VideoIntelligenceConfig,
        base_url: &str,
    ) -> Result<Self, GcpError> {
        let api = GoogleApiClient::new(SERVICE, tokens, Duration::from_secs(60))?;
        Ok(Self {
            api,
            config,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn wait_for(&self, mut operation: Operation) -> Result<Operation, GcpError> {
        let url = format!("{}/{}", self.base_url, operation.name);
        while !operation.done {
            tokio::time::sleep(self.config.poll_interval).await;
            let name = operation.name;
            operation = self.api.get_json(&url).await?;
            if operation.name.is_empty() {
                operation.name = name;
            }
            debug!("Annotate operation {} done={}", operation.name, operation.done);
        }
        Ok(operation)
    }
}

#[async_trait]
impl VideoAnalyzer for VideoIntelligenceClient {
    async fn analyze(&self, gcs_uri: &str) -> Result<VideoAnalysisResult, GcpError> {
        let request = AnnotateVideoRequest {
            input_uri: gcs_uri,
            features: &FEATURES,
            video_context: VideoContext {
                speech_transcription_config: SpeechTranscriptionConfig {
                    language_code: &self.config.language_code,
                    enable_automatic_punctuation: true,
                },
            },
        };

        let url = format!("{}/videos:annotate", self.base_url);
        let operation: Operation = self.api.post_json(&url, &request).await?;
        info!(
            "Processing video analysis for {} (operation {})",
            gcs_uri, operation.name
        );

        let operation = tokio::time::timeout(self.config.timeout, self.wait_for(operation))
            .await
            .map_err(|_| GcpError::Timeout {
                service: SERVICE,
                timeout_secs: self.config.timeout.as_secs(),
            })??;

        operation.into_analysis()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateVideoRequest<'a> {
    input_uri: &'a str,
    features: &'a [&'static str],
    video_context: VideoContext<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoContext<'a> {
    speech_transcription_config: SpeechTranscriptionConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechTranscriptionConfig<'a> {
    language_code: &'a str,
    enable_automatic_punctuation: bool,
}

#[derive(Debug, Deserialize)]
struct Operation {
    #[serde(default)]
    name: String,
    #[serde(default)]
    done: bool,
    error: Option<Status>,
    response: Option<AnnotateVideoResponse>,
}

impl Operation {
    fn into_analysis(self) -> Result<VideoAnalysisResult, GcpError> {
        if let Some(status) = self.error {
            return Err(GcpError::OperationFailed {
                service: SERVICE,
                message: status.describe(),
            });
        }

        let response = self.response.ok_or_else(|| GcpError::UnexpectedResponse {
            service: SERVICE,
            message: "operation finished without a response".to_string(),
        })?;

        parse_annotation(response)
    }
}

#[derive(Debug, Deserialize)]
struct Status {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

impl Status {
    fn describe(&self) -> String {
        format!("{} (code {})", self.message, self.code)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateVideoResponse {
    #[serde(default)]
    annotation_results: Vec<VideoAnnotationResults>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoAnnotationResults {
    #[serde(default)]
    shot_label_annotations: Vec<LabelAnnotation>,
    #[serde(default)]
    shot_annotations: Vec<VideoSegment>,
    #[serde(default)]
    speech_transcriptions: Vec<SpeechTranscription>,
    error: Option<Status>,
}

#[derive(Debug, Deserialize)]
struct LabelAnnotation {
    entity: Option<Entity>,
    #[serde(default)]
    segments: Vec<ConfidenceEntry>,
    #[serde(default)]
    frames: Vec<ConfidenceEntry>,
}

impl LabelAnnotation {
    fn confidence(&self) -> f32 {
        self.segments
            .first()
            .or_else(|| self.frames.first())
            .map(|entry| entry.confidence)
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Deserialize)]
struct Entity {
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ConfidenceEntry {
    #[serde(default)]
    confidence: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoSegment {
    start_time_offset: Option<String>,
    end_time_offset: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SpeechTranscription {
    #[serde(default)]
    alternatives: Vec<SpeechAlternative>,
}

#[derive(Debug, Deserialize)]
struct SpeechAlternative {
    #[serde(default)]
    transcript: String,
}

fn parse_annotation(response: AnnotateVideoResponse) -> Result<VideoAnalysisResult, GcpError> {
    let results = response
        .annotation_results
        .into_iter()
        .next()
        .ok_or_else(|| GcpError::UnexpectedResponse {
            service: SERVICE,
            message: "no annotation results".to_string(),
        })?;

    if let Some(status) = &results.error {
        warn!("Video annotation reported a partial error: {}", status.describe());
    }

    let labels = results
        .shot_label_annotations
        .iter()
        .map(|annotation| Label {
            description: annotation
                .entity
                .as_ref()
                .map(|entity| entity.description.clone())
                .unwrap_or_default(),
            confidence: annotation.confidence(),
        })
        .collect();

    let scenes = results
        .shot_annotations
        .iter()
        .map(|shot| Scene {
            start_time: offset_seconds(shot.start_time_offset.as_deref()),
            end_time: offset_seconds(shot.end_time_offset.as_deref()),
        })
        .collect();

    let mut transcript = String::new();
    for transcription in &results.speech_transcriptions {
        for alternative in &transcription.alternatives {
            transcript.push_str(&alternative.transcript);
            transcript.push(' ');
        }
    }

    Ok(VideoAnalysisResult {
        labels,
        scenes,
        transcript,
    })
}

/// Convert a protobuf JSON duration ("12.480s") to seconds
fn offset_seconds(offset: Option<&str>) -> f64 {
    offset
        .and_then(|value| value.trim().strip_suffix('s'))
        .and_then(|seconds| seconds.parse::<f64>().ok())
        .unwrap_or(0.0)
}
