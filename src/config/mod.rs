// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service configuration loaded from environment variables

use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

use crate::embeddings::DEFAULT_EMBEDDING_MODEL;
use crate::vector::IndexEndpointConfig;
use crate::video::VideoIntelligenceConfig;

/// Errors raised while loading configuration
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value '{value}' for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings for the video vectorizer service
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Google Cloud project id
    pub project_id: String,
    /// Region hosting Vertex AI resources
    pub location: String,
    /// Vector Search index that receives upserts
    pub vector_index_id: String,
    /// Deployed index used for queries, if any
    pub index_endpoint: Option<IndexEndpointConfig>,
    /// Vertex AI text embedding model
    pub embedding_model: String,
    /// Language of the speech track passed to transcription
    pub speech_language_code: String,
    /// Deadline for one video analysis
    pub analysis_timeout_secs: u64,
    /// Delay between analysis operation polls
    pub analysis_poll_interval_secs: u64,
    /// Upper bound accepted for the `limit` search parameter
    pub max_search_limit: usize,
    /// Static OAuth2 token; the metadata server is used when absent
    pub access_token: Option<String>,
    /// Bind address
    pub host: String,
    /// Listen port
    pub port: u16,
}

impl ServiceConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let index_endpoint = match (
            get("VECTOR_INDEX_ENDPOINT_ID"),
            get("DEPLOYED_INDEX_ID"),
        ) {
            (Some(endpoint_id), Some(deployed_index_id)) => Some(IndexEndpointConfig {
                endpoint_id,
                deployed_index_id,
                host: get("VECTOR_SEARCH_ENDPOINT_HOST"),
            }),
            (Some(_), None) => return Err(ConfigError::Missing("DEPLOYED_INDEX_ID")),
            (None, Some(_)) => return Err(ConfigError::Missing("VECTOR_INDEX_ENDPOINT_ID")),
            (None, None) => None,
        };

        let config = Self {
            project_id: get("GOOGLE_CLOUD_PROJECT_ID")
                .ok_or(ConfigError::Missing("GOOGLE_CLOUD_PROJECT_ID"))?,
            location: get("GOOGLE_CLOUD_LOCATION").unwrap_or_else(|| "asia-northeast1".to_string()),
            vector_index_id: get("VECTOR_INDEX_ID").ok_or(ConfigError::Missing("VECTOR_INDEX_ID"))?,
            index_endpoint,
            embedding_model: get("EMBEDDING_MODEL")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            speech_language_code: get("SPEECH_LANGUAGE_CODE")
                .unwrap_or_else(|| "ja-JP".to_string()),
            analysis_timeout_secs: parse_or(
                "ANALYSIS_TIMEOUT_SECS",
                get("ANALYSIS_TIMEOUT_SECS"),
                600,
            )?,
            analysis_poll_interval_secs: parse_or(
                "ANALYSIS_POLL_INTERVAL_SECS",
                get("ANALYSIS_POLL_INTERVAL_SECS"),
                5,
            )?,
            max_search_limit: parse_or("MAX_SEARCH_LIMIT", get("MAX_SEARCH_LIMIT"), 100)?,
            access_token: get("GOOGLE_OAUTH_ACCESS_TOKEN"),
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or("PORT", get("PORT"), 8080)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("ANALYSIS_TIMEOUT_SECS", self.analysis_timeout_secs),
            ("ANALYSIS_POLL_INTERVAL_SECS", self.analysis_poll_interval_secs),
            ("MAX_SEARCH_LIMIT", self.max_search_limit as u64),
        ];
        for (var, value) in positive {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    var,
                    value: value.to_string(),
                    reason: "must be greater than 0".to_string(),
                });
            }
        }

        if self.analysis_poll_interval_secs > self.analysis_timeout_secs {
            return Err(ConfigError::Invalid {
                var: "ANALYSIS_POLL_INTERVAL_SECS",
                value: self.analysis_poll_interval_secs.to_string(),
                reason: "must not exceed ANALYSIS_TIMEOUT_SECS".to_string(),
            });
        }

        Ok(())
    }

    /// Socket address the HTTP server binds to
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
            var: "HOST",
            value: self.host.clone(),
            reason: e.to_string(),
        })
    }

    /// Settings for the video analysis client
    pub fn video_intelligence(&self) -> VideoIntelligenceConfig {
        VideoIntelligenceConfig {
            language_code: self.speech_language_code.clone(),
            timeout: Duration::from_secs(self.analysis_timeout_secs),
            poll_interval: Duration::from_secs(self.analysis_poll_interval_secs),
        }
    }
}

fn parse_or<T>(var: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
