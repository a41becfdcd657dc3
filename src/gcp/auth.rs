// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OAuth2 access tokens for Google Cloud REST calls
//!
//! Two sources are supported:
//! - a static token supplied through `GOOGLE_OAUTH_ACCESS_TOKEN` (local development)
//! - the runtime service account, fetched from the GCE/Cloud Run metadata server

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

use super::error::GcpError;

const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

/// Tokens are refreshed this long before the server-reported expiry
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Source of bearer tokens for Google APIs
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Return a currently valid access token
    async fn access_token(&self) -> Result<String, GcpError>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

/// Always returns the token it was built with
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: String) -> Self {
        Self { token }
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String, GcpError> {
        if self.token.trim().is_empty() {
            return Err(GcpError::Auth("static access token is empty".to_string()));
        }
        Ok(self.token.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

#[derive(Debug, Deserialize)]
struct MetadataTokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    refresh_at: Instant,
}

impl CachedToken {
    fn from_response(response: MetadataTokenResponse, now: Instant) -> Self {
        let lifetime = Duration::from_secs(response.expires_in).saturating_sub(REFRESH_MARGIN);
        Self {
            token: response.access_token,
            refresh_at: now + lifetime,
        }
    }

    fn is_fresh(&self, now: Instant) -> bool {
        now < self.refresh_at
    }
}

/// Fetches service-account tokens from the metadata server and caches them
pub struct MetadataTokenProvider {
    client: Client,
    token_url: String,
    cached: RwLock<Option<CachedToken>>,
}

impl MetadataTokenProvider {
    pub fn new() -> Result<Self, GcpError> {
        Self::with_token_url(METADATA_TOKEN_URL)
    }

    /// Fetch tokens from `token_url` instead of the well-known metadata address
    pub fn with_token_url(token_url: &str) -> Result<Self, GcpError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| GcpError::Auth(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            token_url: token_url.to_string(),
            cached: RwLock::new(None),
        })
    }

    async fn fetch(&self) -> Result<MetadataTokenResponse, GcpError> {
        let response = self
            .client
            .get(&self.token_url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| GcpError::Auth(format!("metadata server unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GcpError::Auth(format!(
                "metadata server returned {}: {}",
                status.as_u16(),
                body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| GcpError::Auth(format!("invalid metadata token response: {}", e)))
    }
}

#[async_trait]
impl AccessTokenProvider for MetadataTokenProvider {
    async fn access_token(&self) -> Result<String, GcpError> {
        if let Some(cached) = self.cached.read().await.as_ref() {
            if cached.is_fresh(Instant::now()) {
                return Ok(cached.token.clone());
            }
        }

        let mut slot = self.cached.write().await;
        // Another request may have refreshed while we waited for the lock
        if let Some(cached) = slot.as_ref() {
            if cached.is_fresh(Instant::now()) {
                return Ok(cached.token.clone());
            }
        }

        let response = self.fetch().await?;
        debug!(
            "Fetched service account token from metadata server (expires in {}s)",
            response.expires_in
        );
        let cached = CachedToken::from_response(response, Instant::now());
        let token = cached.token.clone();
        *slot = Some(cached);
        Ok(token)
    }

    fn name(&self) -> &'static str {
        "metadata-server"
    }
}

/// Pick the token source: a static token when one is configured, otherwise the metadata server
pub fn token_provider(
    static_token: Option<&str>,
) -> Result<Arc<dyn AccessTokenProvider>, GcpError> {
    match static_token {
        Some(token) => Ok(Arc::new(StaticTokenProvider::new(token.to_string()))),
        None => Ok(Arc::new(MetadataTokenProvider::new()?)),
    }
}
