// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Authenticated JSON client shared by the Google API wrappers

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use super::auth::AccessTokenProvider;
use super::error::GcpError;

/// Thin wrapper around `reqwest::Client` that attaches a bearer token and
/// maps failures onto [`GcpError`] tagged with the service name
pub struct GoogleApiClient {
    service: &'static str,
    http: Client,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl GoogleApiClient {
    /// Create a client for one downstream service
    ///
    /// # Arguments
    /// * `service` - Human readable service name used in errors and logs
    /// * `tokens` - Source of OAuth2 bearer tokens
    /// * `request_timeout` - Per-request timeout
    pub fn new(
        service: &'static str,
        tokens: Arc<dyn AccessTokenProvider>,
        request_timeout: Duration,
    ) -> Result<Self, GcpError> {
        let http = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| GcpError::Transport {
                service,
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            service,
            http,
            tokens,
        })
    }

    /// POST a JSON body and decode the JSON response
    pub async fn post_json<B, R>(&self, url: &str, body: &B) -> Result<R, GcpError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.http.post(url).json(body);
        self.execute(request).await
    }

    /// GET a resource and decode the JSON response
    pub async fn get_json<R>(&self, url: &str) -> Result<R, GcpError>
    where
        R: DeserializeOwned,
    {
        let request = self.http.get(url);
        self.execute(request).await
    }

    async fn execute<R>(&self, request: RequestBuilder) -> Result<R, GcpError>
    where
        R: DeserializeOwned,
    {
        let token = self.tokens.access_token().await?;

        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| GcpError::Transport {
                service: self.service,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GcpError::Api {
                service: self.service,
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        response.json().await.map_err(|e| GcpError::Decode {
            service: self.service,
            message: e.to_string(),
        })
    }
}

/// Pull `error.message` out of a Google error envelope, falling back to the raw body
pub(crate) fn error_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct Envelope {
        error: EnvelopeError,
    }

    #[derive(serde::Deserialize)]
    struct EnvelopeError {
        message: String,
    }

    match serde_json::from_str::<Envelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body.trim().to_string(),
    }
}
