// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Errors raised while talking to Google Cloud APIs

use thiserror::Error;

/// Errors that can occur when calling a managed Google Cloud service
#[derive(Debug, Error)]
pub enum GcpError {
    /// The request never produced an HTTP response
    #[error("{service} request failed: {message}")]
    Transport {
        /// Downstream service name
        service: &'static str,
        /// Transport error message
        message: String,
    },

    /// The service answered with a non-success status
    #[error("{service} API error: {status} - {message}")]
    Api {
        /// Downstream service name
        service: &'static str,
        /// HTTP status code
        status: u16,
        /// Error message reported by the service
        message: String,
    },

    /// The response body was not the expected JSON
    #[error("{service} response could not be decoded: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },

    /// The response decoded but lacked data the caller needs
    #[error("Unexpected {service} response: {message}")]
    UnexpectedResponse {
        service: &'static str,
        message: String,
    },

    /// A long-running operation finished with an error status
    #[error("{service} operation failed: {message}")]
    OperationFailed {
        service: &'static str,
        message: String,
    },

    /// A long-running operation did not finish in time
    #[error("{service} operation timed out after {timeout_secs}s")]
    Timeout {
        service: &'static str,
        timeout_secs: u64,
    },

    /// No OAuth2 access token could be obtained
    #[error("Failed to obtain access token: {0}")]
    Auth(String),

    /// The capability was requested but its settings are absent
    #[error("{0} is not configured")]
    NotConfigured(String),
}
