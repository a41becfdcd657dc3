// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Google Cloud plumbing shared by the downstream service clients
//!
//! - OAuth2 bearer tokens (static or metadata server)
//! - an authenticated JSON client with uniform error mapping

pub mod auth;
pub mod client;
pub mod error;

#[cfg(test)]
pub(crate) mod test_server;

pub use auth::{token_provider, AccessTokenProvider, MetadataTokenProvider, StaticTokenProvider};
pub use client::GoogleApiClient;
pub use error::GcpError;
