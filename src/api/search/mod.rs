// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Video search API endpoint
//!
//! Provides the `/search` HTTP endpoint for text-to-video search.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::search_handler;
pub use request::{SearchApiBody, SearchApiRequest};
pub use response::SearchApiResponse;
