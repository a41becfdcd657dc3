// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Video ingestion API endpoint
//!
//! Provides the `/process-video` HTTP endpoint.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::process_video_handler;
pub use request::{ProcessVideoBody, ProcessVideoRequest};
pub use response::ProcessVideoResponse;
