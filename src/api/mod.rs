// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod extract;
pub mod http_server;
pub mod process_video;
pub mod search;

pub use errors::{ApiError, ErrorResponse};
pub use extract::JsonBody;
pub use http_server::{create_app, start_server, AppState, HealthResponse};
pub use process_video::{process_video_handler, ProcessVideoRequest, ProcessVideoResponse};
pub use search::{search_handler, SearchApiRequest, SearchApiResponse};
