// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use std::{env, sync::Arc};
use tracing::info;
use video_vectorizer::{
    api::{start_server, AppState},
    version, ServiceConfig, VideoVectorizer,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    info!(
        "Starting {} v{} ({})",
        version::SERVICE_NAME,
        version::VERSION,
        version::FEATURES.join(", ")
    );

    let config = ServiceConfig::from_env().context(
        "Missing or invalid configuration. \
         Please set GOOGLE_CLOUD_PROJECT_ID and VECTOR_INDEX_ID.",
    )?;
    info!(
        "Project {} in {}, index {}",
        config.project_id, config.location, config.vector_index_id
    );

    let vectorizer =
        VideoVectorizer::from_config(&config).context("Failed to initialize cloud clients")?;
    let state = AppState::new(Arc::new(vectorizer), config.max_search_limit);

    let addr = config.listen_addr()?;
    start_server(state, addr).await
}
