// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use super::{process_video_handler, search_handler, ApiError};
use crate::vectorizer::VideoVectorizer;

#[derive(Clone)]
pub struct AppState {
    pub vectorizer: Arc<VideoVectorizer>,
    /// Largest `limit` accepted by /search
    pub max_search_limit: usize,
}

impl AppState {
    pub fn new(vectorizer: Arc<VideoVectorizer>, max_search_limit: usize) -> Self {
        Self {
            vectorizer,
            max_search_limit,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route(
            "/health",
            get(health_handler).fallback(method_not_allowed_handler),
        )
        .route(
            "/process-video",
            post(process_video_handler).fallback(method_not_allowed_handler),
        )
        .route(
            "/search",
            post(search_handler).fallback(method_not_allowed_handler),
        )
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the API on `addr` until Ctrl-C
pub async fn start_server(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

/// GET /health - liveness only, never calls downstream services
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

async fn not_found_handler() -> ApiError {
    ApiError::NotFound("Resource not found".to_string())
}

async fn method_not_allowed_handler() -> ApiError {
    ApiError::MethodNotAllowed("Method not allowed".to_string())
}
