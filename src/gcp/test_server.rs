// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Throwaway HTTP server standing in for Google endpoints in unit tests

use axum::Router;

/// Serve `app` on an ephemeral localhost port and return its base URL
pub(crate) async fn spawn_test_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}
