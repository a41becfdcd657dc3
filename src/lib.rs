// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod embeddings;
pub mod gcp;
pub mod vector;
pub mod vectorizer;
pub mod version;
pub mod video;

pub use config::{ConfigError, ServiceConfig};
pub use vectorizer::{ProcessOutcome, VectorizerError, VideoVectorizer};
