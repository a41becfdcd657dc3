// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vertex AI Vector Search client
//!
//! Upserts go to the index resource (`indexes/{id}:upsertDatapoints`, which
//! requires a stream-update index). Queries go to the index endpoint the index
//! is deployed on (`indexEndpoints/{id}:findNeighbors`).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use super::types::{SearchResult, VideoMetadata};
use super::VectorIndex;
use crate::gcp::{AccessTokenProvider, GcpError, GoogleApiClient};

const SERVICE: &str = "Vertex AI Vector Search";

/// Where the index is deployed for querying
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEndpointConfig {
    /// Index endpoint resource id
    pub endpoint_id: String,
    /// Id the index was deployed under on that endpoint
    pub deployed_index_id: String,
    /// Public endpoint domain; `None` uses the regional API host
    pub host: Option<String>,
}

pub struct VertexVectorIndex {
    api: GoogleApiClient,
    upsert_url: String,
    query: Option<QueryTarget>,
}

struct QueryTarget {
    url: String,
    deployed_index_id: String,
}

impl VertexVectorIndex {
    pub fn new(
        tokens: Arc<dyn AccessTokenProvider>,
        project_id: &str,
        location: &str,
        index_id: &str,
        endpoint: Option<IndexEndpointConfig>,
    ) -> Result<Self, GcpError> {
        let api = GoogleApiClient::new(SERVICE, tokens, Duration::from_secs(30))?;

        let upsert_url = format!(
            "{}/v1/projects/{}/locations/{}/indexes/{}:upsertDatapoints",
            regional_host(location),
            project_id,
            location,
            index_id
        );

        let query = endpoint.map(|endpoint| {
            let host = endpoint
                .host
                .as_deref()
                .map(|host| format!("https://{}", host.trim_start_matches("https://")))
                .unwrap_or_else(|| regional_host(location));
            QueryTarget {
                url: format!(
                    "{}/v1/projects/{}/locations/{}/indexEndpoints/{}:findNeighbors",
                    host, project_id, location, endpoint.endpoint_id
                ),
                deployed_index_id: endpoint.deployed_index_id,
            }
        });

        Ok(Self {
            api,
            upsert_url,
            query,
        })
    }

    /// Whether nearest-neighbor queries are possible with this configuration
    pub fn can_query(&self) -> bool {
        self.query.is_some()
    }
}

fn regional_host(location: &str) -> String {
    format!("https://{}-aiplatform.googleapis.com", location)
}

#[async_trait]
impl VectorIndex for VertexVectorIndex {
    async fn upsert(
        &self,
        id: &str,
        embedding: &[f32],
        metadata: &VideoMetadata,
    ) -> Result<(), GcpError> {
        let request = UpsertDatapointsRequest {
            datapoints: vec![IndexDatapoint {
                datapoint_id: id,
                feature_vector: embedding,
                embedding_metadata: metadata,
            }],
        };

        let _: serde_json::Value = self.api.post_json(&self.upsert_url, &request).await?;
        info!("Upserted datapoint {} ({} dimensions)", id, embedding.len());
        Ok(())
    }

    async fn find_neighbors(
        &self,
        embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchResult>, GcpError> {
        let target = self.query.as_ref().ok_or_else(|| {
            GcpError::NotConfigured("Vector search index endpoint".to_string())
        })?;

        let request = FindNeighborsRequest {
            deployed_index_id: &target.deployed_index_id,
            queries: vec![NeighborQuery {
                datapoint: QueryDatapoint {
                    feature_vector: embedding,
                },
                neighbor_count: limit,
            }],
            return_full_datapoint: true,
        };

        let response: FindNeighborsResponse = self.api.post_json(&target.url, &request).await?;
        let results = response.into_results();
        debug!("Nearest-neighbor query returned {} matches", results.len());
        Ok(results)
    }
}

#[derive(Debug, Serialize)]
struct UpsertDatapointsRequest<'a> {
    datapoints: Vec<IndexDatapoint<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexDatapoint<'a> {
    datapoint_id: &'a str,
    feature_vector: &'a [f32],
    embedding_metadata: &'a VideoMetadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FindNeighborsRequest<'a> {
    deployed_index_id: &'a str,
    queries: Vec<NeighborQuery<'a>>,
    return_full_datapoint: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NeighborQuery<'a> {
    datapoint: QueryDatapoint<'a>,
    neighbor_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryDatapoint<'a> {
    feature_vector: &'a [f32],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FindNeighborsResponse {
    #[serde(default)]
    nearest_neighbors: Vec<NearestNeighbors>,
}

impl FindNeighborsResponse {
    fn into_results(self) -> Vec<SearchResult> {
        self.nearest_neighbors
            .into_iter()
            .next()
            .map(|query| {
                query
                    .neighbors
                    .into_iter()
                    .map(|neighbor| SearchResult {
                        video_id: neighbor.datapoint.datapoint_id,
                        score: neighbor.distance,
                        metadata: neighbor.datapoint.embedding_metadata,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct NearestNeighbors {
    #[serde(default)]
    neighbors: Vec<Neighbor>,
}

#[derive(Debug, Deserialize)]
struct Neighbor {
    datapoint: NeighborDatapoint,
    #[serde(default)]
    distance: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NeighborDatapoint {
    datapoint_id: String,
    #[serde(default)]
    embedding_metadata: serde_json::Value,
}
