// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search API request types

use serde::Deserialize;
use serde_json::Value;

use crate::api::ApiError;

/// Number of results returned when `limit` is omitted
pub const DEFAULT_LIMIT: usize = 5;

/// Body of POST /search as sent by the client
///
/// Fields stay untyped so that wrong types get a field-specific 400
/// instead of a generic deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchApiBody {
    /// Free-text query (required)
    pub query: Option<Value>,
    /// Number of videos to return (`null` or absent means 5)
    pub limit: Option<Value>,
}

impl SearchApiBody {
    /// Validate the body; `limit` must fall in `1..=max_limit`
    pub fn validate(&self, max_limit: usize) -> Result<SearchApiRequest, ApiError> {
        let query = self.query.as_ref().ok_or_else(missing_query)?;
        let query = query
            .as_str()
            .ok_or_else(|| ApiError::InvalidRequest("'query' must be a string".to_string()))?;
        if query.trim().is_empty() {
            return Err(ApiError::InvalidRequest(
                "'query' cannot be empty".to_string(),
            ));
        }

        let limit = match &self.limit {
            None => DEFAULT_LIMIT,
            Some(value) => parse_limit(value, max_limit)?,
        };

        Ok(SearchApiRequest {
            query: query.to_string(),
            limit,
        })
    }
}

/// Validated search request
#[derive(Debug, Clone, PartialEq)]
pub struct SearchApiRequest {
    pub query: String,
    pub limit: usize,
}

impl SearchApiRequest {
    /// Decode and validate a JSON body
    pub fn from_json(body: Value, max_limit: usize) -> Result<Self, ApiError> {
        if !body.is_object() {
            return Err(missing_query());
        }
        let body: SearchApiBody = serde_json::from_value(body).map_err(|_| missing_query())?;
        body.validate(max_limit)
    }
}

fn missing_query() -> ApiError {
    ApiError::InvalidRequest("Missing required parameter: 'query'".to_string())
}

fn parse_limit(value: &Value, max_limit: usize) -> Result<usize, ApiError> {
    let invalid = || {
        ApiError::InvalidRequest(format!(
            "'limit' must be an integer between 1 and {}",
            max_limit
        ))
    };

    let limit = value.as_u64().ok_or_else(invalid)?;
    if limit == 0 || limit > max_limit as u64 {
        return Err(invalid());
    }
    Ok(limit as usize)
}
