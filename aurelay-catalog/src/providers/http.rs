//! HTTP catalog provider for production use.
//!
//! Talks to an external catalog daemon exposing search, charts and song
//! lookup routes that answer with raw JSON documents.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use super::CatalogProvider;
use crate::errors::CatalogError;

/// Catalog provider backed by an HTTP endpoint.
#[derive(Debug)]
pub struct HttpCatalogProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogProvider {
    /// Create a provider for the given base URL.
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Create a provider with a custom request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, CatalogError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| CatalogError::RequestFailed {
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(CatalogError::RequestFailed {
                reason: format!("catalog answered with status {}", response.status()),
            });
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::MalformedResponse {
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl CatalogProvider for HttpCatalogProvider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Value>, CatalogError> {
        let url = format!("{}/search", self.base_url);
        let limit_str = limit.to_string();

        let body = self
            .fetch_json(&url, &[("q", query), ("limit", &limit_str)])
            .await?;

        match body {
            Value::Array(records) => Ok(records),
            other => Err(CatalogError::MalformedResponse {
                reason: format!("expected a record list, got {other}"),
            }),
        }
    }

    async fn charts(&self, region: &str) -> Result<Value, CatalogError> {
        let url = format!("{}/charts", self.base_url);
        self.fetch_json(&url, &[("region", region)]).await
    }

    async fn lookup(&self, video_id: &str) -> Result<Option<Value>, CatalogError> {
        let url = format!("{}/song/{video_id}", self.base_url);

        let response =
            self.client
                .get(&url)
                .send()
                .await
                .map_err(|e| CatalogError::RequestFailed {
                    reason: e.to_string(),
                })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(CatalogError::RequestFailed {
                reason: format!("catalog answered with status {}", response.status()),
            });
        }

        let record = response
            .json()
            .await
            .map_err(|e| CatalogError::MalformedResponse {
                reason: e.to_string(),
            })?;

        Ok(Some(record))
    }
}
