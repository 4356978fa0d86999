//! HTTP media resolver for production use.
//!
//! Talks to an external resolver daemon that wraps the actual extraction
//! backend and answers with a JSON media-info document.

use async_trait::async_trait;
use reqwest::StatusCode;

use super::{MediaInfo, MediaResolver};
use crate::config::ResolverConfig;
use crate::errors::ResolveError;

/// Resolver backed by an HTTP endpoint.
#[derive(Debug)]
pub struct HttpResolver {
    client: reqwest::Client,
    base_url: String,
}

impl HttpResolver {
    /// Create a resolver from configuration.
    ///
    /// Falls back to a default client if the configured one cannot be
    /// built (only possible with pathological TLS setups).
    pub fn new(config: &ResolverConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MediaResolver for HttpResolver {
    async fn resolve(&self, video_id: &str) -> Result<MediaInfo, ResolveError> {
        let url = format!("{}/resolve", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("id", video_id)])
            .send()
            .await
            .map_err(|e| ResolveError::RequestFailed {
                reason: e.to_string(),
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ResolveError::NotFound {
                video_id: video_id.to_string(),
            });
        }

        if !response.status().is_success() {
            return Err(ResolveError::RequestFailed {
                reason: format!("resolver answered with status {}", response.status()),
            });
        }

        let mut info: MediaInfo =
            response
                .json()
                .await
                .map_err(|e| ResolveError::MalformedResponse {
                    reason: e.to_string(),
                })?;

        if info.id.is_empty() {
            info.id = video_id.to_string();
        }

        Ok(info)
    }
}
