//! Canned resolver implementations for testing.

use std::collections::HashMap;

use async_trait::async_trait;

use super::{MediaInfo, MediaResolver};
use crate::errors::ResolveError;

/// Resolver serving fixed answers keyed by video id.
#[derive(Debug, Default)]
pub struct StaticResolver {
    answers: HashMap<String, MediaInfo>,
}

impl StaticResolver {
    /// Creates an empty static resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a canned answer for an id.
    pub fn with_answer(mut self, video_id: &str, info: MediaInfo) -> Self {
        self.answers.insert(video_id.to_string(), info);
        self
    }
}

#[async_trait]
impl MediaResolver for StaticResolver {
    async fn resolve(&self, video_id: &str) -> Result<MediaInfo, ResolveError> {
        self.answers
            .get(video_id)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound {
                video_id: video_id.to_string(),
            })
    }
}

/// Resolver that fails every call, for exercising error paths.
#[derive(Debug, Default)]
pub struct FailingResolver;

#[async_trait]
impl MediaResolver for FailingResolver {
    async fn resolve(&self, _video_id: &str) -> Result<MediaInfo, ResolveError> {
        Err(ResolveError::RequestFailed {
            reason: "simulated provider outage".to_string(),
        })
    }
}
