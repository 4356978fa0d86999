//! Media resolution provider abstraction.
//!
//! The resolver is an external collaborator: given an opaque video id it
//! answers with everything the provider knows about the item, most
//! importantly the ordered list of candidate media formats.

use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::ResolveError;

pub mod http;
#[cfg(any(test, feature = "test-utils"))]
pub mod static_data;

pub use http::HttpResolver;
#[cfg(any(test, feature = "test-utils"))]
pub use static_data::{FailingResolver, StaticResolver};

/// One upstream-offered representation of a media item.
///
/// Produced per-request, discarded after selection. Provider-supplied
/// order is significant and must not be re-sorted.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateFormat {
    /// Fetchable location of this representation, if the provider gave one
    #[serde(default)]
    pub url: Option<String>,
    /// Audio codec identifier; `"none"` marks a video-only representation
    #[serde(default, rename = "acodec")]
    pub audio_codec: Option<String>,
}

impl CandidateFormat {
    /// Whether this representation carries an audio stream.
    pub fn has_audio(&self) -> bool {
        self.audio_codec.as_deref().is_some_and(|codec| codec != "none")
    }
}

/// Full resolver answer for one media item.
///
/// The relay consumes `formats`; the info endpoint reads the scalar fields.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaInfo {
    /// The opaque id this answer describes
    #[serde(default)]
    pub id: String,
    /// Item title, when the provider knows it
    #[serde(default)]
    pub title: Option<String>,
    /// Item duration in seconds, when the provider knows it
    #[serde(default, rename = "duration")]
    pub duration_seconds: Option<u64>,
    /// Channel or uploader name, when the provider knows it
    #[serde(default)]
    pub uploader: Option<String>,
    /// Candidate formats in provider-supplied order
    #[serde(default)]
    pub formats: Vec<CandidateFormat>,
}

/// Trait for media resolution providers.
///
/// A single resolution call may itself perform network I/O and take
/// seconds. Implementations never retry automatically; a provider failure
/// surfaces immediately.
#[async_trait]
pub trait MediaResolver: Send + Sync + std::fmt::Debug {
    /// Resolve a video id to its media info and candidate formats.
    ///
    /// # Errors
    /// - `ResolveError::RequestFailed` - Provider could not be reached
    /// - `ResolveError::MalformedResponse` - Provider answer was undecodable
    /// - `ResolveError::NotFound` - Provider reports the item missing
    async fn resolve(&self, video_id: &str) -> Result<MediaInfo, ResolveError>;
}
