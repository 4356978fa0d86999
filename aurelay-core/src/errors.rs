//! Error types for audio resolution and relaying.

use thiserror::Error;

/// Errors from the external media-resolution provider boundary.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The resolver request could not be completed.
    #[error("Resolver request failed: {reason}")]
    RequestFailed {
        /// The reason for the failure
        reason: String,
    },

    /// The resolver answered but its payload could not be decoded.
    #[error("Resolver returned malformed data: {reason}")]
    MalformedResponse {
        /// The reason for the decode failure
        reason: String,
    },

    /// The provider reports the media item as missing.
    #[error("Media item not found: {video_id}")]
    NotFound {
        /// The id that could not be resolved
        video_id: String,
    },
}

/// Errors that can occur while relaying an audio stream.
///
/// Each variant maps to a distinct outward status. `NoAudioSource` is a
/// client-visible 404-equivalent; `StreamInterrupted` occurs after response
/// headers are committed and can only truncate the body.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Candidate-format resolution failed before any source was chosen.
    #[error("Failed to resolve audio formats: {reason}")]
    ResolutionFailed {
        /// The reason for the resolution failure
        reason: String,
    },

    /// No candidate format carried a usable audio stream.
    #[error("No audio stream found for {video_id}")]
    NoAudioSource {
        /// The id that had no audio-bearing candidate
        video_id: String,
    },

    /// The selected source URL answered with an error or refused the
    /// connection before any body bytes flowed.
    #[error("Upstream fetch failed: {reason}")]
    UpstreamFetchFailed {
        /// The reason for the fetch failure
        reason: String,
    },

    /// The upstream connection dropped after bytes already flowed.
    /// Already-relayed bytes remain valid.
    #[error("Stream interrupted: {reason}")]
    StreamInterrupted {
        /// The reason the transfer ended abnormally
        reason: String,
    },
}
