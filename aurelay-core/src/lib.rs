//! Aurelay Core - Audio resolution and streaming relay

#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]
#![warn(clippy::missing_panics_doc)]
//!
//! Provides the building blocks for proxying audio from an upstream media
//! provider to downstream clients: candidate-format resolution, audio format
//! selection, and the chunked streaming relay itself.

pub mod config;
pub mod errors;
pub mod relay;
pub mod resolver;
pub mod selector;

// Re-export main types for convenient access
pub use config::{AurelayConfig, RelayConfig, ResolverConfig, ServerConfig};
pub use errors::{RelayError, ResolveError};
pub use relay::{AudioStream, StreamRelay};
pub use resolver::{CandidateFormat, HttpResolver, MediaInfo, MediaResolver};
pub use selector::select_audio_source;

/// Convenience type alias for Results with RelayError.
pub type Result<T> = std::result::Result<T, RelayError>;
