//! Centralized configuration for Aurelay.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::time::Duration;

/// Central configuration for all Aurelay components.
///
/// Groups related configuration settings into logical sections.
#[derive(Debug, Clone, Default)]
pub struct AurelayConfig {
    pub relay: RelayConfig,
    pub resolver: ResolverConfig,
    pub server: ServerConfig,
}

/// Streaming relay configuration.
///
/// Controls chunk framing, backpressure and upstream fetch behavior.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Fixed frame size for relayed audio chunks
    pub chunk_size: usize,
    /// Bounded channel capacity between the upstream reader and the
    /// response body (frames in flight before backpressure kicks in)
    pub channel_capacity: usize,
    /// Timeout applied to the upstream GET (None = no timeout, matches
    /// the behavior of the original service)
    pub upstream_timeout: Option<Duration>,
    /// User agent for upstream HTTP requests
    pub user_agent: &'static str,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            chunk_size: 8192,
            channel_capacity: 16,
            upstream_timeout: None,
            user_agent: "aurelay/0.1.0",
        }
    }
}

/// Media resolver configuration.
///
/// Controls how the external media-resolution provider is reached.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Base URL of the resolver endpoint
    pub base_url: String,
    /// Request timeout for resolution calls. Resolution can legitimately
    /// take several seconds, so the default is generous.
    pub request_timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:9050".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP server bind configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8001,
        }
    }
}
