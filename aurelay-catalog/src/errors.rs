//! Error types for catalog access.
//!
//! These errors never cross the service boundary: `CatalogService` logs
//! them and downgrades to empty/absent results, because the external
//! catalog is known to be unstable across inputs.

use thiserror::Error;

/// Errors that can occur while talking to the external catalog provider.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The provider request could not be completed.
    #[error("Catalog request failed: {reason}")]
    RequestFailed {
        /// The reason for the failure
        reason: String,
    },

    /// The provider answered but its payload could not be decoded.
    #[error("Catalog returned malformed data: {reason}")]
    MalformedResponse {
        /// The reason for the decode failure
        reason: String,
    },

    /// The provider reported itself unavailable.
    #[error("Catalog provider unavailable: {reason}")]
    ProviderUnavailable {
        /// The reason the provider is unavailable
        reason: String,
    },
}
