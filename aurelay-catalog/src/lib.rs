//! Aurelay Catalog - Music metadata access and normalization

#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]
#![warn(clippy::missing_panics_doc)]
//!
//! Wraps an unstable external music catalog (search, regional charts,
//! single-track lookup) and converts its loosely-shaped responses into one
//! canonical song record used by every catalog-facing surface.

pub mod errors;
pub mod providers;
pub mod service;
pub mod song;

// Re-export main types
pub use errors::CatalogError;
pub use providers::{CatalogProvider, HttpCatalogProvider};
pub use service::CatalogService;
pub use song::{Song, parse_duration};

/// Convenience type alias for Results with CatalogError.
pub type Result<T> = std::result::Result<T, CatalogError>;
