//! Provider implementations for catalog access.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::CatalogError;

pub mod http;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use http::HttpCatalogProvider;
#[cfg(any(test, feature = "test-utils"))]
pub use mock::MockCatalogProvider;

/// Trait for catalog providers.
///
/// Implementations answer with raw nested records exactly as the external
/// catalog shaped them; normalization happens elsewhere. Each operation is
/// independently failable and never retried here.
#[async_trait]
pub trait CatalogProvider: Send + Sync + std::fmt::Debug {
    /// Search the catalog, returning at most `limit` raw records in
    /// provider order.
    ///
    /// # Errors
    /// - `CatalogError::RequestFailed` - Provider could not be reached
    /// - `CatalogError::MalformedResponse` - Provider answer was undecodable
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Value>, CatalogError>;

    /// Fetch chart data for a region. The shape of the returned tree
    /// varies by region and provider version; callers must not assume a
    /// stable schema.
    ///
    /// # Errors
    /// - `CatalogError::RequestFailed` - Provider could not be reached
    /// - `CatalogError::MalformedResponse` - Provider answer was undecodable
    async fn charts(&self, region: &str) -> Result<Value, CatalogError>;

    /// Look up a single item, `Ok(None)` when the provider reports it
    /// missing.
    ///
    /// # Errors
    /// - `CatalogError::RequestFailed` - Provider could not be reached
    /// - `CatalogError::MalformedResponse` - Provider answer was undecodable
    async fn lookup(&self, video_id: &str) -> Result<Option<Value>, CatalogError>;
}
