//! Mock catalog provider for testing.

use async_trait::async_trait;
use serde_json::Value;

use super::CatalogProvider;
use crate::errors::CatalogError;

/// Mock provider serving canned fixtures, or failing every call.
#[derive(Debug, Default)]
pub struct MockCatalogProvider {
    search_results: Vec<Value>,
    charts: Option<Value>,
    lookup_result: Option<Value>,
    fail_everything: bool,
}

impl MockCatalogProvider {
    /// Creates a provider that answers every call with empty data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider that fails every call, for exercising the
    /// degraded-mode paths.
    pub fn failing() -> Self {
        Self {
            fail_everything: true,
            ..Self::default()
        }
    }

    /// Sets the raw records returned by `search`.
    pub fn with_search_results(mut self, results: Vec<Value>) -> Self {
        self.search_results = results;
        self
    }

    /// Sets the chart tree returned by `charts`.
    pub fn with_charts(mut self, charts: Value) -> Self {
        self.charts = Some(charts);
        self
    }

    /// Sets the record returned by `lookup`.
    pub fn with_lookup(mut self, record: Value) -> Self {
        self.lookup_result = Some(record);
        self
    }

    fn outage<T>(&self) -> Result<T, CatalogError> {
        Err(CatalogError::ProviderUnavailable {
            reason: "simulated catalog outage".to_string(),
        })
    }
}

#[async_trait]
impl CatalogProvider for MockCatalogProvider {
    async fn search(&self, _query: &str, limit: usize) -> Result<Vec<Value>, CatalogError> {
        if self.fail_everything {
            return self.outage();
        }
        Ok(self.search_results.iter().take(limit).cloned().collect())
    }

    async fn charts(&self, _region: &str) -> Result<Value, CatalogError> {
        if self.fail_everything {
            return self.outage();
        }
        Ok(self.charts.clone().unwrap_or(Value::Null))
    }

    async fn lookup(&self, _video_id: &str) -> Result<Option<Value>, CatalogError> {
        if self.fail_everything {
            return self.outage();
        }
        Ok(self.lookup_result.clone())
    }
}
