//! Catalog degraded-mode behavior across crate boundaries.

use aurelay_catalog::CatalogService;
use aurelay_catalog::providers::MockCatalogProvider;
use serde_json::json;

#[tokio::test]
async fn test_total_catalog_outage_yields_empty_results() {
    let service = CatalogService::new(Box::new(MockCatalogProvider::failing()));

    assert!(service.search_songs("any", 10).await.is_empty());
    assert!(service.trending("ID").await.is_empty());
    assert!(service.song_details("abc").await.is_none());
}

#[tokio::test]
async fn test_chart_outage_falls_back_to_search() {
    // Charts answer with an unusable tree, but search still works: the
    // trending surface must keep serving songs.
    let provider = MockCatalogProvider::new()
        .with_charts(json!({"weird": {"shape": true}}))
        .with_search_results(vec![json!({"videoId": "p1", "title": "Popular"})]);
    let service = CatalogService::new(Box::new(provider));

    let songs = service.trending("ID").await;

    assert_eq!(songs.len(), 1);
    assert_eq!(songs[0].id, "p1");
}
