//! Catalog service: the error-swallowing boundary over the provider.
//!
//! The external catalog is unstable across inputs (chart structure varies
//! by region and provider version), so provider failures are logged and
//! downgraded to empty or absent results here. Callers never see a hard
//! failure from catalog operations.

use serde_json::Value;
use tracing::warn;

use crate::providers::CatalogProvider;
use crate::song::Song;

/// Default result cap for the command-line search.
pub const CLI_SEARCH_LIMIT: usize = 10;

/// Maximum songs taken from any single chart shape or fallback search.
const CHART_LIMIT: usize = 6;

/// Chart sections scanned, in priority order, when the primary trending
/// shape yields nothing.
const CHART_SECTIONS: [&str; 3] = ["trending", "videos", "artists"];

/// Fixed popular-music queries used when every chart shape fails.
const POPULAR_QUERIES: [&str; 3] = ["lagu indonesia terpopuler", "hits indonesia", "lagu trending"];

/// Catalog service providing normalized song records.
#[derive(Debug)]
pub struct CatalogService {
    provider: Box<dyn CatalogProvider>,
}

impl CatalogService {
    /// Creates a service over the given provider.
    pub fn new(provider: Box<dyn CatalogProvider>) -> Self {
        Self { provider }
    }

    /// Searches the catalog and normalizes the results.
    ///
    /// Records without a usable id are skipped; provider order is kept.
    /// A provider failure yields an empty list, never an error.
    pub async fn search_songs(&self, query: &str, limit: usize) -> Vec<Song> {
        let raw = match self.provider.search(query, limit).await {
            Ok(records) => records,
            Err(e) => {
                warn!("Search failed for '{query}': {e}");
                return Vec::new();
            }
        };

        raw.iter()
            .filter_map(Song::from_raw)
            .take(limit)
            .collect()
    }

    /// Returns trending songs for a region, degrading gracefully.
    ///
    /// Tries the known chart shapes in priority order, then falls back to
    /// fixed popular-music searches. Chart unavailability must never
    /// surface as an error to the end user: when every fallback is
    /// exhausted the result is simply empty.
    pub async fn trending(&self, region: &str) -> Vec<Song> {
        match self.provider.charts(region).await {
            Ok(charts) => {
                let songs = chart_songs(&charts);
                if !songs.is_empty() {
                    return songs;
                }
            }
            Err(e) => {
                warn!("Charts request failed for region '{region}': {e}");
            }
        }

        for query in POPULAR_QUERIES {
            let songs = self.search_songs(query, CHART_LIMIT).await;
            if !songs.is_empty() {
                return songs;
            }
        }

        Vec::new()
    }

    /// Looks up one song and normalizes it.
    ///
    /// `None` on provider failure, a missing item, or a record without a
    /// usable shape.
    pub async fn song_details(&self, video_id: &str) -> Option<Song> {
        match self.provider.lookup(video_id).await {
            Ok(Some(raw)) => Some(Song::from_lookup(video_id, &raw)),
            Ok(None) => None,
            Err(e) => {
                warn!("Lookup failed for '{video_id}': {e}");
                None
            }
        }
    }
}

/// Extracts songs from a chart tree by trying known shapes in order.
///
/// Shape 1 is the dedicated `trending.songs` list; shape 2 scans the
/// sibling sections `trending`, `videos`, `artists` for a `songs` list.
/// The first shape yielding any normalized song wins, capped at six.
fn chart_songs(charts: &Value) -> Vec<Song> {
    let trending = section_songs(charts.get("trending"));
    if !trending.is_empty() {
        return trending;
    }

    for section in CHART_SECTIONS {
        let songs = section_songs(charts.get(section));
        if !songs.is_empty() {
            return songs;
        }
    }

    Vec::new()
}

/// Normalizes the `songs` list of one chart section, tolerating any shape.
fn section_songs(section: Option<&Value>) -> Vec<Song> {
    section
        .and_then(|section| section.get("songs"))
        .and_then(Value::as_array)
        .map(|songs| {
            songs
                .iter()
                .take(CHART_LIMIT)
                .filter_map(Song::from_raw)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::providers::MockCatalogProvider;

    fn record(id: &str, title: &str) -> Value {
        json!({"videoId": id, "title": title})
    }

    #[tokio::test]
    async fn test_search_normalizes_and_skips_unusable_records() {
        let provider = MockCatalogProvider::new().with_search_results(vec![
            record("a", "First"),
            json!({"title": "no id"}),
            record("b", "Second"),
        ]);
        let service = CatalogService::new(Box::new(provider));

        let songs = service.search_songs("anything", 10).await;

        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].id, "a");
        assert_eq!(songs[1].id, "b");
    }

    #[tokio::test]
    async fn test_search_swallows_provider_failure() {
        let service = CatalogService::new(Box::new(MockCatalogProvider::failing()));

        assert!(service.search_songs("anything", 10).await.is_empty());
    }

    #[tokio::test]
    async fn test_trending_primary_shape() {
        let provider = MockCatalogProvider::new().with_charts(json!({
            "trending": {"songs": [record("t1", "One"), record("t2", "Two")]}
        }));
        let service = CatalogService::new(Box::new(provider));

        let songs = service.trending("ID").await;

        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].id, "t1");
    }

    #[tokio::test]
    async fn test_trending_caps_at_six() {
        let many: Vec<Value> = (0..10).map(|i| record(&format!("s{i}"), "S")).collect();
        let provider =
            MockCatalogProvider::new().with_charts(json!({"trending": {"songs": many}}));
        let service = CatalogService::new(Box::new(provider));

        assert_eq!(service.trending("ID").await.len(), 6);
    }

    #[tokio::test]
    async fn test_trending_section_priority_order() {
        // No trending songs; "videos" must win over "artists".
        let provider = MockCatalogProvider::new().with_charts(json!({
            "trending": {"songs": []},
            "videos": {"songs": [record("v1", "Video")]},
            "artists": {"songs": [record("a1", "Artist")]}
        }));
        let service = CatalogService::new(Box::new(provider));

        let songs = service.trending("ID").await;

        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].id, "v1");
    }

    #[tokio::test]
    async fn test_trending_falls_back_to_search() {
        let provider = MockCatalogProvider::new()
            .with_charts(json!({"unknown_section": []}))
            .with_search_results(vec![record("f1", "Fallback")]);
        let service = CatalogService::new(Box::new(provider));

        let songs = service.trending("ID").await;

        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].id, "f1");
    }

    #[tokio::test]
    async fn test_trending_never_errors() {
        let service = CatalogService::new(Box::new(MockCatalogProvider::failing()));

        assert!(service.trending("ID").await.is_empty());
    }

    #[tokio::test]
    async fn test_song_details_uses_music_link() {
        let provider = MockCatalogProvider::new().with_lookup(json!({"title": "Found"}));
        let service = CatalogService::new(Box::new(provider));

        let song = service.song_details("abc").await.unwrap();

        assert_eq!(song.title, "Found");
        assert_eq!(song.audio_url, "https://music.youtube.com/watch?v=abc");
    }

    #[tokio::test]
    async fn test_song_details_absent_on_miss_or_failure() {
        let service = CatalogService::new(Box::new(MockCatalogProvider::new()));
        assert!(service.song_details("missing").await.is_none());

        let failing = CatalogService::new(Box::new(MockCatalogProvider::failing()));
        assert!(failing.song_details("abc").await.is_none());
    }
}
