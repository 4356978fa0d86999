//! JSON endpoints: liveness and media info.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{Value, json};
use tracing::error;

use crate::server::AppState;

/// Liveness payload.
pub async fn liveness() -> Json<Value> {
    Json(json!({
        "message": "Audio Streaming Service",
        "status": "running",
    }))
}

/// Media info for a video id, read straight from the resolver.
///
/// Unlike the catalog song record this uses raw provider fields; absent
/// fields fall back to `"Unknown"` / `0`.
pub async fn audio_info(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let info = state.resolver.resolve(&video_id).await.map_err(|e| {
        error!("Info request for {video_id} failed: {e}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": format!("Failed to get video info: {e}") })),
        )
    })?;

    Ok(Json(json!({
        "video_id": video_id,
        "title": info.title.as_deref().unwrap_or("Unknown"),
        "duration": info.duration_seconds.unwrap_or(0),
        "uploader": info.uploader.as_deref().unwrap_or("Unknown"),
        "stream_url": format!("/stream/{video_id}"),
        "youtube_url": format!("https://www.youtube.com/watch?v={video_id}"),
        "youtube_music_url": format!("https://music.youtube.com/watch?v={video_id}"),
    })))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use aurelay_core::config::RelayConfig;
    use aurelay_core::relay::StreamRelay;
    use aurelay_core::resolver::{FailingResolver, MediaInfo, StaticResolver};

    use super::*;

    fn state_with(resolver: Arc<dyn aurelay_core::resolver::MediaResolver>) -> AppState {
        AppState::new(StreamRelay::new(resolver, RelayConfig::default()))
    }

    #[tokio::test]
    async fn test_liveness_payload() {
        let body = liveness().await.0;

        assert_eq!(body["message"], "Audio Streaming Service");
        assert_eq!(body["status"], "running");
    }

    #[tokio::test]
    async fn test_audio_info_defaults_and_links() {
        let resolver = StaticResolver::new().with_answer("abc", MediaInfo {
            id: "abc".to_string(),
            title: Some("A Song".to_string()),
            duration_seconds: None,
            uploader: None,
            formats: Vec::new(),
        });
        let state = state_with(Arc::new(resolver));

        let body = audio_info(State(state), Path("abc".to_string()))
            .await
            .unwrap()
            .0;

        assert_eq!(body["video_id"], "abc");
        assert_eq!(body["title"], "A Song");
        assert_eq!(body["duration"], 0);
        assert_eq!(body["uploader"], "Unknown");
        assert_eq!(body["stream_url"], "/stream/abc");
        assert_eq!(body["youtube_url"], "https://www.youtube.com/watch?v=abc");
        assert_eq!(
            body["youtube_music_url"],
            "https://music.youtube.com/watch?v=abc"
        );
    }

    #[tokio::test]
    async fn test_audio_info_failure_is_server_error() {
        let state = state_with(Arc::new(FailingResolver));

        let err = audio_info(State(state), Path("abc".to_string()))
            .await
            .unwrap_err();

        assert_eq!(err.0, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.1.0["detail"].as_str().unwrap().contains("Failed to get video info"));
    }
}
