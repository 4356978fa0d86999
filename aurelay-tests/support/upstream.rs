//! Local upstream fixture server for relay tests.
//!
//! Serves fixed byte blobs over HTTP, honoring single-range `Range`
//! headers the way a real media CDN would, so tests can verify both full
//! and partial relaying against known content.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Response, StatusCode, header};
use axum::routing::get;
use bytes::Bytes;

type Tracks = Arc<HashMap<String, Bytes>>;

/// Spawns an upstream fixture on an ephemeral port.
///
/// Returns the base URL; `{base}/audio/{name}` serves the registered blob.
pub async fn spawn_upstream(tracks: Vec<(&str, Bytes)>) -> String {
    let tracks: Tracks = Arc::new(
        tracks
            .into_iter()
            .map(|(name, data)| (name.to_string(), data))
            .collect(),
    );

    let app = Router::new()
        .route("/audio/{name}", get(serve_audio))
        .with_state(tracks);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

async fn serve_audio(
    State(tracks): State<Tracks>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Response<Body> {
    let Some(data) = tracks.get(&name) else {
        return Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Body::empty())
            .unwrap();
    };

    if let Some((start, end)) = requested_range(&headers, data.len() as u64) {
        let slice = data.slice(start as usize..=end as usize);
        return Response::builder()
            .status(StatusCode::PARTIAL_CONTENT)
            .header(
                header::CONTENT_RANGE,
                format!("bytes {start}-{end}/{}", data.len()),
            )
            .header(header::CONTENT_LENGTH, slice.len())
            .body(Body::from(slice))
            .unwrap();
    }

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_LENGTH, data.len())
        .body(Body::from(data.clone()))
        .unwrap()
}

/// Parses a single `bytes=start-end` range, clamped to the blob length.
fn requested_range(headers: &HeaderMap, len: u64) -> Option<(u64, u64)> {
    let raw = headers.get(header::RANGE)?.to_str().ok()?;
    let spec = raw.strip_prefix("bytes=")?;
    let (start, end) = spec.split_once('-')?;

    let start: u64 = start.parse().ok()?;
    let end: u64 = match end {
        "" => len.saturating_sub(1),
        explicit => explicit.parse::<u64>().ok()?.min(len.saturating_sub(1)),
    };

    (start <= end && start < len).then_some((start, end))
}
