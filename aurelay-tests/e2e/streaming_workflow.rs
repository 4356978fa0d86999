//! Full streaming workflow over HTTP.

use std::sync::Arc;

use aurelay_core::config::RelayConfig;
use aurelay_core::relay::StreamRelay;
use aurelay_core::resolver::{CandidateFormat, MediaInfo, StaticResolver};
use aurelay_web::{AppState, router};
use bytes::Bytes;

use crate::upstream::spawn_upstream;

fn audio_format(url: &str) -> CandidateFormat {
    CandidateFormat {
        url: Some(url.to_string()),
        audio_codec: Some("opus".to_string()),
    }
}

fn media_info(id: &str, formats: Vec<CandidateFormat>) -> MediaInfo {
    MediaInfo {
        id: id.to_string(),
        title: Some(format!("Track {id}")),
        duration_seconds: Some(225),
        uploader: Some("Fixture Channel".to_string()),
        formats,
    }
}

/// Spawns the relay service over the given resolver, returning its base URL.
async fn spawn_service(resolver: StaticResolver) -> String {
    let relay = StreamRelay::new(Arc::new(resolver), RelayConfig::default());
    let app = router(AppState::new(relay));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn patterned(len: usize, seed: u8) -> Bytes {
    Bytes::from(
        (0..len)
            .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
            .collect::<Vec<u8>>(),
    )
}

#[tokio::test]
async fn test_liveness_endpoint() {
    let base = spawn_service(StaticResolver::new()).await;

    let body: serde_json::Value = reqwest::get(format!("{base}/"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["message"], "Audio Streaming Service");
    assert_eq!(body["status"], "running");
}

#[tokio::test]
async fn test_stream_round_trip() {
    let payload = patterned(30_000, 3);
    let upstream = spawn_upstream(vec![("track", payload.clone())]).await;

    let resolver = StaticResolver::new().with_answer(
        "vid1",
        media_info("vid1", vec![audio_format(&format!(
            "{upstream}/audio/track"
        ))]),
    );
    let base = spawn_service(resolver).await;

    let response = reqwest::get(format!("{base}/stream/vid1")).await.unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "audio/mpeg"
    );
    assert_eq!(
        response.headers()["content-disposition"].to_str().unwrap(),
        "inline; filename=audio_vid1.mp3"
    );
    assert_eq!(
        response.headers()["accept-ranges"].to_str().unwrap(),
        "bytes"
    );

    let body = response.bytes().await.unwrap();
    assert_eq!(body, payload);
}

#[tokio::test]
async fn test_stream_range_request() {
    let payload = Bytes::from_static(b"0123456789");
    let upstream = spawn_upstream(vec![("track", payload)]).await;

    let resolver = StaticResolver::new().with_answer(
        "vid1",
        media_info("vid1", vec![audio_format(&format!(
            "{upstream}/audio/track"
        ))]),
    );
    let base = spawn_service(resolver).await;

    let response = reqwest::Client::new()
        .get(format!("{base}/stream/vid1"))
        .header("Range", "bytes=2-5")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 206);
    assert_eq!(
        response.headers()["content-range"].to_str().unwrap(),
        "bytes 2-5/10"
    );
    assert_eq!(response.bytes().await.unwrap(), Bytes::from_static(b"2345"));
}

#[tokio::test]
async fn test_stream_without_audio_is_not_found() {
    let resolver = StaticResolver::new().with_answer(
        "novid",
        media_info("novid", vec![CandidateFormat {
            url: Some("http://unused.invalid/video".to_string()),
            audio_codec: Some("none".to_string()),
        }]),
    );
    let base = spawn_service(resolver).await;

    let response = reqwest::get(format!("{base}/stream/novid")).await.unwrap();

    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().contains("No audio stream"));
}

#[tokio::test]
async fn test_stream_resolution_failure_is_server_error() {
    // Unknown id: the static resolver reports it missing.
    let base = spawn_service(StaticResolver::new()).await;

    let response = reqwest::get(format!("{base}/stream/ghost")).await.unwrap();

    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().contains("resolve"));
}

#[tokio::test]
async fn test_concurrent_streams_do_not_cross_contaminate() {
    let payload_a = patterned(25_000, 11);
    let payload_b = patterned(18_000, 97);
    let upstream = spawn_upstream(vec![
        ("a", payload_a.clone()),
        ("b", payload_b.clone()),
    ])
    .await;

    let resolver = StaticResolver::new()
        .with_answer(
            "vid-a",
            media_info("vid-a", vec![audio_format(&format!("{upstream}/audio/a"))]),
        )
        .with_answer(
            "vid-b",
            media_info("vid-b", vec![audio_format(&format!("{upstream}/audio/b"))]),
        );
    let base = spawn_service(resolver).await;

    let fetch = |id: &str| {
        let url = format!("{base}/stream/{id}");
        async move { reqwest::get(url).await.unwrap().bytes().await.unwrap() }
    };

    let (body_a, body_b) = tokio::join!(fetch("vid-a"), fetch("vid-b"));

    assert_eq!(body_a, payload_a);
    assert_eq!(body_b, payload_b);
}

#[tokio::test]
async fn test_info_endpoint_shape() {
    let resolver = StaticResolver::new().with_answer("vid1", media_info("vid1", Vec::new()));
    let base = spawn_service(resolver).await;

    let body: serde_json::Value = reqwest::get(format!("{base}/info/vid1"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["video_id"], "vid1");
    assert_eq!(body["title"], "Track vid1");
    assert_eq!(body["duration"], 225);
    assert_eq!(body["uploader"], "Fixture Channel");
    assert_eq!(body["stream_url"], "/stream/vid1");
    assert_eq!(body["youtube_url"], "https://www.youtube.com/watch?v=vid1");
    assert_eq!(
        body["youtube_music_url"],
        "https://music.youtube.com/watch?v=vid1"
    );
}
