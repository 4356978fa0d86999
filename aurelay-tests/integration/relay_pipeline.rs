//! Relay pipeline tests: resolve, select, fetch, re-frame.

use std::sync::Arc;

use aurelay_core::config::RelayConfig;
use aurelay_core::errors::RelayError;
use aurelay_core::relay::StreamRelay;
use aurelay_core::resolver::{CandidateFormat, FailingResolver, MediaInfo, StaticResolver};
use bytes::{Bytes, BytesMut};
use futures::StreamExt;

use crate::upstream::spawn_upstream;

fn audio_format(url: &str) -> CandidateFormat {
    CandidateFormat {
        url: Some(url.to_string()),
        audio_codec: Some("opus".to_string()),
    }
}

fn video_only_format(url: &str) -> CandidateFormat {
    CandidateFormat {
        url: Some(url.to_string()),
        audio_codec: Some("none".to_string()),
    }
}

fn media_info(id: &str, formats: Vec<CandidateFormat>) -> MediaInfo {
    MediaInfo {
        id: id.to_string(),
        title: Some(format!("Track {id}")),
        duration_seconds: Some(225),
        uploader: Some("Fixture".to_string()),
        formats,
    }
}

async fn collect(stream: aurelay_core::relay::AudioStream) -> Result<Bytes, RelayError> {
    let mut stream = stream;
    let mut buf = BytesMut::new();
    while let Some(frame) = stream.next().await {
        buf.extend_from_slice(&frame?);
    }
    Ok(buf.freeze())
}

#[tokio::test]
async fn test_relay_round_trip_fidelity() {
    // Larger than one 8192-byte frame, not a multiple of it.
    let payload = Bytes::from((0..20_000u32).map(|i| (i % 251) as u8).collect::<Vec<u8>>());
    let base = spawn_upstream(vec![("track", payload.clone())]).await;

    let resolver = StaticResolver::new().with_answer(
        "vid1",
        media_info("vid1", vec![
            video_only_format(&format!("{base}/audio/ignored")),
            audio_format(&format!("{base}/audio/track")),
        ]),
    );
    let relay = StreamRelay::new(Arc::new(resolver), RelayConfig::default());

    let stream = relay.open("vid1").await.unwrap();
    let body = collect(stream).await.unwrap();

    assert_eq!(body, payload);
}

#[tokio::test]
async fn test_relay_frames_are_fixed_size() {
    let payload = Bytes::from(vec![7u8; 8192 * 2 + 100]);
    let base = spawn_upstream(vec![("track", payload)]).await;

    let resolver = StaticResolver::new().with_answer(
        "vid1",
        media_info("vid1", vec![audio_format(&format!("{base}/audio/track"))]),
    );
    let relay = StreamRelay::new(Arc::new(resolver), RelayConfig::default());

    let mut stream = relay.open("vid1").await.unwrap();
    let mut sizes = Vec::new();
    while let Some(frame) = stream.next().await {
        sizes.push(frame.unwrap().len());
    }

    assert_eq!(sizes, vec![8192, 8192, 100]);
}

#[tokio::test]
async fn test_relay_no_audio_source() {
    let base = spawn_upstream(vec![]).await;

    let resolver = StaticResolver::new().with_answer(
        "vid1",
        media_info("vid1", vec![
            video_only_format(&format!("{base}/audio/a")),
            video_only_format(&format!("{base}/audio/b")),
        ]),
    );
    let relay = StreamRelay::new(Arc::new(resolver), RelayConfig::default());

    assert!(matches!(
        relay.open("vid1").await,
        Err(RelayError::NoAudioSource { .. })
    ));
}

#[tokio::test]
async fn test_relay_resolution_failure() {
    let relay = StreamRelay::new(Arc::new(FailingResolver), RelayConfig::default());

    assert!(matches!(
        relay.open("vid1").await,
        Err(RelayError::ResolutionFailed { .. })
    ));
}

#[tokio::test]
async fn test_relay_upstream_error_status() {
    let base = spawn_upstream(vec![]).await;

    let resolver = StaticResolver::new().with_answer(
        "vid1",
        media_info("vid1", vec![audio_format(&format!("{base}/audio/missing"))]),
    );
    let relay = StreamRelay::new(Arc::new(resolver), RelayConfig::default());

    assert!(matches!(
        relay.open("vid1").await,
        Err(RelayError::UpstreamFetchFailed { .. })
    ));
}

#[tokio::test]
async fn test_relay_is_single_pass() {
    let payload = Bytes::from_static(b"single pass payload");
    let base = spawn_upstream(vec![("track", payload.clone())]).await;

    let resolver = StaticResolver::new().with_answer(
        "vid1",
        media_info("vid1", vec![audio_format(&format!("{base}/audio/track"))]),
    );
    let relay = StreamRelay::new(Arc::new(resolver), RelayConfig::default());

    // Each open is a fresh resolve + fetch; a consumed stream stays consumed.
    let first = relay.open("vid1").await.unwrap();
    assert_eq!(collect(first).await.unwrap(), payload);

    let second = relay.open("vid1").await.unwrap();
    assert_eq!(collect(second).await.unwrap(), payload);
}

#[tokio::test]
async fn test_relay_forwards_range_upstream() {
    let payload = Bytes::from_static(b"abcdefghij");
    let base = spawn_upstream(vec![("track", payload)]).await;

    let resolver = StaticResolver::new().with_answer(
        "vid1",
        media_info("vid1", vec![audio_format(&format!("{base}/audio/track"))]),
    );
    let relay = StreamRelay::new(Arc::new(resolver), RelayConfig::default());

    let stream = relay.open_with_range("vid1", Some("bytes=2-5")).await.unwrap();

    assert!(stream.is_partial());
    assert_eq!(stream.content_range.as_deref(), Some("bytes 2-5/10"));
    assert_eq!(collect(stream).await.unwrap(), Bytes::from_static(b"cdef"));
}
