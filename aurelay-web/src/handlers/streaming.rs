//! Audio streaming handler.
//!
//! Relay failures before the first body byte map to an HTTP status with a
//! JSON detail. Once the response is committed, a mid-transfer upstream
//! failure can only truncate the body; the status cannot change anymore.

use aurelay_core::errors::RelayError;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Response, StatusCode, header};
use tracing::{error, info};

use crate::server::AppState;

/// Relays the audio stream for a video id.
///
/// A client `Range` header is forwarded upstream verbatim; when the
/// upstream honors it the response is `206` with the upstream
/// `Content-Range`, otherwise a full `200` stream.
pub async fn stream_audio(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    headers: HeaderMap,
) -> Response<Body> {
    let range = headers
        .get(header::RANGE)
        .and_then(|value| value.to_str().ok());

    let stream = match state.relay.open_with_range(&video_id, range).await {
        Ok(stream) => stream,
        Err(e) => return relay_error_response(&video_id, &e),
    };

    info!(
        "Streaming audio for {video_id} (partial: {}, length: {:?})",
        stream.is_partial(),
        stream.content_length
    );

    let status = if stream.is_partial() {
        StatusCode::PARTIAL_CONTENT
    } else {
        StatusCode::OK
    };

    let mut builder = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "audio/mpeg")
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=audio_{video_id}.mp3"),
        )
        .header(header::ACCEPT_RANGES, "bytes")
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*");

    if let Some(length) = stream.content_length {
        builder = builder.header(header::CONTENT_LENGTH, length);
    }
    if let Some(content_range) = &stream.content_range {
        builder = builder.header(header::CONTENT_RANGE, content_range);
    }

    builder.body(Body::from_stream(stream)).unwrap()
}

/// Maps a pre-stream relay failure to its outward status.
fn relay_error_response(video_id: &str, e: &RelayError) -> Response<Body> {
    let status = match e {
        RelayError::NoAudioSource { .. } => StatusCode::NOT_FOUND,
        RelayError::UpstreamFetchFailed { .. } => StatusCode::BAD_GATEWAY,
        RelayError::ResolutionFailed { .. } | RelayError::StreamInterrupted { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    error!("Stream request for {video_id} failed: {e}");

    let detail = serde_json::json!({ "detail": e.to_string() });
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(detail.to_string()))
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_audio_maps_to_not_found() {
        let response = relay_error_response(
            "abc",
            &RelayError::NoAudioSource {
                video_id: "abc".to_string(),
            },
        );

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_upstream_failure_maps_to_bad_gateway() {
        let response = relay_error_response(
            "abc",
            &RelayError::UpstreamFetchFailed {
                reason: "status 503".to_string(),
            },
        );

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_resolution_failure_maps_to_server_error() {
        let response = relay_error_response(
            "abc",
            &RelayError::ResolutionFailed {
                reason: "provider down".to_string(),
            },
        );

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
