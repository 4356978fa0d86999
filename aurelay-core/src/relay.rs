//! Streaming relay: bridges an upstream audio fetch to a downstream body.
//!
//! The relay opens two network legs per request: a resolution call against
//! the media provider, then a streaming GET against the selected source.
//! Upstream bytes are re-framed into fixed-size chunks and pushed through a
//! bounded channel, so downstream backpressure throttles the upstream read
//! and a dropped consumer releases the upstream connection promptly.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use reqwest::StatusCode;
use reqwest::header;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::config::RelayConfig;
use crate::errors::RelayError;
use crate::resolver::MediaResolver;
use crate::selector::select_audio_source;

/// Streaming relay service.
///
/// Stateless across requests: every call to [`StreamRelay::open`] resolves
/// and fetches from scratch. Nothing is cached or shared between requests
/// beyond the HTTP client's connection pool.
#[derive(Debug, Clone)]
pub struct StreamRelay {
    resolver: Arc<dyn MediaResolver>,
    client: reqwest::Client,
    config: RelayConfig,
}

/// A single-pass chunked audio stream.
///
/// Yields fixed-size byte frames in upstream order; the final frame may be
/// shorter. Once consumed it cannot be restarted - open a new relay instead.
/// A mid-transfer upstream failure surfaces as `Err(StreamInterrupted)`
/// after any already-delivered frames.
#[derive(Debug)]
pub struct AudioStream {
    rx: mpsc::Receiver<Result<Bytes, RelayError>>,
    /// Upstream `Content-Length`, when advertised
    pub content_length: Option<u64>,
    /// Upstream `Content-Range`, present when the upstream honored a
    /// forwarded range request with `206 Partial Content`
    pub content_range: Option<String>,
}

impl AudioStream {
    /// Whether this stream carries a partial (range) response.
    pub fn is_partial(&self) -> bool {
        self.content_range.is_some()
    }
}

impl Stream for AudioStream {
    type Item = Result<Bytes, RelayError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl StreamRelay {
    /// Creates a relay over the given resolver.
    pub fn new(resolver: Arc<dyn MediaResolver>, config: RelayConfig) -> Self {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent);
        if let Some(timeout) = config.upstream_timeout {
            builder = builder.timeout(timeout);
        }

        Self {
            resolver,
            client: builder.build().unwrap_or_default(),
            config,
        }
    }

    /// Access to the underlying resolver, shared with the info endpoint.
    pub fn resolver(&self) -> Arc<dyn MediaResolver> {
        Arc::clone(&self.resolver)
    }

    /// Opens a full audio stream for a video id.
    ///
    /// # Errors
    /// - `RelayError::ResolutionFailed` - Provider resolution call errored
    /// - `RelayError::NoAudioSource` - No candidate format carried audio
    /// - `RelayError::UpstreamFetchFailed` - Selected URL unreachable or non-2xx
    pub async fn open(&self, video_id: &str) -> Result<AudioStream, RelayError> {
        self.open_with_range(video_id, None).await
    }

    /// Opens an audio stream, forwarding a client `Range` header upstream.
    ///
    /// When the upstream honors the range with `206 Partial Content`, the
    /// returned stream carries the upstream `Content-Range` so the HTTP
    /// layer can commit a matching partial response.
    ///
    /// # Errors
    /// Same as [`StreamRelay::open`].
    pub async fn open_with_range(
        &self,
        video_id: &str,
        range: Option<&str>,
    ) -> Result<AudioStream, RelayError> {
        let info = self.resolver.resolve(video_id).await.map_err(|e| {
            warn!("Resolution failed for {video_id}: {e}");
            RelayError::ResolutionFailed {
                reason: e.to_string(),
            }
        })?;

        let source = select_audio_source(&info.formats)
            .ok_or_else(|| RelayError::NoAudioSource {
                video_id: video_id.to_string(),
            })?
            .to_string();

        debug!(
            "Selected audio source for {video_id} among {} candidates",
            info.formats.len()
        );

        let mut request = self.client.get(&source);
        if let Some(range) = range {
            request = request.header(header::RANGE, range);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RelayError::UpstreamFetchFailed {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::UpstreamFetchFailed {
                reason: format!("upstream answered with status {status}"),
            });
        }

        let content_range = (status == StatusCode::PARTIAL_CONTENT)
            .then(|| {
                response
                    .headers()
                    .get(header::CONTENT_RANGE)
                    .and_then(|v| v.to_str().ok())
                    .map(String::from)
            })
            .flatten();
        let content_length = response.content_length();

        let (tx, rx) = mpsc::channel(self.config.channel_capacity);
        let chunk_size = self.config.chunk_size;
        tokio::spawn(pump(Box::pin(response.bytes_stream()), tx, chunk_size));

        Ok(AudioStream {
            rx,
            content_length,
            content_range,
        })
    }
}

/// Reads the upstream body and re-frames it into fixed-size chunks.
///
/// Stops reading as soon as the receiver is dropped, which also drops the
/// upstream connection. Zero-length upstream reads contribute nothing and
/// are never forwarded.
async fn pump<S, E>(mut upstream: S, tx: mpsc::Sender<Result<Bytes, RelayError>>, chunk_size: usize)
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: std::fmt::Display,
{
    let mut pending = BytesMut::with_capacity(chunk_size);

    while let Some(read) = upstream.next().await {
        match read {
            Ok(chunk) => {
                pending.extend_from_slice(&chunk);
                while pending.len() >= chunk_size {
                    let frame = pending.split_to(chunk_size).freeze();
                    if tx.send(Ok(frame)).await.is_err() {
                        // Downstream client went away: stop reading upstream.
                        debug!("Relay consumer dropped, releasing upstream connection");
                        return;
                    }
                }
            }
            Err(e) => {
                warn!("Upstream read failed mid-transfer: {e}");
                let _ = tx
                    .send(Err(RelayError::StreamInterrupted {
                        reason: e.to_string(),
                    }))
                    .await;
                return;
            }
        }
    }

    if !pending.is_empty() {
        let _ = tx.send(Ok(pending.freeze())).await;
    }
}

#[cfg(test)]
mod tests {
    use futures::stream;

    use super::*;

    async fn run_pump(
        chunks: Vec<Result<Bytes, String>>,
        chunk_size: usize,
        capacity: usize,
    ) -> Vec<Result<Bytes, RelayError>> {
        let (tx, mut rx) = mpsc::channel(capacity);
        tokio::spawn(pump(stream::iter(chunks), tx, chunk_size));

        let mut out = Vec::new();
        while let Some(item) = rx.recv().await {
            out.push(item);
        }
        out
    }

    #[tokio::test]
    async fn test_reframes_to_fixed_chunks() {
        // 5 + 3 + 4 bytes with frame size 4 -> 4, 4, 4 bytes.
        let chunks = vec![
            Ok(Bytes::from_static(b"aaaaa")),
            Ok(Bytes::from_static(b"bbb")),
            Ok(Bytes::from_static(b"cccc")),
        ];

        let frames = run_pump(chunks, 4, 8).await;
        let frames: Vec<Bytes> = frames.into_iter().map(|f| f.unwrap()).collect();

        assert_eq!(frames, vec![
            Bytes::from_static(b"aaaa"),
            Bytes::from_static(b"abbb"),
            Bytes::from_static(b"cccc"),
        ]);
    }

    #[tokio::test]
    async fn test_short_final_frame() {
        let chunks = vec![Ok(Bytes::from_static(b"aaaabb"))];

        let frames = run_pump(chunks, 4, 8).await;
        let frames: Vec<Bytes> = frames.into_iter().map(|f| f.unwrap()).collect();

        assert_eq!(
            frames,
            vec![Bytes::from_static(b"aaaa"), Bytes::from_static(b"bb")]
        );
    }

    #[tokio::test]
    async fn test_empty_reads_are_filtered() {
        let chunks = vec![
            Ok(Bytes::new()),
            Ok(Bytes::from_static(b"xy")),
            Ok(Bytes::new()),
        ];

        let frames = run_pump(chunks, 4, 8).await;
        let frames: Vec<Bytes> = frames.into_iter().map(|f| f.unwrap()).collect();

        assert_eq!(frames, vec![Bytes::from_static(b"xy")]);
    }

    #[tokio::test]
    async fn test_mid_transfer_error_preserves_prefix() {
        let chunks = vec![
            Ok(Bytes::from_static(b"aaaa")),
            Err("connection reset".to_string()),
        ];

        let frames = run_pump(chunks, 4, 8).await;

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].as_ref().unwrap(), &Bytes::from_static(b"aaaa"));
        assert!(matches!(
            frames[1],
            Err(RelayError::StreamInterrupted { .. })
        ));
    }

    #[tokio::test]
    async fn test_dropped_receiver_stops_pump() {
        let (tx, rx) = mpsc::channel(1);
        let chunks: Vec<Result<Bytes, String>> = (0..64)
            .map(|_| Ok(Bytes::from_static(&[0u8; 1024])))
            .collect();

        let handle = tokio::spawn(pump(stream::iter(chunks), tx, 512));
        drop(rx);

        // The pump must exit on its own once the receiver is gone.
        handle.await.unwrap();
    }
}
