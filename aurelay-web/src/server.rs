//! Axum server wiring for the audio relay service.

use std::sync::Arc;

use aurelay_core::config::ServerConfig;
use aurelay_core::relay::StreamRelay;
use aurelay_core::resolver::MediaResolver;
use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::handlers::{audio_info, liveness, stream_audio};

/// Shared application state.
///
/// Everything here is either immutable or internally synchronized; no
/// request-scoped data lives in the state, so concurrent requests never
/// contend on it.
#[derive(Clone)]
pub struct AppState {
    /// Streaming relay shared by all stream requests
    pub relay: Arc<StreamRelay>,
    /// Resolver backing the info endpoint (same instance the relay uses)
    pub resolver: Arc<dyn MediaResolver>,
}

impl AppState {
    /// Builds state around a relay, sharing its resolver with the info
    /// endpoint.
    pub fn new(relay: StreamRelay) -> Self {
        let resolver = relay.resolver();
        Self {
            relay: Arc::new(relay),
            resolver,
        }
    }
}

/// Builds the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/stream/{video_id}", get(stream_audio))
        .route("/info/{video_id}", get(audio_info))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Runs the server until the listener fails or the process is stopped.
///
/// # Errors
/// Returns an error when the bind address is unusable or the listener dies.
pub async fn run_server(
    config: &ServerConfig,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Audio streaming service listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
