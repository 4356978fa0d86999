//! CLI command implementations

use std::sync::Arc;

use anyhow::Context;
use aurelay_catalog::{CatalogService, HttpCatalogProvider};
use aurelay_catalog::service::CLI_SEARCH_LIMIT;
use aurelay_core::config::{AurelayConfig, ResolverConfig, ServerConfig};
use aurelay_core::relay::StreamRelay;
use aurelay_core::resolver::HttpResolver;
use aurelay_web::{AppState, run_server};
use clap::Subcommand;

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Search the catalog for songs
    Search {
        /// Search query
        query: String,
        /// Maximum number of results
        #[arg(default_value_t = CLI_SEARCH_LIMIT)]
        limit: usize,
    },
    /// Show trending songs for a region
    Charts {
        /// Two-letter region code
        #[arg(default_value = "ID")]
        region: String,
    },
    /// Look up one song by video id
    Song {
        /// Video id to look up
        video_id: String,
    },
    /// Run the audio streaming server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        /// Port to bind to
        #[arg(short, long, default_value = "8001")]
        port: u16,
        /// Base URL of the external media resolver
        #[arg(long, default_value = "http://127.0.0.1:9050")]
        resolver_url: String,
    },
}

/// Handle the CLI command
///
/// # Errors
/// Returns an error when JSON output cannot be produced or the server
/// fails to start. Catalog unavailability is not an error: it yields
/// empty results.
pub async fn handle_command(command: Commands, catalog_url: &str) -> anyhow::Result<()> {
    match command {
        Commands::Search { query, limit } => {
            let service = catalog_service(catalog_url);
            let songs = service.search_songs(&query, limit).await;
            print_json(&serde_json::json!({ "songs": songs }))
        }
        Commands::Charts { region } => {
            let service = catalog_service(catalog_url);
            let songs = service.trending(&region).await;
            print_json(&serde_json::json!({ "songs": songs }))
        }
        Commands::Song { video_id } => {
            let service = catalog_service(catalog_url);
            let song = service.song_details(&video_id).await;
            print_json(&serde_json::json!({ "song": song }))
        }
        Commands::Serve {
            host,
            port,
            resolver_url,
        } => serve(host, port, resolver_url).await,
    }
}

fn catalog_service(catalog_url: &str) -> CatalogService {
    CatalogService::new(Box::new(HttpCatalogProvider::new(catalog_url)))
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    let rendered = serde_json::to_string(value).context("failed to render JSON output")?;
    println!("{rendered}");
    Ok(())
}

async fn serve(host: String, port: u16, resolver_url: String) -> anyhow::Result<()> {
    let config = AurelayConfig {
        resolver: ResolverConfig {
            base_url: resolver_url,
            ..ResolverConfig::default()
        },
        server: ServerConfig { host, port },
        ..AurelayConfig::default()
    };

    let resolver = Arc::new(HttpResolver::new(&config.resolver));
    let relay = StreamRelay::new(resolver, config.relay.clone());
    let state = AppState::new(relay);

    run_server(&config.server, state)
        .await
        .map_err(|e| anyhow::anyhow!("server failed: {e}"))
}
