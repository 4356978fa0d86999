//! Aurelay CLI - Command-line interface
//!
//! Catalog commands print a single JSON document on stdout; logs go to
//! stderr so the output stays machine-readable. Usage errors are reported
//! the same way, as `{"error": ...}` with a non-zero exit code.

mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aurelay")]
#[command(about = "An audio relay and music catalog service")]
struct Cli {
    /// Base URL of the external catalog endpoint
    #[arg(long, default_value = "http://127.0.0.1:9060", global = true)]
    catalog_url: String,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            println!("{}", serde_json::json!({ "error": e.to_string() }));
            std::process::exit(1);
        }
    };

    if let Err(e) = commands::handle_command(cli.command, &cli.catalog_url).await {
        println!("{}", serde_json::json!({ "error": e.to_string() }));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Commands;

    #[test]
    fn test_search_takes_positional_limit() {
        let cli = Cli::try_parse_from(["aurelay", "search", "foo", "20"]).unwrap();

        match cli.command {
            Commands::Search { query, limit } => {
                assert_eq!(query, "foo");
                assert_eq!(limit, 20);
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_search_limit_defaults_to_ten() {
        let cli = Cli::try_parse_from(["aurelay", "search", "foo"]).unwrap();

        match cli.command {
            Commands::Search { limit, .. } => assert_eq!(limit, 10),
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_charts_takes_positional_region() {
        let cli = Cli::try_parse_from(["aurelay", "charts", "US"]).unwrap();

        match cli.command {
            Commands::Charts { region } => assert_eq!(region, "US"),
            _ => panic!("expected charts command"),
        }
    }

    #[test]
    fn test_charts_region_defaults_to_id() {
        let cli = Cli::try_parse_from(["aurelay", "charts"]).unwrap();

        match cli.command {
            Commands::Charts { region } => assert_eq!(region, "ID"),
            _ => panic!("expected charts command"),
        }
    }

    #[test]
    fn test_unknown_command_is_a_parse_error() {
        assert!(Cli::try_parse_from(["aurelay", "bogus"]).is_err());
        assert!(Cli::try_parse_from(["aurelay", "song"]).is_err());
    }
}
