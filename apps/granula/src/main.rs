//! # Granula - Granularity Server
//!
//! The main binary for the Granula granularity resolution engine.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface for one-off resolutions
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │            apps/granula (THE BINARY)          │
//! │                                               │
//! │   ┌─────────────┐         ┌─────────────┐     │
//! │   │    CLI      │         │  HTTP API   │     │
//! │   │   (clap)    │         │   (axum)    │     │
//! │   └──────┬──────┘         └──────┬──────┘     │
//! │          └───────────┬───────────┘            │
//! │                      ▼                        │
//! │              ┌───────────────┐                │
//! │              │ granula-core  │                │
//! │              │  (THE LOGIC)  │                │
//! │              └───────────────┘                │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! granula server --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! granula resolve --start 2024-01-01T00:00:00Z --end 2024-02-01T00:00:00Z
//! granula menu --kind number --anchor 100
//! granula validate --kind time PT15M
//! ```

use clap::Parser;
use granula::cli;
use granula::config::{AppConfig, LogFormat};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Configuration decides the log format, so it is loaded first.
    let config = AppConfig::load(cli.config.as_deref());
    let log_format = config.as_ref().map(|c| c.log_format).unwrap_or_default();
    init_tracing(log_format);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Banner only for the server, and never in JSON mode.
    if !cli.quiet && !cli.json_mode && matches!(cli.command, cli::Commands::Server { .. }) {
        print_banner();
    }

    if let Err(e) = cli::execute(cli, config).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` selects levels; the default is `granula=info,tower_http=debug`.
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "granula=info,tower_http=debug".into());

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Print the Granula startup banner.
fn print_banner() {
    println!(
        r#"
   ____                       _
  / ___|_ __ __ _ _ __  _   _| | __ _
 | |  _| '__/ _` | '_ \| | | | |/ _` |
 | |_| | | | (_| | | | | |_| | | (_| |
  \____|_|  \__,_|_| |_|\__,_|_|\__,_|

  Granularity Server v{}

  Buckets that fit the range
"#,
        env!("CARGO_PKG_VERSION")
    );
}
