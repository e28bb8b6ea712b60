//! # Granula CLI Module
//!
//! This module implements the CLI interface for Granula.
//!
//! ## Available Commands
//!
//! - `parse` - Parse a granularity into a bucket
//! - `resolve` - Best bucket for a range
//! - `menu` - Granularity menu for a kind
//! - `default` - Default granularity of a dimension
//! - `validate` - Validate a user-typed granularity
//! - `server` - Start the HTTP server

mod commands;

use crate::config::AppConfig;
use crate::error::AppError;
use clap::{Parser, Subcommand};
use granula_core::ContinuousKind;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Granula - granularity resolution for time and number dimensions
///
/// Picks the bucket a range of data should be grouped by, and the
/// alternatives worth offering.
#[derive(Parser, Debug)]
#[command(name = "granula")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a granularity (number or ISO-8601 duration)
    Parse {
        /// The granularity, e.g. `PT1H` or `25`
        input: String,
    },

    /// Pick the best bucket for a range
    Resolve {
        /// Range start: an RFC 3339 timestamp or a number
        #[arg(short, long, allow_hyphen_values = true)]
        start: String,

        /// Range end: an RFC 3339 timestamp or a number
        #[arg(short, long, allow_hyphen_values = true)]
        end: String,

        /// Prefer sparser buckets
        #[arg(long)]
        coarse: bool,

        /// Bucket the data is already aggregated to
        #[arg(short, long)]
        anchor: Option<String>,

        /// Custom granularities, ascending and comma-separated
        #[arg(long)]
        custom: Option<String>,
    },

    /// Show the granularity menu for a kind
    Menu {
        /// Dimension kind (time, number)
        #[arg(short, long)]
        kind: ContinuousKind,

        /// Bucket the data is already aggregated to
        #[arg(short, long)]
        anchor: Option<String>,

        /// Show the coarse menu
        #[arg(long)]
        coarse: bool,
    },

    /// Show the default granularity of a dimension
    Default {
        /// Dimension kind (time, number)
        #[arg(short, long)]
        kind: ContinuousKind,

        /// Bucket the data is already aggregated to
        #[arg(short, long)]
        anchor: Option<String>,

        /// Custom granularities, ascending and comma-separated
        #[arg(long)]
        custom: Option<String>,
    },

    /// Validate a user-typed granularity
    Validate {
        /// Dimension kind (time, number)
        #[arg(short, long)]
        kind: ContinuousKind,

        /// The granularity to check
        granularity: String,
    },

    /// Start HTTP server
    Server {
        /// Host to bind to (overrides the configuration)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides the configuration)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments and loaded configuration.
pub async fn execute(cli: Cli, config: AppConfig) -> Result<(), AppError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Commands::Parse { input } => cmd_parse(json_mode, &input),
        Commands::Resolve {
            start,
            end,
            coarse,
            anchor,
            custom,
        } => cmd_resolve(
            json_mode,
            &start,
            &end,
            coarse,
            anchor.as_deref(),
            custom.as_deref(),
        ),
        Commands::Menu {
            kind,
            anchor,
            coarse,
        } => cmd_menu(json_mode, kind, anchor.as_deref(), coarse),
        Commands::Default {
            kind,
            anchor,
            custom,
        } => cmd_default(json_mode, kind, anchor.as_deref(), custom.as_deref()),
        Commands::Validate { kind, granularity } => cmd_validate(json_mode, kind, &granularity),
        Commands::Server { host, port } => cmd_server(config, host, port).await,
    }
}

// =============================================================================
// TESTS
// =============================================================================
