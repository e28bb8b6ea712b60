//! # Application Errors
//!
//! Failures of the binary: engine errors plus configuration and I/O.

use granula_core::GranularityError;
use thiserror::Error;

/// Errors surfaced by CLI commands and the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// The engine rejected the request.
    #[error(transparent)]
    Granularity(#[from] GranularityError),

    /// The configuration file or an override is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A command-line argument could not be interpreted.
    #[error("Invalid input: {0}")]
    Input(String),

    /// Binding or serving failed.
    #[error("I/O error: {0}")]
    Io(String),
}
