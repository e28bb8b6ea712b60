//! # granula
//!
//! The Granula application: an HTTP API and a CLI over `granula-core`.
//!
//! Exposed as a library so integration tests can build the router directly.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;

pub use config::{AppConfig, LogFormat};
pub use error::AppError;
