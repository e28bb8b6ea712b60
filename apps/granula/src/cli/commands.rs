//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api;
use crate::config::AppConfig;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use granula_core::{
    Bucket, BucketRange, ContinuousKind, GranularityInput, GranularitySet, default_granularity,
    generate_granularity_menu, resolve_best_bucket, validate_granularity,
};

// =============================================================================
// ARGUMENT PARSING
// =============================================================================

/// Interpret `--start`/`--end` as a time range (RFC 3339) or a number range.
pub fn parse_range(start: &str, end: &str) -> Result<BucketRange, AppError> {
    if let (Ok(start), Ok(end)) = (
        DateTime::parse_from_rfc3339(start.trim()),
        DateTime::parse_from_rfc3339(end.trim()),
    ) {
        return Ok(BucketRange::time(
            start.with_timezone(&Utc),
            end.with_timezone(&Utc),
        ));
    }

    match (start.trim().parse::<f64>(), end.trim().parse::<f64>()) {
        (Ok(start), Ok(end)) => Ok(BucketRange::number(start, end)?),
        _ => Err(AppError::Input(format!(
            "range boundaries '{}' and '{}' must both be RFC 3339 timestamps or both be numbers",
            start, end
        ))),
    }
}

/// Parse an optional anchor argument.
fn parse_anchor(anchor: Option<&str>) -> Result<Option<Bucket>, AppError> {
    Ok(anchor.map(str::parse::<Bucket>).transpose()?)
}

/// Parse a comma-separated custom granularity list.
pub fn parse_custom_list(text: &str) -> Result<GranularitySet, AppError> {
    let inputs: Vec<GranularityInput> = text
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(GranularityInput::from)
        .collect();
    Ok(GranularitySet::parse_all(&inputs)?)
}

fn parse_custom(custom: Option<&str>) -> Result<Option<GranularitySet>, AppError> {
    custom.map(parse_custom_list).transpose()
}

fn print_json(output: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(output).unwrap_or_default());
}

// =============================================================================
// PARSE COMMAND
// =============================================================================

/// Parse a granularity and describe the bucket.
pub fn cmd_parse(json_mode: bool, input: &str) -> Result<(), AppError> {
    let bucket: Bucket = input.parse()?;

    if json_mode {
        print_json(&serde_json::json!({
            "bucket": bucket,
            "kind": bucket.kind(),
            "display": bucket.to_string(),
            "canonical_size": bucket.canonical_size(),
        }));
        return Ok(());
    }

    println!("Bucket:         {}", bucket);
    println!("Kind:           {}", bucket.kind());
    match bucket.kind() {
        ContinuousKind::Time => println!("Canonical size: {} ms", bucket.canonical_size()),
        ContinuousKind::Number => println!("Canonical size: {}", bucket.canonical_size()),
    }
    Ok(())
}

// =============================================================================
// RESOLVE COMMAND
// =============================================================================

/// Pick the best bucket for a range.
pub fn cmd_resolve(
    json_mode: bool,
    start: &str,
    end: &str,
    coarse: bool,
    anchor: Option<&str>,
    custom: Option<&str>,
) -> Result<(), AppError> {
    let range = parse_range(start, end)?;
    let anchor = parse_anchor(anchor)?;
    let custom = parse_custom(custom)?;

    let bucket = resolve_best_bucket(&range, coarse, anchor.as_ref(), custom.as_ref())?;
    tracing::debug!(kind = %range.kind(), length = range.length(), bucket = %bucket, "Resolved");

    if json_mode {
        print_json(&serde_json::json!({
            "range": range,
            "coarse": coarse,
            "anchor": anchor,
            "bucket": bucket,
        }));
        return Ok(());
    }

    println!("{}", bucket);
    Ok(())
}

// =============================================================================
// MENU COMMAND
// =============================================================================

/// Show the granularity menu of a kind.
pub fn cmd_menu(
    json_mode: bool,
    kind: ContinuousKind,
    anchor: Option<&str>,
    coarse: bool,
) -> Result<(), AppError> {
    let anchor = parse_anchor(anchor)?;
    let menu = generate_granularity_menu(kind, anchor.as_ref(), coarse)?;

    if json_mode {
        print_json(&serde_json::json!({
            "kind": kind,
            "anchor": anchor,
            "coarse": coarse,
            "granularities": menu,
        }));
        return Ok(());
    }

    for bucket in &menu {
        println!("{}", bucket);
    }
    Ok(())
}

// =============================================================================
// DEFAULT COMMAND
// =============================================================================

/// Show the default granularity of a dimension.
pub fn cmd_default(
    json_mode: bool,
    kind: ContinuousKind,
    anchor: Option<&str>,
    custom: Option<&str>,
) -> Result<(), AppError> {
    let anchor = parse_anchor(anchor)?;
    let custom = parse_custom(custom)?;
    let bucket = default_granularity(kind, anchor.as_ref(), custom.as_ref())?;

    if json_mode {
        print_json(&serde_json::json!({ "kind": kind, "bucket": bucket }));
        return Ok(());
    }

    println!("{}", bucket);
    Ok(())
}

// =============================================================================
// VALIDATE COMMAND
// =============================================================================

/// Validate a user-typed granularity. Invalid input exits non-zero.
pub fn cmd_validate(
    json_mode: bool,
    kind: ContinuousKind,
    granularity: &str,
) -> Result<(), AppError> {
    let result = validate_granularity(kind, granularity);

    if json_mode {
        print_json(&serde_json::json!({
            "kind": kind,
            "granularity": granularity,
            "valid": result.is_ok(),
            "error": result.as_ref().err().map(ToString::to_string),
        }));
    } else if result.is_ok() {
        println!("'{}' is a valid {} granularity", granularity, kind);
    }

    result.map_err(AppError::from)
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server. CLI flags override the configured host and port.
pub async fn cmd_server(
    mut config: AppConfig,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), AppError> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    println!("Granula Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:       {}", config.server.host);
    println!("  Port:       {}", config.server.port);
    println!("  Rate limit: {} req/s", config.server.rate_limit);
    println!("  Auth:       {}", if config.api_key().is_some() { "api key" } else { "disabled" });
    println!();
    println!("Endpoints:");
    println!("  GET  /health   - Health check");
    println!("  POST /parse    - Parse a granularity");
    println!("  POST /resolve  - Best bucket for a range");
    println!("  POST /menu     - Granularity menu");
    println!("  POST /default  - Default granularity");
    println!("  POST /validate - Validate a granularity");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", config.server.host, config.server.port);
    api::run_server(&addr, config).await
}

// =============================================================================
// TESTS
// =============================================================================
