//! Tracing subscriber setup for the envelope service.
//!
//! The shared secret, derived keys and decrypted values never appear in any
//! log field. Envelope errors are logged by kind only.

use std::str::FromStr;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Output encoding for log lines, selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event, fields flattened to the top level.
    #[default]
    Json,
    /// Human-readable single-line output for local runs.
    Text,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            other => Err(format!("unknown log format {other:?}, expected json or text")),
        }
    }
}

/// Parse a filter directive such as `info` or `envelope=debug,tower_http=warn`.
pub fn parse_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives).with_context(|| format!("invalid log filter {directives:?}"))
}

/// Install the global subscriber. A set `RUST_LOG` takes precedence over
/// `log_level`.
///
/// # Errors
///
/// Fails if either filter is unparsable or a subscriber is already installed.
pub fn init(log_level: &str, format: LogFormat) -> Result<()> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.trim().is_empty() => parse_filter(&directives)?,
        _ => parse_filter(log_level)?,
    };

    let output = match format {
        LogFormat::Json => fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .boxed(),
        LogFormat::Text => fmt::layer().with_target(false).boxed(),
    };

    tracing_subscriber::registry()
        .with(output)
        .with(filter)
        .try_init()
        .context("tracing subscriber already installed")
}
