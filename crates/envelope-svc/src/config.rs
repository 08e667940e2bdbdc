//! Configuration loading and validation for the envelope service.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any required variable is missing or invalid.

use std::time::Duration;

use anyhow::{Context, Result};
use envelope::{SaltScheme, SharedSecret, DEFAULT_ITERATIONS};
use serde::Deserialize;

use crate::telemetry::{self, LogFormat};

/// Validated service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Shared secret every envelope key is derived from. **Required.**
    pub encryption_key: SharedSecret,

    /// Port the HTTP server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// PBKDF2 iteration count. Must match the value existing envelopes were
    /// sealed with.
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,

    /// Salt scheme for new envelopes: `decimal` or `random`.
    #[serde(default = "default_salt_scheme")]
    pub salt_scheme: String,

    /// Maximum number of concurrent encode/decode operations.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log line encoding: `json` or `text`.
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Upper bound on one request, queueing included.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_listen_port() -> u16 {
    8080
}
fn default_kdf_iterations() -> u32 {
    DEFAULT_ITERATIONS
}
fn default_salt_scheme() -> String {
    "decimal".into()
}
fn default_max_concurrency() -> usize {
    4
}
fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> String {
    "json".into()
}
fn default_request_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Parsed form of [`Config::salt_scheme`].
    pub fn salt_scheme(&self) -> Result<SaltScheme> {
        self.salt_scheme
            .parse()
            .map_err(|e: String| anyhow::anyhow!("SALT_SCHEME: {e}"))
    }

    /// Parsed form of [`Config::log_format`].
    pub fn log_format(&self) -> Result<LogFormat> {
        self.log_format
            .parse()
            .map_err(|e: String| anyhow::anyhow!("LOG_FORMAT: {e}"))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.encryption_key.is_empty() {
            anyhow::bail!("ENCRYPTION_KEY is required and must not be empty");
        }
        if self.kdf_iterations == 0 {
            anyhow::bail!("KDF_ITERATIONS must be > 0");
        }
        if self.max_concurrency == 0 {
            anyhow::bail!("MAX_CONCURRENCY must be > 0");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be > 0");
        }
        self.salt_scheme()?;
        self.log_format()?;
        telemetry::parse_filter(&self.log_level).context("LOG_LEVEL")?;
        Ok(())
    }
}
