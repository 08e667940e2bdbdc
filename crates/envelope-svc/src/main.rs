//! `envelope-svc` — HTTP service binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured logging (JSON by default).
//! 3. Build the encoder, decoder, and bounded crypto pool.
//! 4. Build the Axum router and serve until Ctrl-C.

mod config;
mod server;
mod telemetry;

use std::sync::Arc;

use anyhow::{Context, Result};
use envelope::{CryptoPool, Decoder, Encoder, KdfParams, OsRandom};
use tracing::info;

use config::Config;
use server::{middleware::Limits, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level, cfg.log_format()?)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        listen_port = cfg.listen_port,
        kdf_iterations = cfg.kdf_iterations,
        salt_scheme = %cfg.salt_scheme,
        max_concurrency = cfg.max_concurrency,
        request_timeout_secs = cfg.request_timeout_secs,
        "envelope-svc starting"
    );

    // -----------------------------------------------------------------------
    // 3. Crypto pool
    // -----------------------------------------------------------------------
    let kdf = KdfParams::with_iterations(cfg.kdf_iterations);
    let encoder = Encoder::new(Arc::new(OsRandom))
        .with_kdf(kdf)
        .with_salt_scheme(cfg.salt_scheme()?);
    let pool = CryptoPool::new(encoder, Decoder::new(kdf), cfg.max_concurrency);

    // -----------------------------------------------------------------------
    // 4. HTTP server
    // -----------------------------------------------------------------------
    let state = AppState::new(pool, cfg.encryption_key.clone());
    let router = server::router::build(state, Limits::new(cfg.request_timeout()));

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.listen_port).into();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("envelope-svc stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
