//! Async facade that runs envelope work on a bounded blocking pool.
//!
//! PBKDF2 at 100 000 iterations is CPU-bound. Running it directly on an async
//! executor thread would stall every other task on that thread, so
//! [`CryptoPool`] moves each call onto `spawn_blocking` and caps how many run
//! at once with a semaphore.
//!
//! The permit is held by the blocking closure, not the caller's future: if the
//! caller is cancelled the work finishes in the background and the slot is
//! released afterwards. Nothing is persisted, so abandoning a call is safe.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Semaphore;

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::EnvelopeError;
use crate::secret::SharedSecret;

#[derive(Debug, Clone)]
pub struct CryptoPool {
    encoder: Encoder,
    decoder: Decoder,
    permits: Arc<Semaphore>,
    max_concurrency: usize,
}

impl CryptoPool {
    /// `max_concurrency` is clamped to at least 1.
    pub fn new(encoder: Encoder, decoder: Decoder, max_concurrency: usize) -> Self {
        let max_concurrency = max_concurrency.max(1);
        Self {
            encoder,
            decoder,
            permits: Arc::new(Semaphore::new(max_concurrency)),
            max_concurrency,
        }
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Slots currently free.
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    /// [`Encoder::encode`] on the blocking pool.
    pub async fn encode<T>(&self, value: T, secret: &SharedSecret) -> Result<String, EnvelopeError>
    where
        T: Serialize + Send + 'static,
    {
        let encoder = self.encoder.clone();
        let secret = secret.clone();
        self.run(move || encoder.encode(&value, secret.expose())).await
    }

    /// [`Decoder::decode`] on the blocking pool.
    pub async fn decode<T>(&self, envelope: String, secret: &SharedSecret) -> Result<T, EnvelopeError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let decoder = self.decoder.clone();
        let secret = secret.clone();
        self.run(move || decoder.decode(&envelope, secret.expose())).await
    }

    async fn run<F, R>(&self, work: F) -> Result<R, EnvelopeError>
    where
        F: FnOnce() -> Result<R, EnvelopeError> + Send + 'static,
        R: Send + 'static,
    {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|_| EnvelopeError::Primitive("crypto pool closed".into()))?;

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            work()
        })
        .await
        .map_err(|e| EnvelopeError::Primitive(format!("crypto worker failed: {e}")))?
    }
}
