//! Shared service error and protocol types for the credential envelope workspace.

pub mod error;
pub mod protocol;

pub use error::ServiceError;
