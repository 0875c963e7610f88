//! Common error types for the storefront core

use thiserror::Error;

/// Common result type for storefront operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the storefront crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored or supplied text could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Durable storage refused a write because it is full
    #[error("Storage quota exceeded: {needed} bytes needed, {quota} byte quota")]
    QuotaExceeded { needed: usize, quota: usize },
}
