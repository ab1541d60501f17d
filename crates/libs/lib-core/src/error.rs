//! # Error Types
//!
//! None of these ever reach a caller of the logging API. They exist so each
//! sink can report *why* it dropped a record to the internal diagnostics
//! stream before the engine discards the failure.
//!
//! - [`StoreError`]: the key-value primitive behind the persisted buffer
//! - [`SinkError`]: any sink failing to accept a record
//! - [`ConfigError`](crate::config::ConfigError): invalid configuration

use thiserror::Error;

/// Failure of the local key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage quota exceeded writing {key}: {needed} bytes, quota {quota}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// Failure of a sink to accept a record.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("record serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("remote logging enabled without an endpoint")]
    NoEndpoint,

    #[error("no async runtime available for remote delivery")]
    NoRuntime,
}

/// Convenience alias used by sink implementations.
pub type SinkResult<T> = std::result::Result<T, SinkError>;
