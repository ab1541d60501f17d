//! # Telemetry Core
//!
//! Client-side structured logging for the FitTrack apps.
//!
//! - **[`logger`]**: the engine: level filtering, record construction, sink fan-out
//! - **[`sanitize`]**: recursive redaction of sensitive context keys
//! - **[`sink`]**: console, persisted ring buffer and remote delivery
//! - **[`store`]**: the local key-value primitive the buffer persists into
//! - **[`session`]** / **[`identity`]**: session and user correlation
//! - **[`diagnostics`]**: `tracing` subscriber setup for the host process
//!
//! Data flows one way: callers → [`Logger`] → sinks. Nothing in this crate
//! returns an error to, or panics into, code that is only trying to log.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod factory;
pub mod identity;
pub mod logger;
pub mod model;
pub mod runtime;
pub mod sanitize;
pub mod session;
pub mod sink;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::{ConfigError, LoggerConfig, LoggerConfigPatch};
pub use error::{SinkError, StoreError};
pub use logger::{Logger, LoggerBuilder};
pub use model::{context_of, ErrorInfo, LogFields, LogLevel, LogRecord};
pub use sanitize::{Sanitizer, REDACTED};
pub use session::SessionId;
pub use store::{default_store, FileStore, KeyValueStore, MemoryStore, CREDENTIAL_KEY, LOGS_KEY};

/// `tracing` target of records emitted by the console sink.
pub const CONSOLE_TARGET: &str = "fitlog::console";

/// `tracing` target of the engine's own diagnostics.
pub const INTERNAL_TARGET: &str = "fitlog::internal";
