//! # Logger Engine
//!
//! Filters by level, builds each accepted record once, and fans it out to
//! the sinks the live configuration enables.
//!
//! ```rust,no_run
//! use lib_core::{Logger, LoggerConfig, LogLevel};
//! use serde_json::json;
//!
//! let logger = Logger::new(LoggerConfig {
//!     min_level: LogLevel::Info,
//!     ..Default::default()
//! });
//!
//! logger.info("Workout saved", Some(json!({"exercises": 6})));
//! logger.debug("dropped before any sink runs", None);
//! ```
//!
//! No method here returns an error or panics into the caller. A sink that
//! fails is reported under the `fitlog::internal` target and skipped; the
//! other sinks still receive the record.

use parking_lot::RwLock;
use serde_json::Value;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::config::{LoggerConfig, LoggerConfigPatch};
use crate::factory::RecordFactory;
use crate::model::{ErrorInfo, LogFields, LogLevel, LogRecord};
use crate::sanitize::Sanitizer;
use crate::session::SessionId;
use crate::sink::{ConsoleSink, LogSink, RemoteSink, RingBuffer};
use crate::store::{default_store, KeyValueStore};
use crate::INTERNAL_TARGET;


/// Configuration plus the sanitizer derived from it, swapped as one unit.
struct EngineState {
    config: LoggerConfig,
    sanitizer: Sanitizer,
}

impl EngineState {
    fn new(config: LoggerConfig) -> Self {
        if let Err(e) = config.validate() {
            tracing::warn!(
                target: INTERNAL_TARGET,
                error = %e,
                "Logger configuration is invalid; affected sinks will drop records"
            );
        }

        let sanitizer = Sanitizer::new(&config.sensitive_keys);
        Self { config, sanitizer }
    }
}

pub struct Logger {
    factory: RecordFactory,
    state: RwLock<Arc<EngineState>>,
    buffer: RingBuffer,
    sinks: Vec<Arc<dyn LogSink>>,
}

/// Construction options beyond [`LoggerConfig`].
#[derive(Clone)]
pub struct LoggerBuilder {
    config: LoggerConfig,
    store: Option<Arc<dyn KeyValueStore>>,
    session: Option<SessionId>,
    remote: Option<RemoteSink>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new(LoggerConfig::default())
    }
}

impl LoggerBuilder {
    pub fn new(config: LoggerConfig) -> Self {
        Self {
            config,
            store: None,
            session: None,
            remote: None,
        }
    }

    /// Store for the persisted buffer and the credential lookup.
    /// Defaults to [`default_store`].
    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Share an existing session identity instead of minting one.
    pub fn session(mut self, session: SessionId) -> Self {
        self.session = Some(session);
        self
    }

    pub fn remote(mut self, remote: RemoteSink) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Apply a partial config on top of the current one.
    pub fn patch(mut self, patch: LoggerConfigPatch) -> Self {
        self.config = self.config.merged(patch);
        self
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    pub fn build(self) -> Logger {
        let store = self.store.unwrap_or_else(default_store);
        let session = self.session.unwrap_or_else(SessionId::generate);
        let buffer = RingBuffer::new(store.clone());

        let sinks: Vec<Arc<dyn LogSink>> = vec![
            Arc::new(ConsoleSink::new()),
            Arc::new(buffer.clone()),
            Arc::new(self.remote.unwrap_or_default()),
        ];

        Logger {
            factory: RecordFactory::new(session, store),
            state: RwLock::new(Arc::new(EngineState::new(self.config))),
            buffer,
            sinks,
        }
    }
}

impl Logger {
    /// Logger with its own session, backed by the process-wide store.
    pub fn new(config: LoggerConfig) -> Self {
        LoggerBuilder::new(config).build()
    }

    pub fn builder(config: LoggerConfig) -> LoggerBuilder {
        LoggerBuilder::new(config)
    }

    /// Filter, build and dispatch one record.
    pub fn log(&self, level: LogLevel, message: &str, fields: LogFields) {
        let state = self.state.read().clone();
        if level < state.config.min_level {
            return;
        }

        let sanitizer = (!state.config.include_sensitive_data).then_some(&state.sanitizer);
        let record = self.factory.build(level, message, fields, sanitizer);
        self.dispatch(&record, &state.config);
    }

    fn dispatch(&self, record: &LogRecord, config: &LoggerConfig) {
        for sink in self.sinks.iter().filter(|s| config.sink_enabled(s.kind())) {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| sink.write(record, config)));
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::debug!(
                    target: INTERNAL_TARGET,
                    sink = %sink.kind(),
                    error = %e,
                    "Log sink dropped a record"
                ),
                Err(_) => tracing::warn!(
                    target: INTERNAL_TARGET,
                    sink = %sink.kind(),
                    "Log sink panicked"
                ),
            }
        }
    }

    pub fn debug(&self, message: &str, context: Option<Value>) {
        self.log(LogLevel::Debug, message, LogFields::new().maybe_context(context));
    }

    pub fn info(&self, message: &str, context: Option<Value>) {
        self.log(LogLevel::Info, message, LogFields::new().maybe_context(context));
    }

    pub fn warn(&self, message: &str, context: Option<Value>) {
        self.log(LogLevel::Warn, message, LogFields::new().maybe_context(context));
    }

    pub fn error(&self, message: &str, error: Option<ErrorInfo>, context: Option<Value>) {
        self.log(LogLevel::Error, message, with_error(error, context));
    }

    pub fn fatal(&self, message: &str, error: Option<ErrorInfo>, context: Option<Value>) {
        self.log(LogLevel::Fatal, message, with_error(error, context));
    }

    pub fn session_id(&self) -> &SessionId {
        self.factory.session()
    }

    /// Current persisted collection, oldest first. Empty if unreadable.
    pub fn get_logs(&self) -> Vec<LogRecord> {
        self.buffer.read_all().unwrap_or_else(|e| {
            tracing::debug!(target: INTERNAL_TARGET, error = %e, "Reading stored logs failed");
            Vec::new()
        })
    }

    pub fn clear_logs(&self) {
        if let Err(e) = self.buffer.clear() {
            tracing::debug!(target: INTERNAL_TARGET, error = %e, "Clearing stored logs failed");
        }
    }

    /// Merge `patch` into the live configuration.
    pub fn set_config(&self, patch: LoggerConfigPatch) {
        let mut state = self.state.write();
        let next = state.config.merged(patch);
        *state = Arc::new(EngineState::new(next));
    }

    /// Snapshot of the live configuration.
    pub fn config(&self) -> LoggerConfig {
        self.state.read().config.clone()
    }
}

fn with_error(error: Option<ErrorInfo>, context: Option<Value>) -> LogFields {
    LogFields {
        error,
        context,
        ..Default::default()
    }
}
