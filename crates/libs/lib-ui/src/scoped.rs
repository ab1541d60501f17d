//! # Scoped Logger
//!
//! A [`Logger`] facade bound to one component name. Every record it emits
//! carries `component`, and the semantic helpers add a fixed `action` tag
//! with a conventionally shaped context:
//!
//! | helper              | action        | context                      |
//! |---------------------|---------------|------------------------------|
//! | `log_event`         | `event`       | `{eventName, eventData}`     |
//! | `log_user_action`   | `user-action` | `{action, details}`          |
//! | `log_performance`   | `performance` | `{metric, value, unit}`      |
//!
//! ```rust,no_run
//! use lib_ui::ScopedLogger;
//! use serde_json::json;
//!
//! let log = ScopedLogger::new("WorkoutTimer", None);
//! log.log_user_action("start-rest", Some(json!({"seconds": 90})));
//! let total = log.measure("summary-build", || 6 * 5);
//! ```

use lib_core::{
    ErrorInfo, LogFields, LogLevel, LogRecord, Logger, LoggerBuilder, LoggerConfig,
    LoggerConfigPatch, SessionId,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct ScopedLogger {
    component: String,
    logger: Arc<Logger>,
}

impl ScopedLogger {
    /// Dedicated logger built from the defaults plus `overrides`.
    pub fn new(component: impl Into<String>, overrides: Option<LoggerConfigPatch>) -> Self {
        let config = match overrides {
            Some(patch) => LoggerConfig::default().merged(patch),
            None => LoggerConfig::default(),
        };
        Self::shared(component, Arc::new(Logger::new(config)))
    }

    /// Dedicated logger built from `builder`.
    pub fn with_builder(component: impl Into<String>, builder: LoggerBuilder) -> Self {
        Self::shared(component, Arc::new(builder.build()))
    }

    /// Borrow an existing engine instead of creating one.
    pub fn shared(component: impl Into<String>, logger: Arc<Logger>) -> Self {
        Self {
            component: component.into(),
            logger,
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    pub fn debug(&self, message: &str, context: Option<Value>) {
        self.emit(LogLevel::Debug, message, None, context, None);
    }

    pub fn info(&self, message: &str, context: Option<Value>) {
        self.emit(LogLevel::Info, message, None, context, None);
    }

    pub fn warn(&self, message: &str, context: Option<Value>) {
        self.emit(LogLevel::Warn, message, None, context, None);
    }

    pub fn error(&self, message: &str, error: Option<ErrorInfo>, context: Option<Value>) {
        self.emit(LogLevel::Error, message, error, context, None);
    }

    pub fn fatal(&self, message: &str, error: Option<ErrorInfo>, context: Option<Value>) {
        self.emit(LogLevel::Fatal, message, error, context, None);
    }

    pub fn log_event(&self, event_name: &str, event_data: Option<Value>) {
        let context = json!({ "eventName": event_name, "eventData": event_data });
        self.tagged(
            LogLevel::Info,
            &format!("Event: {event_name}"),
            "event",
            Some(context),
        );
    }

    pub fn log_user_action(&self, action: &str, details: Option<Value>) {
        let context = json!({ "action": action, "details": details });
        self.tagged(
            LogLevel::Info,
            &format!("User action: {action}"),
            "user-action",
            Some(context),
        );
    }

    pub fn log_performance(&self, metric: &str, value: f64, unit: &str) {
        let context = json!({ "metric": metric, "value": value, "unit": unit });
        self.tagged(
            LogLevel::Info,
            &format!("Performance: {metric}"),
            "performance",
            Some(context),
        );
    }

    /// Run `f` and log its wall time in milliseconds.
    pub fn measure<R>(&self, metric: &str, f: impl FnOnce() -> R) -> R {
        let start = Instant::now();
        let result = f();
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        self.log_performance(metric, elapsed_ms, "ms");
        result
    }

    pub fn get_logs(&self) -> Vec<LogRecord> {
        self.logger.get_logs()
    }

    pub fn clear_logs(&self) {
        self.logger.clear_logs();
    }

    pub fn session_id(&self) -> &SessionId {
        self.logger.session_id()
    }

    /// Emit with an explicit `action` tag.
    pub fn tagged(&self, level: LogLevel, message: &str, action: &str, context: Option<Value>) {
        self.emit(level, message, None, context, Some(action));
    }

    pub(crate) fn tagged_error(
        &self,
        level: LogLevel,
        message: &str,
        action: &str,
        error: ErrorInfo,
        context: Option<Value>,
    ) {
        self.emit(level, message, Some(error), context, Some(action));
    }

    fn emit(
        &self,
        level: LogLevel,
        message: &str,
        error: Option<ErrorInfo>,
        context: Option<Value>,
        action: Option<&str>,
    ) {
        let mut fields = LogFields::new()
            .component(self.component.as_str())
            .maybe_context(context);
        fields.error = error;
        fields.action = action.map(str::to_string);
        self.logger.log(level, message, fields);
    }
}
