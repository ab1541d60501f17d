//! The record every accepted logging call produces.
//!
//! Field names on the wire are camelCase (`sessionId`, `userId`) because the
//! collector and the persisted buffer share one JSON schema.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::backtrace::{Backtrace, BacktraceStatus};

use super::LogLevel;

/// One immutable structured logging event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    /// ISO-8601 UTC, millisecond precision
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
    /// Already sanitized when the record is built
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

/// Diagnostic snapshot of a native error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub name: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorInfo {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            stack: None,
        }
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Capture any `std::error::Error`.
    ///
    /// `stack` lists the `source()` chain one cause per line, followed by a
    /// backtrace when `RUST_BACKTRACE` enables capturing one.
    pub fn capture<E>(err: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        let mut lines = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            lines.push(format!("caused by: {cause}"));
            source = cause.source();
        }

        let backtrace = Backtrace::capture();
        if backtrace.status() == BacktraceStatus::Captured {
            lines.push(backtrace.to_string());
        }

        Self {
            name: short_type_name::<E>(),
            message: err.to_string(),
            stack: (!lines.is_empty()).then(|| lines.join("\n")),
        }
    }
}

/// `core::fmt::Error` -> `Error`, `dyn core::error::Error` -> `Error`,
/// `my_app::Wrapper<Inner>` -> `Wrapper`.
fn short_type_name<E: ?Sized>() -> String {
    let full = std::any::type_name::<E>();
    let head = full.split(['<', '+']).next().unwrap_or(full).trim();
    head.rsplit("::")
        .next()
        .unwrap_or(head)
        .trim_start_matches("dyn ")
        .to_string()
}

/// Optional parts of a logging call.
#[derive(Debug, Clone, Default)]
pub struct LogFields {
    pub error: Option<ErrorInfo>,
    pub context: Option<Value>,
    pub component: Option<String>,
    pub action: Option<String>,
}

impl LogFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(mut self, error: ErrorInfo) -> Self {
        self.error = Some(error);
        self
    }

    pub fn context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }

    pub fn maybe_context(mut self, context: Option<Value>) -> Self {
        self.context = context;
        self
    }

    pub fn component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

/// Best-effort conversion of caller data into record context.
///
/// Values serde cannot represent (maps with non-string keys, failing
/// `Serialize` impls) become the string `"[Unserializable]"`.
pub fn context_of<T>(value: &T) -> Value
where
    T: Serialize + ?Sized,
{
    serde_json::to_value(value).unwrap_or_else(|_| Value::String("[Unserializable]".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[derive(Debug, thiserror::Error)]
    #[error("storage unavailable")]
    struct StorageDown {
        #[source]
        cause: std::io::Error,
    }

    #[test]
    fn test_capture_walks_source_chain() {
        let err = StorageDown {
            cause: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        };
        let info = ErrorInfo::capture(&err);

        assert_eq!(info.name, "StorageDown");
        assert_eq!(info.message, "storage unavailable");
        assert!(info.stack.unwrap().starts_with("caused by: disk full"));
    }

    #[test]
    fn test_capture_through_trait_object() {
        let err: Box<dyn std::error::Error> = "boom".into();
        let info = ErrorInfo::capture(err.as_ref());
        assert_eq!(info.message, "boom");
        assert!(!info.name.contains("::"));
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let record = LogRecord {
            timestamp: "2026-03-01T09:15:02.417Z".to_string(),
            level: LogLevel::Info,
            message: "saved workout".to_string(),
            context: Some(json!({"sets": 3})),
            component: Some("WorkoutForm".to_string()),
            action: Some("submit".to_string()),
            session_id: "session_1_abc".to_string(),
            user_id: Some("42".to_string()),
            error: None,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["sessionId"], "session_1_abc");
        assert_eq!(value["userId"], "42");
        assert_eq!(value["level"], "INFO");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_context_of_degrades_instead_of_failing() {
        let mut bad = HashMap::new();
        bad.insert((1, 2), "tuple keys are not JSON");
        assert_eq!(context_of(&bad), json!("[Unserializable]"));
        assert_eq!(context_of(&vec![1, 2]), json!([1, 2]));
    }
}
