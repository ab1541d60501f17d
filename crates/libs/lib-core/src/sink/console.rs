//! Console sink: one `tracing` event per record under [`CONSOLE_TARGET`],
//! emitted at the record's own level. `FATAL` has no tracing counterpart and
//! goes out as `error!` with `fatal = true`.

use super::{LogSink, SinkKind};
use crate::config::LoggerConfig;
use crate::error::SinkResult;
use crate::model::{LogLevel, LogRecord};
use crate::CONSOLE_TARGET;

#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

/// `[timestamp] [LEVEL] [Component] message`, followed by the action,
/// context, error and stack when present.
pub fn format_line(record: &LogRecord) -> String {
    let mut line = format!("[{}] [{}]", record.timestamp, record.level);

    if let Some(component) = &record.component {
        line.push_str(&format!(" [{component}]"));
    }
    line.push(' ');
    line.push_str(&record.message);

    if let Some(action) = &record.action {
        line.push_str(&format!(" action={action}"));
    }
    if let Some(context) = &record.context {
        line.push_str(&format!(" context={context}"));
    }
    if let Some(error) = &record.error {
        line.push_str(&format!(" error={}: {}", error.name, error.message));
        if let Some(stack) = &error.stack {
            line.push('\n');
            line.push_str(stack);
        }
    }

    line
}

impl LogSink for ConsoleSink {
    fn kind(&self) -> SinkKind {
        SinkKind::Console
    }

    fn write(&self, record: &LogRecord, _config: &LoggerConfig) -> SinkResult<()> {
        let line = format_line(record);
        let session_id = record.session_id.as_str();
        let user_id = record.user_id.as_deref().unwrap_or("-");

        match record.level {
            LogLevel::Debug => {
                tracing::debug!(target: CONSOLE_TARGET, session_id, user_id, "{line}")
            }
            LogLevel::Info => {
                tracing::info!(target: CONSOLE_TARGET, session_id, user_id, "{line}")
            }
            LogLevel::Warn => {
                tracing::warn!(target: CONSOLE_TARGET, session_id, user_id, "{line}")
            }
            LogLevel::Error => {
                tracing::error!(target: CONSOLE_TARGET, session_id, user_id, "{line}")
            }
            LogLevel::Fatal => {
                tracing::error!(target: CONSOLE_TARGET, session_id, user_id, fatal = true, "{line}")
            }
        }

        Ok(())
    }
}
