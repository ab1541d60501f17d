//! # Log Sinks
//!
//! Each sink turns a record into one external effect. The engine hands the
//! same record to every sink the current configuration enables; a sink
//! reports failure through [`SinkError`](crate::SinkError) and the engine
//! drops it there. Sinks never call back into the engine.

mod console;
mod remote;
mod storage;

pub use console::{format_line, ConsoleSink};
pub use remote::RemoteSink;
pub use storage::RingBuffer;

use crate::config::LoggerConfig;
use crate::error::SinkResult;
use crate::model::LogRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkKind {
    Console,
    LocalStorage,
    Remote,
}

impl std::fmt::Display for SinkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkKind::Console => write!(f, "console"),
            SinkKind::LocalStorage => write!(f, "local_storage"),
            SinkKind::Remote => write!(f, "remote"),
        }
    }
}

pub trait LogSink: Send + Sync {
    fn kind(&self) -> SinkKind;

    /// Accept one record. Must return promptly; anything slow is spawned.
    fn write(&self, record: &LogRecord, config: &LoggerConfig) -> SinkResult<()>;
}
