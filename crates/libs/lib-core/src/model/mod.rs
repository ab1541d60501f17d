//! # Log Record Model
//!
//! - **[`level`]**: the ordered severity scale
//! - **[`record`]**: the immutable record handed to every sink, plus the
//!   optional pieces callers attach to it

pub mod level;
pub mod record;

pub use level::{LogLevel, ParseLevelError};
pub use record::{context_of, ErrorInfo, LogFields, LogRecord};
