//! # Utilities Library
//!
//! Shared helpers for base64 decoding, environment variables and timestamps.

pub mod b64;
pub mod envs;
pub mod time;

// Re-export commonly used functions
pub use b64::{b64_decode_lenient, b64u_encode};
pub use envs::{get_env, get_env_bool, get_env_parse};
pub use time::{now_iso_millis, now_millis, parse_utc};
