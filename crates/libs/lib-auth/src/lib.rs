//! # Authentication Library
//!
//! Read-only inspection of the cached bearer credential. The telemetry core
//! only needs the subject claim to correlate records with a user; it never
//! verifies signatures or issues tokens.

pub mod token;

// Re-export commonly used types
pub use token::{peek_claims, user_id_from_token, Claims, Subject, TokenError, CREDENTIAL_KEY};
