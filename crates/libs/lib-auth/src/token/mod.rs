//! # Bearer Token Inspection
//!
//! A credential is expected to be `header.payload.signature`. The payload is
//! decoded as base64 JSON without checking the signature; every failure along
//! the way is reported as a [`TokenError`] so callers can map it to "no user".

use serde::Deserialize;
use thiserror::Error;

/// Storage key under which the application caches its bearer credential.
pub const CREDENTIAL_KEY: &str = "auth_token";

/// Subject claim. Some issuers emit numeric user ids.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Subject {
    Text(String),
    Number(i64),
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Subject::Text(s) => f.write_str(s),
            Subject::Number(n) => write!(f, "{n}"),
        }
    }
}

/// The subset of JWT claims the telemetry core reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    #[serde(default)]
    pub sub: Option<Subject>,
    /// Username
    #[serde(default)]
    pub username: Option<String>,
    /// Expiration time (Unix timestamp)
    #[serde(default)]
    pub exp: Option<i64>,
    /// Issued at time (Unix timestamp)
    #[serde(default)]
    pub iat: Option<i64>,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("credential is empty")]
    Empty,

    #[error("expected 3 dot-separated segments, found {0}")]
    SegmentCount(usize),

    #[error("payload is not valid base64: {0}")]
    Base64(#[from] lib_utils::b64::Error),

    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("payload is not a JSON object")]
    NotAnObject,
}

/// Decode the claims of a bearer token without verifying it.
pub fn peek_claims(token: &str) -> Result<Claims, TokenError> {
    let token = token.trim();
    let token = token
        .strip_prefix("Bearer ")
        .or_else(|| token.strip_prefix("bearer "))
        .unwrap_or(token)
        .trim();

    if token.is_empty() {
        return Err(TokenError::Empty);
    }

    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(TokenError::SegmentCount(segments.len()));
    }

    let payload = lib_utils::b64_decode_lenient(segments[1])?;
    let value = serde_json::from_slice::<serde_json::Value>(&payload)?;
    if !value.is_object() {
        return Err(TokenError::NotAnObject);
    }

    Ok(serde_json::from_value(value)?)
}

/// Subject of `token` as a string. `Ok(None)` when the claims carry no `sub`.
pub fn user_id_from_token(token: &str) -> Result<Option<String>, TokenError> {
    let claims = peek_claims(token)?;
    Ok(claims.sub.map(|sub| sub.to_string()))
}
