//! # Context Sanitization
//!
//! Recursive redaction of denylisted keys in structured context.
//!
//! Keys are split into words at case changes, letter/digit changes and any
//! non-alphanumeric character. A key is sensitive when a run of consecutive
//! words, joined and lowercased, equals a denylisted entry (separators in
//! entries are ignored, a trailing plural `s` is tolerated):
//!
//! - `apiKey`, `API_KEY`, `x-api-key` match `api_key`
//! - `refresh_token`, `oauth2Token`, `tokens` match `token`
//! - `className`, `businessName`, `tokenizer` match nothing
//!
//! Traversal depth is bounded; anything deeper is replaced with
//! [`MAX_DEPTH_MARKER`].

use serde_json::{Map, Value};

/// Replacement for redacted values.
pub const REDACTED: &str = "[REDACTED]";

/// Replacement for values nested deeper than the traversal bound.
pub const MAX_DEPTH_MARKER: &str = "[MAX_DEPTH_EXCEEDED]";

pub const DEFAULT_MAX_DEPTH: usize = 10;

pub const DEFAULT_SENSITIVE_KEYS: &[&str] = &[
    "password",
    "passwd",
    "secret",
    "token",
    "authorization",
    "apikey",
    "api_key",
    "cookie",
    "session_token",
    "credit_card",
    "ssn",
];

#[derive(Debug, Clone)]
pub struct Sanitizer {
    keys: Vec<String>,
    max_depth: usize,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(DEFAULT_SENSITIVE_KEYS)
    }
}

impl Sanitizer {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keys: Vec<String> = keys
            .into_iter()
            .map(|k| normalize(k.as_ref()))
            .filter(|k| !k.is_empty())
            .collect();
        keys.sort();
        keys.dedup();

        Self {
            keys,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn is_sensitive(&self, key: &str) -> bool {
        let words = split_words(key);

        (0..words.len()).any(|start| {
            let mut joined = String::new();
            words[start..].iter().any(|word| {
                joined.push_str(word);
                self.is_denied(&joined)
                    || joined.strip_suffix('s').is_some_and(|singular| self.is_denied(singular))
            })
        })
    }

    fn is_denied(&self, candidate: &str) -> bool {
        self.keys.binary_search_by(|k| k.as_str().cmp(candidate)).is_ok()
    }

    /// Structure-preserving copy of `value` with sensitive values redacted.
    pub fn sanitize(&self, value: &Value) -> Value {
        self.sanitize_inner(value, 0)
    }

    fn sanitize_inner(&self, value: &Value, depth: usize) -> Value {
        if depth > self.max_depth && (value.is_object() || value.is_array()) {
            return Value::String(MAX_DEPTH_MARKER.to_string());
        }

        match value {
            Value::Object(map) => {
                let mut out = Map::with_capacity(map.len());
                for (key, child) in map {
                    let sanitized = if self.is_sensitive(key) {
                        Value::String(REDACTED.to_string())
                    } else {
                        self.sanitize_inner(child, depth + 1)
                    };
                    out.insert(key.clone(), sanitized);
                }
                Value::Object(out)
            }
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.sanitize_inner(item, depth + 1))
                    .collect(),
            ),
            leaf => leaf.clone(),
        }
    }
}

/// `x-apiKey` -> `[x, api, key]`, `HTTPHeader` -> `[http, header]`,
/// `oauth2Token` -> `[oauth, 2, token]`.
fn split_words(key: &str) -> Vec<String> {
    let chars: Vec<char> = key.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        // `current` is non-empty only when chars[i - 1] was alphanumeric
        if !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = (c.is_uppercase() && (prev.is_lowercase() || prev.is_numeric()))
                || (c.is_uppercase() && prev.is_uppercase() && next_is_lower)
                || (c.is_numeric() != prev.is_numeric());
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.extend(c.to_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn normalize(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}
