//! # Logger Configuration
//!
//! Each [`Logger`](crate::Logger) owns one [`LoggerConfig`]. It is replaced at
//! runtime only through [`Logger::set_config`](crate::Logger::set_config),
//! which merges a [`LoggerConfigPatch`] into the live value.
//!
//! ## Environment
//!
//! [`LoggerConfig::from_env`] reads:
//! - `FITLOG_MIN_LEVEL`: `debug`, `info`, `warn`, `error` or `fatal`
//! - `FITLOG_CONSOLE`, `FITLOG_LOCAL_STORAGE`, `FITLOG_REMOTE`: sink toggles (`1`/`0`)
//! - `FITLOG_REMOTE_ENDPOINT`: collector URL
//! - `FITLOG_MAX_ENTRIES`: persisted buffer capacity
//! - `FITLOG_INCLUDE_SENSITIVE`: disable redaction (`1`/`0`)
//!
//! Unset or malformed variables keep their defaults.

use lib_utils::envs::{get_env, get_env_bool, get_env_parse};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::LogLevel;
use crate::sanitize::DEFAULT_SENSITIVE_KEYS;
use crate::sink::SinkKind;

/// Default capacity of the persisted log buffer.
pub const DEFAULT_MAX_STORAGE_ENTRIES: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggerConfig {
    /// Records below this level are dropped before any sink sees them
    pub min_level: LogLevel,
    pub enable_console: bool,
    pub enable_local_storage: bool,
    pub enable_remote_logging: bool,
    /// Required when `enable_remote_logging` is set
    pub remote_endpoint: Option<String>,
    pub max_storage_entries: usize,
    /// Skip redaction entirely
    pub include_sensitive_data: bool,
    /// Keys redacted from context, matched case-insensitively
    pub sensitive_keys: Vec<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Debug,
            enable_console: true,
            enable_local_storage: true,
            enable_remote_logging: false,
            remote_endpoint: None,
            max_storage_entries: DEFAULT_MAX_STORAGE_ENTRIES,
            include_sensitive_data: false,
            sensitive_keys: DEFAULT_SENSITIVE_KEYS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl LoggerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            min_level: get_env_parse("FITLOG_MIN_LEVEL").unwrap_or(defaults.min_level),
            enable_console: get_env_bool("FITLOG_CONSOLE").unwrap_or(defaults.enable_console),
            enable_local_storage: get_env_bool("FITLOG_LOCAL_STORAGE")
                .unwrap_or(defaults.enable_local_storage),
            enable_remote_logging: get_env_bool("FITLOG_REMOTE")
                .unwrap_or(defaults.enable_remote_logging),
            remote_endpoint: get_env("FITLOG_REMOTE_ENDPOINT")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .or(defaults.remote_endpoint),
            max_storage_entries: get_env_parse("FITLOG_MAX_ENTRIES")
                .unwrap_or(defaults.max_storage_entries),
            include_sensitive_data: get_env_bool("FITLOG_INCLUDE_SENSITIVE")
                .unwrap_or(defaults.include_sensitive_data),
            sensitive_keys: defaults.sensitive_keys,
        }
    }

    /// Validate the combination of settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_storage_entries == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        if self.enable_remote_logging {
            let endpoint = self
                .remote_endpoint
                .as_deref()
                .ok_or(ConfigError::MissingRemoteEndpoint)?;
            let url = reqwest::Url::parse(endpoint)
                .map_err(|e| ConfigError::InvalidRemoteEndpoint(format!("{endpoint}: {e}")))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidRemoteEndpoint(format!(
                    "{endpoint}: unsupported scheme {}",
                    url.scheme()
                )));
            }
        }

        Ok(())
    }

    /// Whether records should reach the given sink.
    pub fn sink_enabled(&self, kind: SinkKind) -> bool {
        match kind {
            SinkKind::Console => self.enable_console,
            SinkKind::LocalStorage => self.enable_local_storage,
            SinkKind::Remote => self.enable_remote_logging,
        }
    }

    /// Copy of this config with `patch` applied.
    pub fn merged(&self, patch: LoggerConfigPatch) -> Self {
        let mut next = self.clone();
        patch.apply_to(&mut next);
        next
    }
}

/// Partial update for [`LoggerConfig`]; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggerConfigPatch {
    pub min_level: Option<LogLevel>,
    pub enable_console: Option<bool>,
    pub enable_local_storage: Option<bool>,
    pub enable_remote_logging: Option<bool>,
    pub remote_endpoint: Option<String>,
    pub max_storage_entries: Option<usize>,
    pub include_sensitive_data: Option<bool>,
    pub sensitive_keys: Option<Vec<String>>,
}

impl LoggerConfigPatch {
    pub fn apply_to(self, config: &mut LoggerConfig) {
        if let Some(v) = self.min_level {
            config.min_level = v;
        }
        if let Some(v) = self.enable_console {
            config.enable_console = v;
        }
        if let Some(v) = self.enable_local_storage {
            config.enable_local_storage = v;
        }
        if let Some(v) = self.enable_remote_logging {
            config.enable_remote_logging = v;
        }
        if let Some(v) = self.remote_endpoint {
            config.remote_endpoint = Some(v);
        }
        if let Some(v) = self.max_storage_entries {
            config.max_storage_entries = v;
        }
        if let Some(v) = self.include_sensitive_data {
            config.include_sensitive_data = v;
        }
        if let Some(v) = self.sensitive_keys {
            config.sensitive_keys = v;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("remote logging is enabled but no remote endpoint is configured")]
    MissingRemoteEndpoint,

    #[error("invalid remote endpoint {0}")]
    InvalidRemoteEndpoint(String),

    #[error("max storage entries must be at least 1")]
    ZeroCapacity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::default();
        assert_eq!(config.min_level, LogLevel::Debug);
        assert!(config.enable_console);
        assert!(config.enable_local_storage);
        assert!(!config.enable_remote_logging);
        assert!(!config.include_sensitive_data);
        assert_eq!(config.max_storage_entries, DEFAULT_MAX_STORAGE_ENTRIES);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_remote_requires_http_endpoint() {
        let mut config = LoggerConfig {
            enable_remote_logging: true,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::MissingRemoteEndpoint));

        config.remote_endpoint = Some("ftp://logs.example.com".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRemoteEndpoint(_))
        ));

        config.remote_endpoint = Some("https://logs.example.com/ingest".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_patch_only_touches_given_fields() {
        let base = LoggerConfig::default();
        let next = base.merged(LoggerConfigPatch {
            min_level: Some(LogLevel::Warn),
            max_storage_entries: Some(10),
            ..Default::default()
        });

        assert_eq!(next.min_level, LogLevel::Warn);
        assert_eq!(next.max_storage_entries, 10);
        assert_eq!(next.enable_console, base.enable_console);
        assert_eq!(next.sensitive_keys, base.sensitive_keys);
    }

    #[test]
    fn test_deserializes_partial_camel_case_json() {
        let config: LoggerConfig =
            serde_json::from_str(r#"{"minLevel":"WARN","enableRemoteLogging":true}"#).unwrap();
        assert_eq!(config.min_level, LogLevel::Warn);
        assert!(config.enable_remote_logging);
        assert!(config.enable_console);
    }
}
