//! # Diagnostics Setup
//!
//! Installs the `tracing` subscriber that renders console-sink records and
//! the engine's internal diagnostics:
//! - `EnvFilter` from `RUST_LOG`, else `FITLOG_LOG`, else `info`
//! - a stderr layer for interactive use
//! - a daily-rotated file under `FITLOG_DIAGNOSTICS_DIR` when set
//! - a panic hook that records panics as error events
//!
//! Host applications call [`init`] once at startup and keep the returned
//! guard alive until exit so buffered file output is flushed.

use std::fs;
use std::path::PathBuf;
use std::sync::Once;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::INTERNAL_TARGET;

const DIAGNOSTICS_FILE: &str = "fitlog-diagnostics.log";

static PANIC_HOOK: Once = Once::new();

#[derive(Debug, Clone)]
pub struct DiagnosticsConfig {
    /// Filter directives, e.g. `fitlog::console=debug,warn`
    pub filter: String,
    /// Directory for the rotated diagnostics file
    pub log_dir: Option<PathBuf>,
    /// ANSI colours on stderr
    pub ansi: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            log_dir: None,
            ansi: true,
        }
    }
}

impl DiagnosticsConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let filter = lib_utils::get_env("RUST_LOG")
            .or_else(|_| lib_utils::get_env("FITLOG_LOG"))
            .unwrap_or_else(|_| "info".to_string());

        Self {
            filter,
            log_dir: lib_utils::get_env("FITLOG_DIAGNOSTICS_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            ansi: lib_utils::get_env_bool("FITLOG_ANSI").unwrap_or(true),
        }
    }
}

/// Install the global subscriber.
///
/// Returns the file writer's guard when a file layer was set up. If a global
/// subscriber already exists the call leaves it in place.
pub fn init(config: &DiagnosticsConfig) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(config.ansi);

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => match fs::create_dir_all(dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(dir, DIAGNOSTICS_FILE);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = fmt::layer()
                    .with_writer(writer)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!("Warning: Failed to create diagnostics directory: {}", e);
                (None, None)
            }
        },
        None => (None, None),
    };

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(
            target: INTERNAL_TARGET,
            filter = %config.filter,
            log_dir = ?config.log_dir,
            "Diagnostics initialized"
        );
    }

    setup_panic_hook();
    guard
}

/// Record panics as error events, then defer to the previous hook.
fn setup_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let location = panic_info
                .location()
                .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
                .unwrap_or_else(|| "unknown location".to_string());

            let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
                s.clone()
            } else {
                "unknown panic message".to_string()
            };

            tracing::error!(
                target: INTERNAL_TARGET,
                location = %location,
                message = %message,
                "Application panic"
            );

            default_panic(panic_info);
        }));
    });
}
