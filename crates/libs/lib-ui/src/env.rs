//! Calling environment attached to boundary reports.

use lib_utils::get_env;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub user_agent: String,
    pub location: String,
}

impl Environment {
    pub fn new(user_agent: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            location: location.into(),
        }
    }

    /// `FITLOG_USER_AGENT` / `FITLOG_LOCATION` when set, otherwise derived
    /// from the build and the working directory.
    pub fn detect() -> Self {
        let user_agent = get_env("FITLOG_USER_AGENT").unwrap_or_else(|_| {
            format!(
                "{}/{} ({}; {})",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                std::env::consts::OS,
                std::env::consts::ARCH
            )
        });

        let location = get_env("FITLOG_LOCATION").unwrap_or_else(|_| {
            std::env::current_dir()
                .map(|dir| format!("file://{}", dir.display()))
                .unwrap_or_else(|_| "unknown".to_string())
        });

        Self {
            user_agent,
            location,
        }
    }
}
