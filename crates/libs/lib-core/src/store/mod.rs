//! # Local Key-Value Storage
//!
//! The durable primitive behind the persisted log buffer and the cached
//! credential. It mirrors a browser's local storage: string keys, string
//! values, whole-value writes, no transactions. Concurrent writers to the
//! same key race and the last write wins.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::StoreError;

/// Key holding the persisted log collection.
pub const LOGS_KEY: &str = "app_logs";

/// Key holding the cached bearer credential. Never written by the engine.
pub use lib_auth::CREDENTIAL_KEY;

/// Environment variable selecting a directory for the process-wide store.
pub const STORAGE_DIR_ENV: &str = "FITLOG_STORAGE_DIR";

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

static DEFAULT_STORE: Lazy<Arc<dyn KeyValueStore>> = Lazy::new(|| {
    match lib_utils::get_env(STORAGE_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => {
            tracing::debug!(
                target: crate::INTERNAL_TARGET,
                dir = %dir,
                "Using file-backed log storage"
            );
            Arc::new(FileStore::new(PathBuf::from(dir)))
        }
        _ => Arc::new(MemoryStore::new()),
    }
});

/// Store shared by every logger that is not given one explicitly.
///
/// File-backed under `FITLOG_STORAGE_DIR` when set, in-memory otherwise.
pub fn default_store() -> Arc<dyn KeyValueStore> {
    DEFAULT_STORE.clone()
}
