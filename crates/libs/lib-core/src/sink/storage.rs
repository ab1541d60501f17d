//! Persisted ring buffer: the whole log collection lives as one JSON array
//! under a single key and is rewritten on every append.
//!
//! There is no locking. Two loggers appending to the same store in the same
//! instant can lose one of the two records.

use std::sync::Arc;

use super::{LogSink, SinkKind};
use crate::config::LoggerConfig;
use crate::error::SinkResult;
use crate::model::LogRecord;
use crate::store::{KeyValueStore, LOGS_KEY};
use crate::INTERNAL_TARGET;

#[derive(Clone)]
pub struct RingBuffer {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl RingBuffer {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, LOGS_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Stored records, oldest first.
    ///
    /// A collection that no longer parses is reported as empty; the next
    /// append overwrites it.
    pub fn read_all(&self) -> SinkResult<Vec<LogRecord>> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<LogRecord>>(&raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!(
                    target: INTERNAL_TARGET,
                    key = %self.key,
                    error = %e,
                    "Discarding unreadable log collection"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Append one record, evicting from the front until at most `capacity`
    /// remain, then write the collection back in one call.
    pub fn append(&self, record: &LogRecord, capacity: usize) -> SinkResult<()> {
        let mut records = self.read_all()?;
        records.push(record.clone());

        if records.len() > capacity {
            let excess = records.len() - capacity;
            records.drain(..excess);
        }

        let serialized = serde_json::to_string(&records)?;
        self.store.set(&self.key, &serialized)?;
        Ok(())
    }

    /// Replace the collection with an empty one.
    pub fn clear(&self) -> SinkResult<()> {
        self.store.set(&self.key, "[]")?;
        Ok(())
    }
}

impl LogSink for RingBuffer {
    fn kind(&self) -> SinkKind {
        SinkKind::LocalStorage
    }

    fn write(&self, record: &LogRecord, config: &LoggerConfig) -> SinkResult<()> {
        self.append(record, config.max_storage_entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SinkError;
    use crate::model::LogLevel;
    use crate::store::MemoryStore;

    fn record(message: String) -> LogRecord {
        LogRecord {
            timestamp: lib_utils::now_iso_millis(),
            level: LogLevel::Info,
            message,
            context: None,
            component: None,
            action: None,
            session_id: "session_1_test".to_string(),
            user_id: None,
            error: None,
        }
    }

    #[test]
    fn test_keeps_most_recent_in_order() {
        let buffer = RingBuffer::new(Arc::new(MemoryStore::new()));
        for i in 0..15 {
            buffer.append(&record(format!("Message {i}")), 10).unwrap();
        }

        let records = buffer.read_all().unwrap();
        let messages: Vec<_> = records.iter().map(|r| r.message.as_str()).collect();
        let expected: Vec<String> = (5..15).map(|i| format!("Message {i}")).collect();

        assert_eq!(messages, expected);
    }

    #[test]
    fn test_below_capacity_keeps_everything() {
        let buffer = RingBuffer::new(Arc::new(MemoryStore::new()));
        for i in 0..3 {
            buffer.append(&record(format!("m{i}")), 10).unwrap();
        }
        assert_eq!(buffer.read_all().unwrap().len(), 3);
    }

    #[test]
    fn test_clear_writes_empty_collection() {
        let store = Arc::new(MemoryStore::new());
        let buffer = RingBuffer::new(store.clone());
        buffer.append(&record("m".to_string()), 10).unwrap();

        buffer.clear().unwrap();

        assert_eq!(store.get(LOGS_KEY).unwrap().as_deref(), Some("[]"));
        assert!(buffer.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_collection_is_replaced() {
        let store = Arc::new(MemoryStore::new());
        store.set(LOGS_KEY, "{not json").unwrap();
        let buffer = RingBuffer::new(store);

        assert!(buffer.read_all().unwrap().is_empty());
        buffer.append(&record("fresh".to_string()), 10).unwrap();
        assert_eq!(buffer.read_all().unwrap()[0].message, "fresh");
    }

    #[test]
    fn test_quota_failure_leaves_previous_collection() {
        let store = Arc::new(MemoryStore::with_quota(600));
        let buffer = RingBuffer::new(store);
        buffer.append(&record("first".to_string()), 10).unwrap();

        let mut failed = false;
        for i in 0..20 {
            if let Err(err) = buffer.append(&record(format!("overflow {i}")), 10) {
                assert!(matches!(err, SinkError::Store(_)));
                failed = true;
                break;
            }
        }

        assert!(failed);
        assert_eq!(buffer.read_all().unwrap()[0].message, "first");
    }
}
