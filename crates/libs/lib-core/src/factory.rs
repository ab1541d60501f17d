//! Record assembly: timestamp, sanitized context, session and user.

use std::sync::Arc;

use crate::identity::extract_user_id;
use crate::model::{LogFields, LogLevel, LogRecord};
use crate::sanitize::Sanitizer;
use crate::session::SessionId;
use crate::store::KeyValueStore;

pub struct RecordFactory {
    session: SessionId,
    credentials: Arc<dyn KeyValueStore>,
}

impl RecordFactory {
    pub fn new(session: SessionId, credentials: Arc<dyn KeyValueStore>) -> Self {
        Self {
            session,
            credentials,
        }
    }

    pub fn session(&self) -> &SessionId {
        &self.session
    }

    /// Build a record. `sanitizer` is `None` when sensitive data is allowed
    /// through, in which case context is stored exactly as given.
    pub fn build(
        &self,
        level: LogLevel,
        message: &str,
        fields: LogFields,
        sanitizer: Option<&Sanitizer>,
    ) -> LogRecord {
        let context = match (fields.context, sanitizer) {
            (Some(context), Some(sanitizer)) => Some(sanitizer.sanitize(&context)),
            (context, _) => context,
        };

        LogRecord {
            timestamp: lib_utils::now_iso_millis(),
            level,
            message: message.to_string(),
            context,
            component: fields.component,
            action: fields.action,
            session_id: self.session.to_string(),
            user_id: extract_user_id(self.credentials.as_ref()),
            error: fields.error,
        }
    }
}
