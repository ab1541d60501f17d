//! Remote delivery: one POST per record, fire-and-forget.
//!
//! The record is serialized on the caller's thread; the request itself runs
//! on the delivery runtime (see [`crate::runtime`]). Failures, including non-2xx
//! responses, are reported to the internal diagnostics stream and dropped.
//! No retry, no queue, no ordering between records.

use once_cell::sync::Lazy;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

use super::{LogSink, SinkKind};
use crate::config::LoggerConfig;
use crate::error::{SinkError, SinkResult};
use crate::model::LogRecord;
use crate::{runtime, INTERNAL_TARGET};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One connection pool for every logger in the process. Only ever driven
/// from the delivery runtime.
static SHARED_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
});

#[derive(Debug, Clone)]
pub struct RemoteSink {
    client: Client,
}

impl Default for RemoteSink {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteSink {
    pub fn new() -> Self {
        Self {
            client: SHARED_CLIENT.clone(),
        }
    }

    /// Use a caller-configured client (proxy, TLS roots, timeouts).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Dispatch `record` to `endpoint` and return without waiting for it.
    pub fn send(&self, record: &LogRecord, endpoint: &str) -> SinkResult<()> {
        let body = serde_json::to_vec(record)?;
        let client = self.client.clone();
        let endpoint = endpoint.to_string();
        let level = record.level;

        runtime::spawn_detached(async move {
            let result = client
                .post(&endpoint)
                .header(CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await
                .and_then(|response| response.error_for_status());

            if let Err(e) = result {
                tracing::debug!(
                    target: INTERNAL_TARGET,
                    endpoint = %endpoint,
                    level = %level,
                    error = %e,
                    "Remote log delivery failed"
                );
            }
        })
    }
}

impl LogSink for RemoteSink {
    fn kind(&self) -> SinkKind {
        SinkKind::Remote
    }

    fn write(&self, record: &LogRecord, config: &LoggerConfig) -> SinkResult<()> {
        let endpoint = config
            .remote_endpoint
            .as_deref()
            .ok_or(SinkError::NoEndpoint)?;
        self.send(record, endpoint)
    }
}
