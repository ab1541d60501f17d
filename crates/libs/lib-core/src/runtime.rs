//! Runtime used for remote delivery.
//!
//! Every request runs on one single-worker background runtime created on
//! first use, whether or not the caller is itself inside tokio. The shared
//! HTTP client's pooled connections are therefore always driven by the same
//! runtime, and a caller's runtime shutting down cannot strand them.

use once_cell::sync::Lazy;
use std::future::Future;
use tokio::runtime::{Builder, Runtime};

use crate::error::{SinkError, SinkResult};
use crate::INTERNAL_TARGET;

pub const DELIVERY_THREAD_NAME: &str = "fitlog-delivery";

static DELIVERY_RT: Lazy<Option<Runtime>> = Lazy::new(|| {
    Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name(DELIVERY_THREAD_NAME)
        .enable_all()
        .build()
        .map_err(|e| {
            tracing::warn!(
                target: INTERNAL_TARGET,
                error = %e,
                "Failed to start log delivery runtime"
            );
        })
        .ok()
});

/// Spawn `future` on the delivery runtime without keeping its handle.
pub fn spawn_detached<F>(future: F) -> SinkResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    match DELIVERY_RT.as_ref() {
        Some(rt) => {
            rt.spawn(future);
            Ok(())
        }
        None => Err(SinkError::NoRuntime),
    }
}
