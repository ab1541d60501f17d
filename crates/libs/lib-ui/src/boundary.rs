//! # Error Boundary
//!
//! [`ErrorBoundary`] hosts one child component. The first failure the child
//! raises (a returned [`RenderError`] or a panic, from any lifecycle hook)
//! moves the boundary from `Healthy` to `Errored`, which is terminal until
//! [`ErrorBoundary::remount`]:
//!
//! ```text
//! Healthy --child fails--> Errored --remount()--> Healthy
//!    |                        |
//!  child view           fallback view (every render)
//! ```
//!
//! Entering `Errored` logs a FATAL record with an [`ErrorReport`] and calls
//! the `on_error` callback once. Every errored render logs a WARN and shows
//! the fallback. The boundary's own logging and callbacks run under
//! `catch_unwind`; a failure there never replaces the original error or
//! prevents the fallback from rendering.

use lib_core::ErrorInfo;
use serde::Serialize;
use serde_json::json;
use std::panic::{self, AssertUnwindSafe};

use crate::component::{take_unwind_frames, Component, RenderError};
use crate::env::Environment;
use crate::scoped::ScopedLogger;
use crate::view::View;
use crate::UI_TARGET;

pub const BOUNDARY_NAME: &str = "ErrorBoundary";

type FallbackFn = Box<dyn Fn(&ErrorReport) -> View + Send>;
type ErrorCallback = Box<dyn FnMut(&ErrorReport) + Send>;

/// Everything known about a caught failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub error: ErrorInfo,
    /// Innermost component first
    pub component_stack: Vec<String>,
    pub user_agent: String,
    pub location: String,
    pub captured_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryState {
    Healthy,
    Errored(ErrorReport),
}

pub struct ErrorBoundary<C: Component> {
    child: C,
    logger: ScopedLogger,
    environment: Environment,
    fallback: Option<FallbackFn>,
    on_error: Option<ErrorCallback>,
    state: BoundaryState,
    child_mounted: bool,
}

impl<C: Component> ErrorBoundary<C> {
    pub fn new(child: C) -> Self {
        Self {
            child,
            logger: ScopedLogger::new(BOUNDARY_NAME, None),
            environment: Environment::detect(),
            fallback: None,
            on_error: None,
            state: BoundaryState::Healthy,
            child_mounted: false,
        }
    }

    pub fn with_logger(mut self, logger: ScopedLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Replace the built-in fallback view.
    pub fn with_fallback(mut self, fallback: impl Fn(&ErrorReport) -> View + Send + 'static) -> Self {
        self.fallback = Some(Box::new(fallback));
        self
    }

    /// Called once per caught failure, after it is logged.
    pub fn on_error(mut self, callback: impl FnMut(&ErrorReport) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    pub fn state(&self) -> &BoundaryState {
        &self.state
    }

    pub fn is_errored(&self) -> bool {
        matches!(self.state, BoundaryState::Errored(_))
    }

    pub fn child(&self) -> &C {
        &self.child
    }

    /// Tear the child down if needed, return to `Healthy` and initialize
    /// the child again.
    pub fn remount(&mut self, props: &C::Props) {
        self.teardown_child();
        self.state = BoundaryState::Healthy;
        self.init_child(props);
    }

    fn init_child(&mut self, props: &C::Props) {
        let mounted = self.guard(|child| {
            child.on_init(props);
            Ok(())
        });
        self.child_mounted = mounted.is_ok();
    }

    fn teardown_child(&mut self) {
        if !self.child_mounted {
            return;
        }
        self.child_mounted = false;

        let child = &mut self.child;
        if panic::catch_unwind(AssertUnwindSafe(|| child.on_teardown())).is_err() {
            tracing::warn!(target: UI_TARGET, component = %self.child.name(), "Child teardown panicked");
        }
    }

    /// Run a child hook; on failure enter `Errored`.
    fn guard<R>(&mut self, f: impl FnOnce(&mut C) -> Result<R, RenderError>) -> Result<R, ErrorReport> {
        // Drop frames left by a panic someone else caught.
        take_unwind_frames();

        let child = &mut self.child;
        let err = match panic::catch_unwind(AssertUnwindSafe(|| f(child))) {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(err)) => err,
            Err(payload) => {
                let mut err = RenderError::from_panic(&*payload);
                err.component_stack = take_unwind_frames();
                err
            }
        };

        Err(self.catch(err))
    }

    fn catch(&mut self, err: RenderError) -> ErrorReport {
        let err = if err.component_stack.is_empty() {
            err.within(self.child.name())
        } else {
            err
        };

        let report = ErrorReport {
            error: err.info(),
            component_stack: err.component_stack.clone(),
            user_agent: self.environment.user_agent.clone(),
            location: self.environment.location.clone(),
            captured_at: lib_utils::now_iso_millis(),
        };
        self.state = BoundaryState::Errored(report.clone());

        // The failed subtree leaves the tree.
        self.teardown_child();

        let logger = &self.logger;
        let logged = panic::catch_unwind(AssertUnwindSafe(|| {
            logger.fatal(
                "Uncaught error in component tree",
                Some(report.error.clone()),
                Some(json!({
                    "componentStack": err.component_trace(),
                    "userAgent": report.user_agent,
                    "url": report.location,
                    "timestamp": report.captured_at,
                })),
            );
        }));
        if logged.is_err() {
            tracing::warn!(target: UI_TARGET, error = %err, "Logging a caught render error panicked");
        }

        if let Some(callback) = self.on_error.as_mut() {
            if panic::catch_unwind(AssertUnwindSafe(|| callback(&report))).is_err() {
                tracing::warn!(target: UI_TARGET, error = %err, "on_error callback panicked");
            }
        }

        report
    }

    fn render_fallback(&self, report: &ErrorReport) -> View {
        let logger = &self.logger;
        let logged = panic::catch_unwind(AssertUnwindSafe(|| {
            logger.warn(
                "Rendering error fallback",
                Some(json!({ "error": report.error.message })),
            );
        }));
        if logged.is_err() {
            tracing::warn!(target: UI_TARGET, "Logging the fallback render panicked");
        }

        let Some(fallback) = &self.fallback else {
            return default_fallback(report);
        };

        panic::catch_unwind(AssertUnwindSafe(|| fallback(report))).unwrap_or_else(|_| {
            tracing::warn!(target: UI_TARGET, "Custom fallback panicked; using the default");
            default_fallback(report)
        })
    }
}

impl<C: Component> Component for ErrorBoundary<C> {
    type Props = C::Props;

    fn name(&self) -> &str {
        BOUNDARY_NAME
    }

    fn render(&mut self, props: &Self::Props) -> Result<View, RenderError> {
        if let BoundaryState::Errored(report) = &self.state {
            return Ok(self.render_fallback(report));
        }

        match self.guard(|child| child.render(props)) {
            Ok(view) => Ok(view),
            Err(report) => Ok(self.render_fallback(&report)),
        }
    }

    fn on_init(&mut self, props: &Self::Props) {
        if let BoundaryState::Healthy = self.state {
            self.init_child(props);
        }
    }

    fn on_update(&mut self, props: &Self::Props) {
        if self.child_mounted {
            let _ = self.guard(|child| {
                child.on_update(props);
                Ok(())
            });
        }
    }

    fn on_teardown(&mut self) {
        self.teardown_child();
    }
}

/// Headline, explanation and a full-reload action.
pub fn default_fallback(_report: &ErrorReport) -> View {
    View::element("div")
        .attr("class", "error-boundary")
        .attr("role", "alert")
        .child(View::element("h2").child(View::text("Something went wrong")))
        .child(View::element("p").child(View::text(
            "An unexpected error occurred. Reload to start again.",
        )))
        .child(
            View::element("button")
                .attr("data-action", "reload")
                .child(View::text("Reload")),
        )
}

#[cfg(test)]
mod tests;
