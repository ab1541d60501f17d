//! # Lifecycle Instrumentation
//!
//! [`Instrumented`] wraps any [`Component`] and logs its lifecycle through a
//! [`ScopedLogger`] it owns: created at `on_init`, dropped at `on_teardown`.
//! Output, props and failures of the wrapped component are passed through
//! unchanged.
//!
//! | event        | level | action         | context                    |
//! |--------------|-------|----------------|----------------------------|
//! | mount        | INFO  | `mount`        | `{props}` if `log_props`   |
//! | render       | DEBUG | `render`       | `{renderCount}`            |
//! | unmount      | INFO  | `unmount`      | `{lifetimeMs, renderCount}`|
//! | render error | ERROR | `render-error` | `{props}` or placeholder   |
//!
//! A failed render is logged and then returned (or, for a panic, resumed)
//! so an enclosing [`ErrorBoundary`](crate::ErrorBoundary) still sees it.
//! Either way the wrapper's name joins the failure's component stack.

use lib_core::{context_of, LogLevel, LoggerBuilder};
use serde::Serialize;
use serde_json::json;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use crate::component::{note_unwind_frame, Component, RenderError};
use crate::scoped::ScopedLogger;
use crate::view::View;

/// Logged in place of props when `log_props` is off.
pub const PROPS_PLACEHOLDER: &str = "[props not logged]";

#[derive(Clone)]
pub struct InstrumentOptions {
    /// Overrides the wrapped component's own name
    pub name: Option<String>,
    pub log_mount: bool,
    pub log_unmount: bool,
    pub log_render: bool,
    pub log_props: bool,
    /// Builds the per-instance logger at mount
    pub logger: LoggerBuilder,
}

impl Default for InstrumentOptions {
    fn default() -> Self {
        Self {
            name: None,
            log_mount: true,
            log_unmount: true,
            log_render: false,
            log_props: false,
            logger: LoggerBuilder::default(),
        }
    }
}

pub struct Instrumented<C: Component> {
    inner: C,
    options: InstrumentOptions,
    logger: Option<ScopedLogger>,
    mounted_at: Option<Instant>,
    render_count: u64,
}

impl<C: Component> Instrumented<C> {
    pub fn new(inner: C, options: InstrumentOptions) -> Self {
        Self {
            inner,
            options,
            logger: None,
            mounted_at: None,
            render_count: 0,
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Committed renders since mount.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// The per-instance logger, while mounted.
    pub fn scoped_logger(&self) -> Option<&ScopedLogger> {
        self.logger.as_ref()
    }

    fn display_name(&self) -> String {
        self.options
            .name
            .clone()
            .unwrap_or_else(|| self.inner.name().to_string())
    }

    fn ensure_logger(&mut self) -> &ScopedLogger {
        let name = self.display_name();
        let builder = &self.options.logger;
        self.logger
            .get_or_insert_with(|| ScopedLogger::with_builder(name, builder.clone()))
    }
}

impl<C> Instrumented<C>
where
    C: Component,
    C::Props: Serialize,
{
    fn log_render_error(&mut self, err: &RenderError, props: &C::Props) {
        let props = if self.options.log_props {
            context_of(props)
        } else {
            json!(PROPS_PLACEHOLDER)
        };
        let name = self.display_name();
        self.ensure_logger().tagged_error(
            LogLevel::Error,
            &format!("Render error in {name}"),
            "render-error",
            err.info(),
            Some(json!({ "props": props })),
        );
    }
}

impl<C> Component for Instrumented<C>
where
    C: Component,
    C::Props: Serialize,
{
    type Props = C::Props;

    fn name(&self) -> &str {
        self.options.name.as_deref().unwrap_or_else(|| self.inner.name())
    }

    fn render(&mut self, props: &Self::Props) -> Result<View, RenderError> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.inner.render(props)));

        match outcome {
            Ok(Ok(view)) => Ok(view),
            Ok(Err(err)) => {
                self.log_render_error(&err, props);
                Err(err.within(self.display_name()))
            }
            Err(payload) => {
                let err = RenderError::from_panic(&*payload);
                self.log_render_error(&err, props);
                note_unwind_frame(self.display_name());
                panic::resume_unwind(payload)
            }
        }
    }

    fn on_init(&mut self, props: &Self::Props) {
        self.logger = None;
        self.mounted_at = Some(Instant::now());
        self.render_count = 0;

        let context = self
            .options
            .log_props
            .then(|| json!({ "props": context_of(props) }));
        let log_mount = self.options.log_mount;
        let name = self.display_name();
        let logger = self.ensure_logger();
        if log_mount {
            logger.tagged(LogLevel::Info, &format!("{name} mounted"), "mount", context);
        }

        self.inner.on_init(props);
    }

    fn on_update(&mut self, props: &Self::Props) {
        self.render_count += 1;

        if self.options.log_render {
            let count = self.render_count;
            let name = self.display_name();
            self.ensure_logger().tagged(
                LogLevel::Debug,
                &format!("{name} rendered"),
                "render",
                Some(json!({ "renderCount": count })),
            );
        }

        self.inner.on_update(props);
    }

    fn on_teardown(&mut self) {
        self.inner.on_teardown();

        if self.options.log_unmount {
            let lifetime_ms = self
                .mounted_at
                .map(|t| t.elapsed().as_millis() as u64)
                .unwrap_or(0);
            let count = self.render_count;
            let name = self.display_name();
            self.ensure_logger().tagged(
                LogLevel::Info,
                &format!("{name} unmounted"),
                "unmount",
                Some(json!({ "lifetimeMs": lifetime_ms, "renderCount": count })),
            );
        }

        self.logger = None;
        self.mounted_at = None;
    }
}
