//! # UI Instrumentation
//!
//! Framework-agnostic instrumentation for component trees, built on the
//! [`lib_core::Logger`] engine.
//!
//! - **[`component`]**: the [`Component`] trait and its three lifecycle
//!   extension points (`on_init`, `on_update`, `on_teardown`)
//! - **[`scoped`]**: [`ScopedLogger`], a logger pre-bound to one component
//! - **[`instrument`]**: [`Instrumented`], which logs mount, render, unmount
//!   and render failures of any component without changing its output
//! - **[`boundary`]**: [`ErrorBoundary`], which turns a failing subtree into
//!   a fallback view
//!
//! Host frameworks adapt their own lifecycle primitives to [`Component`];
//! nothing in this crate assumes a particular renderer.

pub mod boundary;
pub mod component;
pub mod env;
pub mod instrument;
pub mod scoped;
pub mod view;

// Re-export commonly used types
pub use boundary::{default_fallback, BoundaryState, ErrorBoundary, ErrorReport};
pub use component::{Component, RenderError};
pub use env::Environment;
pub use instrument::{InstrumentOptions, Instrumented, PROPS_PLACEHOLDER};
pub use scoped::ScopedLogger;
pub use view::View;

/// `tracing` target for this crate's own diagnostics.
pub(crate) const UI_TARGET: &str = "fitlog::ui";

#[cfg(test)]
pub(crate) mod test_support;
