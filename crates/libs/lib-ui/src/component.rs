//! # Component Model
//!
//! A host drives a [`Component`] through a fixed lifecycle:
//!
//! 1. `on_init(props)` once, before the first render
//! 2. `render(props)` for every render pass
//! 3. `on_update(props)` after every committed render, the first included
//! 4. `on_teardown()` once, when the component leaves the tree
//!
//! A render either returns a [`View`] or fails with a [`RenderError`].
//! Panics raised inside `render` are treated as failures by the
//! instrumentation in this crate. A panic keeps its original payload, so the
//! components it unwinds through are recorded on a per-thread frame list
//! instead (see [`note_unwind_frame`]).

use lib_core::ErrorInfo;
use std::any::Any;
use std::cell::RefCell;

use crate::view::View;

pub trait Component {
    type Props;

    /// Display name used for log tags and component stacks.
    fn name(&self) -> &str;

    fn render(&mut self, props: &Self::Props) -> Result<View, RenderError>;

    fn on_init(&mut self, _props: &Self::Props) {}

    fn on_update(&mut self, _props: &Self::Props) {}

    fn on_teardown(&mut self) {}
}

/// A failed render.
///
/// `component_stack` lists the components the failure passed through,
/// innermost first.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{name}: {message}")]
pub struct RenderError {
    pub name: String,
    pub message: String,
    pub stack: Option<String>,
    pub component_stack: Vec<String>,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            name: "RenderError".to_string(),
            message: message.into(),
            stack: None,
            component_stack: Vec::new(),
        }
    }

    /// Wrap any error raised while rendering.
    pub fn from_error<E>(err: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        ErrorInfo::capture(err).into()
    }

    /// Describe a panic payload caught around a render.
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        Self {
            name: "Panic".to_string(),
            message,
            stack: None,
            component_stack: Vec::new(),
        }
    }

    /// Record that the failure propagated out of `component`.
    pub fn within(mut self, component: impl Into<String>) -> Self {
        self.component_stack.push(component.into());
        self
    }

    /// Component stack as indented `in <Name>` lines.
    pub fn component_trace(&self) -> String {
        self.component_stack
            .iter()
            .map(|c| format!("    in {c}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn info(&self) -> ErrorInfo {
        ErrorInfo {
            name: self.name.clone(),
            message: self.message.clone(),
            stack: self.stack.clone(),
        }
    }
}

thread_local! {
    static UNWIND_FRAMES: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Record that a panic is unwinding out of `component`.
pub(crate) fn note_unwind_frame(component: impl Into<String>) {
    UNWIND_FRAMES.with(|frames| frames.borrow_mut().push(component.into()));
}

/// Frames noted since the last call, innermost first.
pub(crate) fn take_unwind_frames() -> Vec<String> {
    UNWIND_FRAMES.with(|frames| std::mem::take(&mut *frames.borrow_mut()))
}

impl From<ErrorInfo> for RenderError {
    fn from(info: ErrorInfo) -> Self {
        Self {
            name: info.name,
            message: info.message,
            stack: info.stack,
            component_stack: Vec::new(),
        }
    }
}
