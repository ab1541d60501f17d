//! Shared fixtures for instrumentation tests.

use lib_core::{KeyValueStore, LoggerBuilder, LoggerConfig, MemoryStore};
use std::sync::Arc;

/// Builder over a fresh in-memory store with console output off.
pub fn memory_builder() -> LoggerBuilder {
    memory_builder_with(Arc::new(MemoryStore::new()))
}

pub fn memory_builder_with(store: Arc<dyn KeyValueStore>) -> LoggerBuilder {
    LoggerBuilder::new(LoggerConfig {
        enable_console: false,
        ..Default::default()
    })
    .store(store)
}

// region:    --- Fixture component

use crate::component::{Component, RenderError};
use crate::view::View;
use parking_lot::Mutex;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CardProps {
    pub title: String,
    pub password: String,
}

impl CardProps {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            password: "hunter2".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Healthy,
    Fail,
    Panic,
}

/// Lifecycle hooks seen by a [`Card`].
#[derive(Debug, Default)]
pub struct Hooks {
    pub inits: u32,
    pub updates: u32,
    pub teardowns: u32,
}

/// Renders its title; fails or panics on demand.
pub struct Card {
    pub mode: Arc<Mutex<Mode>>,
    pub hooks: Arc<Mutex<Hooks>>,
}

impl Card {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode: Arc::new(Mutex::new(mode)),
            hooks: Arc::new(Mutex::new(Hooks::default())),
        }
    }
}

impl Component for Card {
    type Props = CardProps;

    fn name(&self) -> &str {
        "WorkoutCard"
    }

    fn render(&mut self, props: &CardProps) -> Result<View, RenderError> {
        let mode = *self.mode.lock();
        match mode {
            Mode::Healthy => Ok(View::element("div").child(View::text(props.title.clone()))),
            Mode::Fail => Err(RenderError::new("exercise list missing")),
            Mode::Panic => panic!("set index out of range"),
        }
    }

    fn on_init(&mut self, _props: &CardProps) {
        self.hooks.lock().inits += 1;
    }

    fn on_update(&mut self, _props: &CardProps) {
        self.hooks.lock().updates += 1;
    }

    fn on_teardown(&mut self) {
        self.hooks.lock().teardowns += 1;
    }
}

// endregion: --- Fixture component
