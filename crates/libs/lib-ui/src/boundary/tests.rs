//! # Error Boundary Tests

use super::*;
use crate::instrument::{InstrumentOptions, Instrumented};
use crate::test_support::{memory_builder_with, Card, CardProps, Mode};
use lib_core::{LogLevel, LogRecord, Logger, LoggerConfig, MemoryStore};
use parking_lot::Mutex;
use std::sync::Arc;

fn environment() -> Environment {
    Environment::new("FitTrack/2.4 (test)", "app://workouts/42")
}

fn boundary<C: Component>(child: C, store: &Arc<MemoryStore>) -> ErrorBoundary<C> {
    ErrorBoundary::new(child)
        .with_logger(ScopedLogger::with_builder(
            BOUNDARY_NAME,
            memory_builder_with(store.clone()),
        ))
        .with_environment(environment())
}

fn stored(store: &Arc<MemoryStore>) -> Vec<LogRecord> {
    Logger::builder(LoggerConfig::default())
        .store(store.clone())
        .build()
        .get_logs()
}

fn count(records: &[LogRecord], level: LogLevel) -> usize {
    records.iter().filter(|r| r.level == level).count()
}

#[test]
fn test_healthy_child_renders_through() {
    let store = Arc::new(MemoryStore::new());
    let mut b = boundary(Card::new(Mode::Healthy), &store);
    let props = CardProps::new("Deadlift");

    b.on_init(&props);
    let view = b.render(&props).unwrap();
    b.on_update(&props);

    assert_eq!(view.text_content(), "Deadlift");
    assert_eq!(b.state(), &BoundaryState::Healthy);
    assert!(stored(&store).is_empty());
}

#[test]
fn test_wrapped_failure_renders_default_fallback() {
    let store = Arc::new(MemoryStore::new());
    let reports = Arc::new(Mutex::new(Vec::<ErrorReport>::new()));
    let sink = reports.clone();

    let wrapped = Instrumented::new(
        Card::new(Mode::Fail),
        InstrumentOptions {
            logger: memory_builder_with(store.clone()),
            ..Default::default()
        },
    );
    let mut b = boundary(wrapped, &store).on_error(move |report| sink.lock().push(report.clone()));
    let props = CardProps::new("Squat");

    b.on_init(&props);
    let view = b.render(&props).unwrap();

    assert!(view.text_content().contains("Something went wrong"));
    assert!(view.find("button").is_some());
    assert!(b.is_errored());

    let reports = reports.lock();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].error.message, "exercise list missing");
    assert_eq!(reports[0].component_stack, vec!["WorkoutCard"]);
    assert_eq!(reports[0].user_agent, "FitTrack/2.4 (test)");
    assert_eq!(reports[0].location, "app://workouts/42");
    assert!(lib_utils::parse_utc(&reports[0].captured_at).is_ok());

    let records = stored(&store);
    let fatal: Vec<&LogRecord> = records.iter().filter(|r| r.level == LogLevel::Fatal).collect();
    assert_eq!(fatal.len(), 1);
    assert_eq!(fatal[0].component.as_deref(), Some(BOUNDARY_NAME));
    assert_eq!(fatal[0].error.as_ref().unwrap().message, "exercise list missing");
    let context = fatal[0].context.as_ref().unwrap();
    assert_eq!(context["componentStack"], "    in WorkoutCard");
    assert_eq!(context["url"], "app://workouts/42");

    // Wrapper logged the render error, then unmount when the boundary dropped the subtree.
    assert!(records.iter().any(|r| r.action.as_deref() == Some("render-error")));
    assert!(records.iter().any(|r| r.action.as_deref() == Some("unmount")));
    assert_eq!(count(&records, LogLevel::Warn), 1);
}

#[test]
fn test_errored_is_terminal_until_remount() {
    let store = Arc::new(MemoryStore::new());
    let card = Card::new(Mode::Fail);
    let mode = card.mode.clone();
    let hooks = card.hooks.clone();
    let mut b = boundary(card, &store);
    let props = CardProps::new("Bench");

    b.on_init(&props);
    b.render(&props).unwrap();
    *mode.lock() = Mode::Healthy;

    for _ in 0..3 {
        let view = b.render(&props).unwrap();
        assert!(view.text_content().contains("Something went wrong"));
        b.on_update(&props);
    }
    assert_eq!(hooks.lock().updates, 0);

    let records = stored(&store);
    assert_eq!(count(&records, LogLevel::Fatal), 1);
    assert_eq!(count(&records, LogLevel::Warn), 4);

    b.remount(&props);
    assert_eq!(b.state(), &BoundaryState::Healthy);
    assert_eq!(b.render(&props).unwrap().text_content(), "Bench");

    let hooks = hooks.lock();
    assert_eq!((hooks.inits, hooks.teardowns), (2, 1));
}

#[test]
fn test_panicking_child_is_caught() {
    let store = Arc::new(MemoryStore::new());
    let mut b = boundary(Card::new(Mode::Panic), &store);
    let props = CardProps::new("Row");

    b.on_init(&props);
    let view = b.render(&props).unwrap();

    assert!(view.text_content().contains("Something went wrong"));
    let BoundaryState::Errored(report) = b.state() else {
        panic!("boundary should be errored");
    };
    assert_eq!(report.error.name, "Panic");
    assert_eq!(report.error.message, "set index out of range");
}

#[test]
fn test_panic_and_error_record_the_same_component_stack() {
    let store = Arc::new(MemoryStore::new());
    let nested = |mode| {
        let inner = Instrumented::new(
            Card::new(mode),
            InstrumentOptions {
                logger: memory_builder_with(store.clone()),
                ..Default::default()
            },
        );
        Instrumented::new(
            inner,
            InstrumentOptions {
                name: Some("WorkoutScreen".to_string()),
                logger: memory_builder_with(store.clone()),
                ..Default::default()
            },
        )
    };
    let props = CardProps::new("Press");

    for mode in [Mode::Fail, Mode::Panic] {
        let mut b = boundary(nested(mode), &store);
        b.on_init(&props);
        b.render(&props).unwrap();

        let BoundaryState::Errored(report) = b.state() else {
            panic!("boundary should be errored for {mode:?}");
        };
        assert_eq!(report.component_stack, vec!["WorkoutCard", "WorkoutScreen"], "{mode:?}");
    }
}

#[test]
fn test_custom_fallback_receives_report() {
    let store = Arc::new(MemoryStore::new());
    let mut b = boundary(Card::new(Mode::Fail), &store)
        .with_fallback(|report| View::element("p").child(View::text(format!("Oops: {}", report.error.message))));
    let props = CardProps::new("Curl");

    b.on_init(&props);
    let view = b.render(&props).unwrap();

    assert_eq!(view.text_content(), "Oops: exercise list missing");
}

#[test]
fn test_failing_callbacks_do_not_mask_fallback() {
    let store = Arc::new(MemoryStore::new());
    let mut b = boundary(Card::new(Mode::Fail), &store)
        .on_error(|_| panic!("reporting service down"))
        .with_fallback(|_| panic!("fallback broken"));
    let props = CardProps::new("Dips");

    b.on_init(&props);
    let view = b.render(&props).unwrap();

    assert!(view.text_content().contains("Something went wrong"));
    let BoundaryState::Errored(report) = b.state() else {
        panic!("boundary should be errored");
    };
    assert_eq!(report.error.message, "exercise list missing");
    assert_eq!(count(&stored(&store), LogLevel::Fatal), 1);
}

#[test]
fn test_nested_boundaries_contain_failure() {
    let store = Arc::new(MemoryStore::new());
    let inner = boundary(Card::new(Mode::Fail), &store);
    let mut outer = boundary(inner, &store);
    let props = CardProps::new("Lunge");

    outer.on_init(&props);
    let view = outer.render(&props).unwrap();

    assert!(view.text_content().contains("Something went wrong"));
    assert!(!outer.is_errored());
    assert!(outer.child().is_errored());
}
