//! Helpers for asserting on console output.

use parking_lot::Mutex;
use std::io;
use std::sync::Arc;

use crate::CONSOLE_TARGET;

#[derive(Clone, Default)]
pub struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl CaptureWriter {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a thread-local subscriber and return what it printed.
pub fn capture_console<R>(f: impl FnOnce() -> R) -> (R, String) {
    let writer = CaptureWriter::default();
    let make_writer = writer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || make_writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (result, writer.contents())
}

/// Lines emitted by the console sink.
pub fn console_lines(output: &str) -> Vec<&str> {
    let marker = format!("{CONSOLE_TARGET}:");
    output.lines().filter(|line| line.contains(&marker)).collect()
}
