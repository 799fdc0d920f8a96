//! In-memory log sink for scoped subscribers.
//!
//! # Design
//! - Components accept an optional [`Dispatch`] instead of relying on the
//!   process-wide subscriber; `LogCapture` builds one that records lines.
//! - Output is plain text without timestamps or ANSI codes so assertions stay
//!   deterministic.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::Dispatch;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt};

use crate::lines::LineBuffer;

/// Shared buffer of formatted log lines.
#[derive(Clone, Debug, Default)]
pub struct LogCapture {
    lines: Arc<Mutex<Vec<String>>>,
}

impl LogCapture {
    /// Create an empty capture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dispatcher that formats events at `level` or above into this capture.
    #[must_use]
    pub fn dispatch(&self, level: &str) -> Dispatch {
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new(level))
            .with(
                fmt::layer()
                    .with_writer(self.clone())
                    .with_ansi(false)
                    .with_target(false)
                    .without_time(),
            );
        Dispatch::new(subscriber)
    }

    /// Snapshot of every captured line.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether any captured line contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|line| line.contains(needle))
    }

    fn append(&self, lines: Vec<String>) {
        let mut guard = self.lines.lock().unwrap_or_else(PoisonError::into_inner);
        guard.extend(lines.into_iter().filter(|line| !line.is_empty()));
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            sink: self.clone(),
            buffer: LineBuffer::default(),
        }
    }
}

/// Writer handed to the formatter for a single event.
#[derive(Debug)]
pub struct CaptureWriter {
    sink: LogCapture,
    buffer: LineBuffer,
}

impl Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let lines = self.buffer.push(buf);
        self.sink.append(lines);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for CaptureWriter {
    fn drop(&mut self) {
        if let Some(line) = self.buffer.finish() {
            self.sink.append(vec![line]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_records_events_within_scope() {
        let capture = LogCapture::new();
        let dispatch = capture.dispatch("info");
        tracing::dispatcher::with_default(&dispatch, || {
            tracing::info!(case = "cavity", "copying tutorial");
            tracing::debug!("filtered out");
        });

        let lines = capture.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("INFO"));
        assert!(capture.contains("copying tutorial"));
        assert!(capture.contains("case=\"cavity\""));
        assert!(!capture.contains("filtered out"));
    }

    #[test]
    fn capture_ignores_events_outside_scope() {
        let capture = LogCapture::new();
        let _dispatch = capture.dispatch("trace");
        tracing::warn!("not captured");
        assert!(capture.lines().is_empty());
    }
}
