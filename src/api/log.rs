//! Logging capability injected into the request context.
//!
//! The context never calls a process-wide logger directly; it writes
//! line-oriented progress through a [`LogSink`] handed to it at construction.
//! [`TracingLog`] is the production sink, [`CaptureLog`] collects lines in
//! memory so tests can assert on them.

use std::sync::Mutex;

/// Sink for per-request, line-oriented log output.
pub trait LogSink: Send + Sync {
    /// Write a progress line.
    fn info(&self, line: &str);

    /// Write an error line.
    fn error(&self, line: &str);
}

/// Default sink: forwards lines to the `tracing` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLog;

impl LogSink for TracingLog {
    fn info(&self, line: &str) {
        tracing::info!("{}", line);
    }

    fn error(&self, line: &str) {
        tracing::error!("{}", line);
    }
}

/// Sink that records every line, for asserting on log output in tests.
#[derive(Debug, Default)]
pub struct CaptureLog {
    lines: Mutex<Vec<String>>,
}

impl CaptureLog {
    /// Create an empty capture sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all lines written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("capture log poisoned").clone()
    }
}

impl LogSink for CaptureLog {
    fn info(&self, line: &str) {
        self.lines
            .lock()
            .expect("capture log poisoned")
            .push(format!("INFO {}", line));
    }

    fn error(&self, line: &str) {
        self.lines
            .lock()
            .expect("capture log poisoned")
            .push(format!("ERROR {}", line));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_log_records_lines() {
        let log = CaptureLog::new();
        log.info("abc : api : respond [200] : Started");
        log.error("abc : api : respond [200] : Failed");

        let lines = log.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "INFO abc : api : respond [200] : Started");
        assert_eq!(lines[1], "ERROR abc : api : respond [200] : Failed");
    }

    #[test]
    fn test_capture_log_is_shareable() {
        use std::sync::Arc;

        let log = Arc::new(CaptureLog::new());
        let sink: Arc<dyn LogSink> = log.clone();
        sink.info("line");

        assert_eq!(log.lines().len(), 1);
    }
}
