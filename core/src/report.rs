//! Line-oriented reporting sink.
//!
//! The engine emits human-readable progress text (arrivals, discharges,
//! warnings) and the end-of-run statistics block through a [`ReportSink`].
//! The sink is write-only from the engine's point of view; where the lines
//! end up (terminal, buffer, log file) is the caller's business.

use std::cell::RefCell;
use std::rc::Rc;

/// Write-only channel for human-readable simulation output.
pub trait ReportSink {
    /// Emit one line of text (without trailing newline).
    fn line(&mut self, text: &str);
}

/// Sink that prints each line to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl ReportSink for StdoutSink {
    fn line(&mut self, text: &str) {
        println!("{}", text);
    }
}

/// Sink that collects lines into a shared buffer.
///
/// Clones share the same buffer, so a test can hand one clone to the engine
/// and inspect the lines through another after the run.
///
/// # Example
/// ```
/// use er_simulator_core_rs::{BufferSink, ReportSink};
///
/// let sink = BufferSink::new();
/// let mut writer = sink.clone();
/// writer.line("10: Arrived: someone");
///
/// assert_eq!(sink.lines(), vec!["10: Arrived: someone".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    lines: Rc<RefCell<Vec<String>>>,
}

impl BufferSink {
    /// Create an empty buffering sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all lines emitted so far, in order
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl ReportSink for BufferSink {
    fn line(&mut self, text: &str) {
        self.lines.borrow_mut().push(text.to_string());
    }
}
