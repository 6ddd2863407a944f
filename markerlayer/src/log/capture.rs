//! In-memory logger for assertions.

use std::fmt::Arguments;

use parking_lot::Mutex;

use crate::log::{LogLevel, Logger};

/// A captured log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedLine {
    pub level: LogLevel,
    pub message: String,
}

/// Keeps every line it receives.
#[derive(Debug, Default)]
pub struct CapturingLogger {
    lines: Mutex<Vec<CapturedLine>>,
}

impl CapturingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all captured lines, oldest first.
    pub fn lines(&self) -> Vec<CapturedLine> {
        self.lines.lock().clone()
    }

    /// Whether any line at `level` contains `needle`.
    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.lines
            .lock()
            .iter()
            .any(|line| line.level == level && line.message.contains(needle))
    }

    pub fn count(&self, level: LogLevel) -> usize {
        self.lines.lock().iter().filter(|l| l.level == level).count()
    }
}

impl Logger for CapturingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        self.lines.lock().push(CapturedLine {
            level,
            message: args.to_string(),
        });
    }
}
