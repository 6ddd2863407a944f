//! Logger trait and level.

use std::fmt::{self, Arguments};

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// Sink for diagnostics emitted by map components.
///
/// Only [`Logger::log`] is required; the level helpers forward to it.
pub trait Logger: Send + Sync {
    fn log(&self, level: LogLevel, args: Arguments<'_>);

    fn trace(&self, args: Arguments<'_>) {
        self.log(LogLevel::Trace, args);
    }

    fn debug(&self, args: Arguments<'_>) {
        self.log(LogLevel::Debug, args);
    }

    fn info(&self, args: Arguments<'_>) {
        self.log(LogLevel::Info, args);
    }

    fn warn(&self, args: Arguments<'_>) {
        self.log(LogLevel::Warn, args);
    }

    fn error(&self, args: Arguments<'_>) {
        self.log(LogLevel::Error, args);
    }
}

#[macro_export]
macro_rules! log_trace {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log::Logger::trace(&*$logger, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log::Logger::debug(&*$logger, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log::Logger::info(&*$logger, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log::Logger::warn(&*$logger, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log::Logger::error(&*$logger, format_args!($($arg)*))
    };
}
