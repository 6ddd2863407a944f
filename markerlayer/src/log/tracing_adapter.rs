//! `tracing` backend for [`Logger`].

use std::fmt::Arguments;

use crate::log::{LogLevel, Logger};

/// Forwards log lines to the `tracing` subscriber installed by the host.
///
/// Events carry the `markerlayer` target so they can be filtered with
/// `RUST_LOG=markerlayer=debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        match level {
            LogLevel::Trace => tracing::trace!(target: "markerlayer", "{}", args),
            LogLevel::Debug => tracing::debug!(target: "markerlayer", "{}", args),
            LogLevel::Info => tracing::info!(target: "markerlayer", "{}", args),
            LogLevel::Warn => tracing::warn!(target: "markerlayer", "{}", args),
            LogLevel::Error => tracing::error!(target: "markerlayer", "{}", args),
        }
    }
}
