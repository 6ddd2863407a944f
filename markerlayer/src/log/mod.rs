//! Logger abstraction used by the map session.
//!
//! Library components log through an `Arc<dyn Logger>` so hosts decide where
//! diagnostics go:
//!
//! - [`TracingLogger`] forwards to the `tracing` crate (CLI and services)
//! - [`NoOpLogger`] discards everything (benchmarks, quiet embedding)
//! - [`CapturingLogger`] keeps lines in memory so tests can assert on them
//!
//! ```
//! use markerlayer::log::{CapturingLogger, LogLevel, Logger};
//! use markerlayer::log_warn;
//! use std::sync::Arc;
//!
//! let logger = Arc::new(CapturingLogger::new());
//! log_warn!(logger, "lookup for {}={} missed", "id", "b");
//! assert!(logger.contains(LogLevel::Warn, "id=b"));
//! ```

mod capture;
mod noop;
mod tracing_adapter;
mod r#trait;

pub use capture::{CapturedLine, CapturingLogger};
pub use noop::NoOpLogger;
pub use r#trait::{LogLevel, Logger};
pub use tracing_adapter::TracingLogger;
