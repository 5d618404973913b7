//! Structured logger sinks.
//!
//! # Data Flow
//! ```text
//! Debugger::log(args)
//!     → format.rs (Call::Structured | Call::Formatted)
//!     → StructuredLogger::log(level, fields, message)
//!         → tracing.rs (tracing events, any subscriber)
//!         → json.rs (one JSON object per line to a writer)
//! ```
//!
//! # Design Decisions
//! - Sinks are trait objects so callers can bring their own
//! - `child` returns a new logger carrying extra bindings (e.g. `ns`);
//!   the parent is never mutated
//! - Emission never fails from the caller's point of view

pub mod json;
pub mod tracing;

use std::fmt::Debug;
use std::sync::Arc;

use crate::level::Level;

pub use self::json::JsonLogger;
pub use self::tracing::TracingLogger;

/// Structured fields attached to a record.
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// The structured logger contract.
pub trait StructuredLogger: Send + Sync + Debug {
    /// A logger that adds `bindings` to every record it writes.
    fn child(&self, bindings: Fields) -> Arc<dyn StructuredLogger>;

    /// Write one record.
    fn log(&self, level: Level, fields: Fields, message: &str);

    fn trace(&self, fields: Fields, message: &str) {
        self.log(Level::Trace, fields, message)
    }

    fn debug(&self, fields: Fields, message: &str) {
        self.log(Level::Debug, fields, message)
    }

    fn info(&self, fields: Fields, message: &str) {
        self.log(Level::Info, fields, message)
    }

    fn warn(&self, fields: Fields, message: &str) {
        self.log(Level::Warn, fields, message)
    }

    fn error(&self, fields: Fields, message: &str) {
        self.log(Level::Error, fields, message)
    }

    fn fatal(&self, fields: Fields, message: &str) {
        self.log(Level::Fatal, fields, message)
    }
}

/// Merge `extra` over a copy of `base`.
pub(crate) fn merged(base: &Fields, extra: Fields) -> Fields {
    let mut out = base.clone();
    out.extend(extra);
    out
}
