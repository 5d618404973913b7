//! Sink that forwards records as `tracing` events.
//!
//! Every event carries `ns` and `severity`; remaining bindings and
//! structured fields are rendered as one JSON `fields` value, since
//! `tracing` field names must be known at compile time.

use std::sync::Arc;

use serde_json::Value;

use crate::level::Level;
use crate::sink::{merged, Fields, StructuredLogger};

/// Target of every bridged event.
pub const TARGET: &str = "debug_bridge";

macro_rules! emit {
    ($level:expr, $ns:expr, $severity:expr, $extra:ident, $message:expr) => {
        if $extra.is_empty() {
            ::tracing::event!(target: TARGET, $level, ns = %$ns, severity = $severity, "{}", $message)
        } else {
            let $extra = Value::Object($extra);
            ::tracing::event!(
                target: TARGET,
                $level,
                ns = %$ns,
                severity = $severity,
                fields = %$extra,
                "{}",
                $message
            )
        }
    };
}

#[derive(Debug, Clone, Default)]
pub struct TracingLogger {
    bindings: Fields,
}

impl TracingLogger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StructuredLogger for TracingLogger {
    fn child(&self, bindings: Fields) -> Arc<dyn StructuredLogger> {
        Arc::new(Self {
            bindings: merged(&self.bindings, bindings),
        })
    }

    fn log(&self, level: Level, fields: Fields, message: &str) {
        let mut extra = merged(&self.bindings, fields);
        let ns = match extra.remove("ns") {
            Some(Value::String(ns)) => ns,
            Some(other) => other.to_string(),
            None => String::new(),
        };
        let severity = level.as_str();

        match level {
            Level::Trace => emit!(::tracing::Level::TRACE, ns, severity, extra, message),
            Level::Debug => emit!(::tracing::Level::DEBUG, ns, severity, extra, message),
            Level::Info => emit!(::tracing::Level::INFO, ns, severity, extra, message),
            Level::Warn => emit!(::tracing::Level::WARN, ns, severity, extra, message),
            Level::Error | Level::Fatal => {
                emit!(::tracing::Level::ERROR, ns, severity, extra, message)
            }
        }
    }
}
