//! Debug-to-structured-logging bridge.
//!
//! Namespaced debug calls (`debugger("app:db")`) are routed to a severity
//! level by a precision-ranked glob table and written through a structured
//! logger sink.

pub mod bridge;
pub mod config;
pub mod error;
pub mod format;
pub mod level;
pub mod observability;
pub mod routing;
pub mod sink;

pub use bridge::{
    debugger, global, install, install_bridge, install_default, is_enabled, resolve, Bridge, Debugger, Registry,
};
pub use config::BridgeConfig;
pub use error::BridgeError;
pub use format::{Call, DebugArg, ErrorValue};
pub use level::Level;
pub use routing::CompiledPatternTable;
pub use sink::{Fields, JsonLogger, StructuredLogger, TracingLogger};
