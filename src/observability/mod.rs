//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Bridged debug calls and crate diagnostics produce:
//!     → tracing events (target "debug_bridge" for bridged records)
//!     → logging.rs (subscriber: filter + pretty/JSON formatter)
//!
//! Consumers:
//!     → stdout (pretty for development, JSON for machines)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Library code never installs a subscriber; the binary does

pub mod logging;
