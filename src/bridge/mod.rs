//! The configured bridge and the debugger handles it hands out.
//!
//! # Data Flow
//! ```text
//! install(config, logger)
//!     → Bridge::new: compile table, build enabled set
//!     → registry.rs: bind once per process
//!
//! debugger("app:db")
//!     → enabled? (captured at creation)
//!     → resolve level only if enabled (Debug if no pattern matches)
//!     → child logger bound with { ns: "app:db" }
//!
//! Debugger::log(args)
//!     → format.rs → logger.log(level, fields, message)
//! ```
//!
//! # Design Decisions
//! - The routing table is immutable; only the enabled set can be replaced
//! - The enabled set lives behind an `ArcSwap`, so readers never lock
//! - A debugger snapshots its enabled flag and level, as the debug
//!   convention does; create a new one to observe a later `enable`

pub mod registry;

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde_json::Value;

use crate::config::env::enablement_from_env;
use crate::config::schema::BridgeConfig;
use crate::format::{Call, DebugArg};
use crate::level::Level;
use crate::routing::enabled::{EnabledSet, NEGATION};
use crate::routing::router::CompiledPatternTable;
use crate::sink::{Fields, StructuredLogger};

pub use registry::{
    debugger, global, install, install_bridge, install_default, is_enabled, resolve, Registry,
};

/// Delimiter used by `Debugger::extend` when none is given.
pub const DEFAULT_DELIMITER: &str = ":";

struct Inner {
    table: CompiledPatternTable,
    enabled: ArcSwap<EnabledSet>,
    logger: Arc<dyn StructuredLogger>,
}

/// One routing configuration bound to a sink. Cheap to clone.
#[derive(Clone)]
pub struct Bridge {
    inner: Arc<Inner>,
}

impl Bridge {
    /// Build a bridge, taking the enablement list from `DEBUG`.
    pub fn new(config: &BridgeConfig, logger: Arc<dyn StructuredLogger>) -> Self {
        Self::with_enablement(config, logger, enablement_from_env())
    }

    /// Build a bridge with an explicit enablement list.
    ///
    /// The enabled set is the list, then every map pattern (when `auto`
    /// is on), then every skip entry negated.
    pub fn with_enablement<I, S>(
        config: &BridgeConfig,
        logger: Arc<dyn StructuredLogger>,
        enablement: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let table = CompiledPatternTable::compile(config.map.iter());

        let mut entries: Vec<String> = enablement.into_iter().map(Into::into).collect();
        if config.auto {
            entries.extend(
                table
                    .routes()
                    .iter()
                    .map(|route| route.matcher.pattern().to_string()),
            );
        }
        entries.extend(
            config
                .skip
                .iter()
                .map(|ns| format!("{NEGATION}{}", ns.trim())),
        );
        let enabled = EnabledSet::from_entries(&entries);

        tracing::debug!(
            routes = table.len(),
            auto = config.auto,
            enabled = %enabled.as_str(),
            "Routing table compiled"
        );

        Self {
            inner: Arc::new(Inner {
                table,
                enabled: ArcSwap::from_pointee(enabled),
                logger,
            }),
        }
    }

    pub fn table(&self) -> &CompiledPatternTable {
        &self.inner.table
    }

    pub fn logger(&self) -> &Arc<dyn StructuredLogger> {
        &self.inner.logger
    }

    /// Level routed to `namespace`, or `None` if no pattern matches.
    pub fn resolve(&self, namespace: &str) -> Option<Level> {
        self.inner.table.resolve(namespace)
    }

    /// Whether `namespace` may emit at all.
    pub fn is_enabled(&self, namespace: &str) -> bool {
        self.inner.enabled.load().is_enabled(namespace)
    }

    /// Enabled check followed by level lookup. `None` means "do not emit".
    pub fn lookup(&self, namespace: &str) -> Option<Level> {
        if !self.is_enabled(namespace) {
            return None;
        }
        Some(self.resolve(namespace).unwrap_or_default())
    }

    /// Replace the enabled set with `list` (whitespace or comma separated).
    pub fn enable(&self, list: &str) {
        let set = EnabledSet::parse(list);
        tracing::debug!(enabled = %set.as_str(), "Enabled namespaces replaced");
        self.inner.enabled.store(Arc::new(set));
    }

    /// Disable everything; returns the list that was enabled.
    pub fn disable(&self) -> String {
        let previous = self.inner.enabled.swap(Arc::new(EnabledSet::default()));
        previous.as_str().to_string()
    }

    /// The current enablement list, comma separated.
    pub fn enabled_list(&self) -> String {
        self.inner.enabled.load().as_str().to_string()
    }

    /// A debugger for `namespace`.
    pub fn debugger(&self, namespace: impl Into<String>) -> Debugger {
        let namespace = namespace.into();
        let enabled = self.is_enabled(&namespace);
        let level = if enabled {
            self.resolve(&namespace).unwrap_or_default()
        } else {
            Level::default()
        };

        let mut bindings = Fields::new();
        bindings.insert("ns".into(), Value::from(namespace.as_str()));
        let logger = self.inner.logger.child(bindings);

        Debugger {
            bridge: self.clone(),
            namespace,
            level,
            enabled,
            logger,
        }
    }
}

impl fmt::Debug for Bridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bridge")
            .field("table", &self.inner.table)
            .field("enabled", &self.enabled_list())
            .field("logger", &self.inner.logger)
            .finish()
    }
}

/// A handle bound to one namespace.
#[derive(Clone)]
pub struct Debugger {
    bridge: Bridge,
    namespace: String,
    level: Level,
    enabled: bool,
    logger: Arc<dyn StructuredLogger>,
}

impl Debugger {
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Whether this debugger writes anything.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Level every record from this debugger is written at.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Write one record. No-op when disabled.
    pub fn log<I>(&self, args: I)
    where
        I: IntoIterator<Item = DebugArg>,
    {
        if !self.enabled {
            return;
        }
        let (fields, message) = Call::from_args(args.into_iter().collect()).into_parts();
        self.logger.log(self.level, fields, &message);
    }

    /// A debugger for `namespace + delimiter + sub`; `:` by default.
    pub fn extend(&self, sub: &str, delimiter: Option<&str>) -> Debugger {
        let delimiter = delimiter.unwrap_or(DEFAULT_DELIMITER);
        self.bridge
            .debugger(format!("{}{}{}", self.namespace, delimiter, sub))
    }
}

impl fmt::Debug for Debugger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debugger")
            .field("namespace", &self.namespace)
            .field("level", &self.level)
            .field("enabled", &self.enabled)
            .finish()
    }
}

/// Log through a debugger with mixed argument types.
///
/// ```ignore
/// debug_log!(dbg, "loaded %d rows", 42);
/// debug_log!(dbg, json!({"user": 7}), "login");
/// ```
#[macro_export]
macro_rules! debug_log {
    ($debugger:expr, $($arg:expr),+ $(,)?) => {
        $debugger.log($crate::debug_args![$($arg),+])
    };
}
