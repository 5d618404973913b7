//! One-shot bridge installation.
//!
//! A registry is either unconfigured or bound to exactly one bridge.
//! Binding twice fails with `AlreadyConfigured`; the first bridge stays.

use std::io::{self, Write};
use std::sync::{Arc, OnceLock};

use crate::bridge::{Bridge, Debugger};
use crate::config::env::enablement_from_env;
use crate::config::schema::BridgeConfig;
use crate::error::BridgeError;
use crate::level::Level;
use crate::sink::{JsonLogger, StructuredLogger};

/// Holds at most one bridge.
#[derive(Debug, Default)]
pub struct Registry {
    slot: OnceLock<Bridge>,
}

impl Registry {
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// Bind `bridge`. Fails if a bridge is already bound.
    pub fn configure(&self, bridge: Bridge) -> Result<&Bridge, BridgeError> {
        self.slot
            .set(bridge)
            .map_err(|_| BridgeError::AlreadyConfigured)?;
        self.get()
    }

    /// The bound bridge.
    pub fn get(&self) -> Result<&Bridge, BridgeError> {
        self.slot.get().ok_or(BridgeError::NotConfigured)
    }

    pub fn is_configured(&self) -> bool {
        self.slot.get().is_some()
    }

    pub fn resolve(&self, namespace: &str) -> Result<Option<Level>, BridgeError> {
        Ok(self.get()?.resolve(namespace))
    }

    pub fn is_enabled(&self, namespace: &str) -> Result<bool, BridgeError> {
        Ok(self.get()?.is_enabled(namespace))
    }

    pub fn debugger(&self, namespace: impl Into<String>) -> Result<Debugger, BridgeError> {
        Ok(self.get()?.debugger(namespace))
    }
}

static GLOBAL: Registry = Registry::new();

/// Install the process-wide bridge. Call once, at the top of `main`,
/// before any debugger is created.
pub fn install(
    config: &BridgeConfig,
    logger: Arc<dyn StructuredLogger>,
) -> Result<&'static Bridge, BridgeError> {
    if GLOBAL.is_configured() {
        return Err(BridgeError::AlreadyConfigured);
    }
    install_bridge(Bridge::new(config, logger))
}

/// Install an already built bridge as the process-wide one.
pub fn install_bridge(bridge: Bridge) -> Result<&'static Bridge, BridgeError> {
    let bridge = GLOBAL.configure(bridge)?;
    tracing::info!(
        routes = bridge.table().len(),
        enabled = %bridge.enabled_list(),
        "debug-bridge installed"
    );
    Ok(bridge)
}

/// Install with an empty map and a JSON sink on stdout at debug level.
/// Only `DEBUG` decides what is enabled, and every record is written at
/// debug level.
pub fn install_default() -> Result<&'static Bridge, BridgeError> {
    if GLOBAL.is_configured() {
        return Err(BridgeError::AlreadyConfigured);
    }
    install_bridge(default_bridge(io::stdout(), enablement_from_env()))
}

fn default_bridge<W>(writer: W, enablement: Vec<String>) -> Bridge
where
    W: Write + Send + 'static,
{
    let logger = Arc::new(JsonLogger::new(writer, Level::Debug));
    Bridge::with_enablement(&BridgeConfig::default(), logger, enablement)
}

/// The process-wide bridge.
pub fn global() -> Result<&'static Bridge, BridgeError> {
    GLOBAL.get()
}

/// A debugger from the process-wide bridge.
pub fn debugger(namespace: impl Into<String>) -> Result<Debugger, BridgeError> {
    GLOBAL.debugger(namespace)
}

pub fn resolve(namespace: &str) -> Result<Option<Level>, BridgeError> {
    GLOBAL.resolve(namespace)
}

pub fn is_enabled(namespace: &str) -> Result<bool, BridgeError> {
    GLOBAL.is_enabled(namespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::TracingLogger;
    use std::sync::Mutex;

    fn bridge(config: &BridgeConfig) -> Bridge {
        Bridge::with_enablement(config, Arc::new(TracingLogger::new()), Vec::<String>::new())
    }

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_default_bridge_writes_json_at_debug() {
        let buffer = Buffer::default();
        let bridge = default_bridge(buffer.clone(), vec!["app:*".to_string()]);
        assert!(bridge.table().is_empty());

        crate::debug_log!(bridge.debugger("app:db"), "connected to %s", "primary");
        crate::debug_log!(bridge.debugger("other"), "dropped");
        bridge.logger().trace(crate::sink::Fields::new(), "below debug");

        let text = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        let records: Vec<serde_json::Value> =
            text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["ns"], "app:db");
        assert_eq!(records[0]["level"], 20);
        assert_eq!(records[0]["msg"], "connected to primary");
    }

    #[test]
    fn test_unconfigured_registry_fails() {
        let registry = Registry::new();
        assert!(!registry.is_configured());
        assert_eq!(registry.resolve("ns").unwrap_err(), BridgeError::NotConfigured);
        assert_eq!(registry.is_enabled("ns").unwrap_err(), BridgeError::NotConfigured);
        assert_eq!(registry.debugger("ns").unwrap_err(), BridgeError::NotConfigured);
    }

    #[test]
    fn test_configure_is_one_shot() {
        let registry = Registry::new();
        let first = BridgeConfig::new().with_route("ns", Level::Info);
        let second = BridgeConfig::new().with_route("ns", Level::Error);

        registry.configure(bridge(&first)).unwrap();
        let err = registry.configure(bridge(&second)).unwrap_err();
        assert_eq!(err, BridgeError::AlreadyConfigured);

        // The first configuration stays bound.
        assert_eq!(registry.resolve("ns").unwrap(), Some(Level::Info));
        assert!(registry.is_enabled("ns").unwrap());
    }
}
