//! Integration errors.

use thiserror::Error;

/// Errors from misusing the process-wide bridge.
///
/// Both are programming mistakes, surfaced where they happen and never
/// retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// A debugger was requested before the bridge was installed.
    #[error("debug called before debug-bridge was installed; install it at the top of your entry point")]
    NotConfigured,

    /// The bridge was installed a second time.
    #[error("debug-bridge can only be installed once")]
    AlreadyConfigured,
}
