//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → BridgeConfig (validated, immutable)
//!
//! DEBUG environment variable
//!     → env.rs (split into entries)
//!
//! Both feed install(), exactly once per process.
//! ```
//!
//! # Design Decisions
//! - Config is consumed once; there is no reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Map order is document order (ties in precision depend on it)

pub mod env;
pub mod loader;
pub mod schema;
pub mod validation;

pub use env::{enablement_from_env, DEBUG_ENV};
pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{BridgeConfig, LevelMap, LogFormat, LoggerConfig};
pub use validation::ValidationError;
