//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Log call (namespace, args)
//!     → enabled.rs (may this namespace emit at all?)
//!     → router.rs (level lookup)
//!     → matcher.rs (evaluate glob patterns)
//!     → Return: matched Level or None
//!
//! Table Compilation (at install):
//!     pattern → level map
//!     → precision.rs (stable sort, most precise first)
//!     → Compile matchers (anchored, escaped)
//!     → Freeze as immutable CompiledPatternTable
//! ```
//!
//! # Design Decisions
//! - Table compiled once, immutable at runtime
//! - Literal patterns compare by string equality, no regex
//! - Deterministic: same namespace always resolves to the same level
//! - First match wins (ordered by precision)

pub mod enabled;
pub mod matcher;
pub mod precision;
pub mod router;

pub use enabled::EnabledSet;
pub use matcher::{GlobMatcher, Matcher};
pub use precision::by_precision;
pub use router::CompiledPatternTable;
