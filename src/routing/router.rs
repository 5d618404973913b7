//! Namespace-to-level lookup.
//!
//! # Responsibilities
//! - Compile a level map into a table ordered by precision
//! - Resolve a namespace to the level of its most precise pattern
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan in precision order; first match wins
//! - Explicit `None` on no match; callers pick the fallback level

use std::fmt;

use crate::level::Level;
use crate::routing::matcher::{GlobMatcher, Matcher};
use crate::routing::precision::sort_by_precision;

/// One compiled routing rule.
#[derive(Debug, Clone)]
pub struct Route {
    pub matcher: GlobMatcher,
    pub level: Level,
}

/// Routing rules ordered most precise first.
#[derive(Debug, Clone, Default)]
pub struct CompiledPatternTable {
    routes: Vec<Route>,
}

impl CompiledPatternTable {
    /// Compile `(pattern, level)` pairs.
    ///
    /// Patterns with equal precision keep the order they are given in, so
    /// when two of them match the same namespace the earlier one wins.
    pub fn compile<'a, I>(map: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Level)>,
    {
        let mut entries: Vec<(&str, Level)> = map.into_iter().collect();
        sort_by_precision(&mut entries, |entry| entry.0);

        let routes = entries
            .into_iter()
            .map(|(pattern, level)| Route {
                matcher: GlobMatcher::new(pattern),
                level,
            })
            .collect();

        Self { routes }
    }

    /// Level of the first route matching `namespace`.
    pub fn resolve(&self, namespace: &str) -> Option<Level> {
        self.routes
            .iter()
            .find(|route| route.matcher.matches(namespace))
            .map(|route| route.level)
    }

    /// Routes in match order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl fmt::Display for CompiledPatternTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, route) in self.routes.iter().enumerate() {
            writeln!(f, "{:>3}  {:<6} {}", i + 1, route.level, route.matcher.pattern())?;
        }
        Ok(())
    }
}
