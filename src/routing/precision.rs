//! Precision ordering of routing patterns.
//!
//! # Rules
//! - Two literal patterns are equally precise
//! - A literal pattern beats any wildcard pattern
//! - Between wildcard patterns, the later first `*` wins (longer literal
//!   prefix), then the longer pattern wins
//!
//! Equal patterns keep their configuration order because callers sort with
//! a stable sort.

use std::cmp::{Ordering, Reverse};

/// The wildcard marker. Matches any substring, including the empty one.
pub const WILDCARD: char = '*';

/// Sort key for a pattern: smaller keys are more precise.
///
/// Every literal pattern maps to the same key, which is what makes ties
/// fall back to insertion order. Positions and lengths count characters,
/// not bytes.
fn precision_key(pattern: &str) -> (bool, Reverse<usize>, Reverse<usize>) {
    match pattern.find(WILDCARD) {
        None => (false, Reverse(0), Reverse(0)),
        Some(first) => (
            true,
            Reverse(pattern[..first].chars().count()),
            Reverse(pattern.chars().count()),
        ),
    }
}

/// Compare two raw patterns. `Ordering::Less` means `a` is more precise
/// than `b` and must be tried first.
pub fn by_precision(a: &str, b: &str) -> Ordering {
    precision_key(a).cmp(&precision_key(b))
}

/// Stable-sort patterns, most precise first.
pub fn sort_by_precision<T, F>(items: &mut [T], pattern: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by(|a, b| by_precision(pattern(a), pattern(b)));
}
