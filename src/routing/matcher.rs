//! Namespace matching logic.
//!
//! # Responsibilities
//! - Compile a glob pattern into an anchored matcher
//! - Match a namespace against the whole pattern
//!
//! # Design Decisions
//! - `*` matches any run of characters, including none
//! - Every other character is literal; regex metacharacters are escaped,
//!   so any string is a valid pattern
//! - Literal patterns skip regex entirely (plain string equality)

use regex::Regex;

use crate::routing::precision::WILDCARD;

/// Trait for matching namespaces against a condition.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the namespace matches this condition.
    fn matches(&self, namespace: &str) -> bool;
}

#[derive(Debug, Clone)]
enum Compiled {
    Exact,
    Glob(Regex),
}

/// A compiled glob pattern.
#[derive(Debug, Clone)]
pub struct GlobMatcher {
    pattern: String,
    compiled: Compiled,
}

impl GlobMatcher {
    /// Compile a pattern. Never fails.
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        if !pattern.contains(WILDCARD) {
            return Self {
                pattern,
                compiled: Compiled::Exact,
            };
        }

        let source = glob_to_regex(&pattern);
        let compiled = match Regex::new(&source) {
            Ok(regex) => Compiled::Glob(regex),
            Err(err) => {
                // Only reachable past the regex size limit; the escaped
                // source is otherwise always valid.
                tracing::warn!(pattern = %pattern, error = %err, "Pattern too large, matching literally");
                Compiled::Exact
            }
        };

        Self { pattern, compiled }
    }

    /// The raw pattern text.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether the pattern contains a wildcard.
    pub fn is_glob(&self) -> bool {
        matches!(self.compiled, Compiled::Glob(_))
    }
}

impl Matcher for GlobMatcher {
    fn matches(&self, namespace: &str) -> bool {
        match &self.compiled {
            Compiled::Exact => self.pattern == namespace,
            Compiled::Glob(regex) => regex.is_match(namespace),
        }
    }
}

/// Translate a glob into an anchored regex source string.
///
/// `app:*:db` becomes `(?s)^app:.*?:db$`. `*` also spans newlines.
pub fn glob_to_regex(pattern: &str) -> String {
    let body = pattern
        .split(WILDCARD)
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*?");
    format!("(?s)^{body}$")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_matcher() {
        let matcher = GlobMatcher::new("ns");
        assert!(!matcher.is_glob());
        assert!(matcher.matches("ns"));
        assert!(!matcher.matches("ns2"));
        assert!(!matcher.matches("xns"));
    }

    #[test]
    fn test_wildcard_matches_empty_and_any() {
        let matcher = GlobMatcher::new("ns*");
        assert!(matcher.is_glob());
        assert!(matcher.matches("ns"));
        assert!(matcher.matches("ns2"));
        assert!(matcher.matches("ns:db:query"));
        assert!(!matcher.matches("xns"));

        let any = GlobMatcher::new("*");
        assert!(any.matches(""));
        assert!(any.matches("anything"));
    }

    #[test]
    fn test_match_is_anchored_at_both_ends() {
        let matcher = GlobMatcher::new("*tra");
        assert!(matcher.matches("debugtra"));
        assert!(!matcher.matches("testtracetest"));

        let infix = GlobMatcher::new("*trace*");
        assert!(infix.matches("testtracetest"));
        assert!(infix.matches("trace"));
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let matcher = GlobMatcher::new("a.b+(c)*");
        assert!(matcher.matches("a.b+(c)"));
        assert!(matcher.matches("a.b+(c):x"));
        assert!(!matcher.matches("axb+(c)"));
        assert!(!matcher.matches("a.bb(c)"));

        let brackets = GlobMatcher::new("[ns]?$*");
        assert!(brackets.matches("[ns]?$tail"));
        assert!(!brackets.matches("n"));
    }

    #[test]
    fn test_glob_to_regex() {
        assert_eq!(glob_to_regex("app:*:db"), "(?s)^app:.*?:db$");
        assert_eq!(glob_to_regex("*"), "(?s)^.*?$");
        assert_eq!(glob_to_regex("a.b*"), "(?s)^a\\.b.*?$");
    }

    #[test]
    fn test_wildcard_spans_newlines() {
        let any = GlobMatcher::new("*");
        assert!(any.matches("a\nb"));

        let infix = GlobMatcher::new("app:*:db");
        assert!(infix.matches("app:line\nbreak:db"));
        assert!(!infix.matches("app:x:db\n"));

        // Escaped dots stay literal.
        assert!(!GlobMatcher::new("a.b*").matches("a\nb"));
    }
}
