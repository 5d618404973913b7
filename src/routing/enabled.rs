//! The enabled-namespace set.
//!
//! Decides whether a namespace may emit at all, before any level lookup.
//! Entries use the same glob syntax as routing patterns; an entry prefixed
//! with `-` disables the namespaces it matches and always wins over
//! enabling entries, wherever it appears in the list.

use crate::routing::matcher::{GlobMatcher, Matcher};

/// Prefix marking a disabling entry.
pub const NEGATION: char = '-';

/// Split an enablement list on whitespace and commas, dropping empties.
pub fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|entry| !entry.is_empty())
}

#[derive(Debug, Clone, Default)]
pub struct EnabledSet {
    names: Vec<GlobMatcher>,
    skips: Vec<GlobMatcher>,
    source: String,
}

impl EnabledSet {
    /// Parse a list such as `"app:*,-app:noisy worker"`.
    pub fn parse(list: &str) -> Self {
        Self::from_entries(split_list(list))
    }

    /// Build from individual entries.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        let mut kept = Vec::new();

        for entry in entries {
            let entry = entry.as_ref().trim();
            if entry.is_empty() {
                continue;
            }
            match entry.strip_prefix(NEGATION) {
                Some(skipped) => set.skips.push(GlobMatcher::new(skipped)),
                None => set.names.push(GlobMatcher::new(entry)),
            }
            kept.push(entry.to_string());
        }

        set.source = kept.join(",");
        set
    }

    pub fn is_enabled(&self, namespace: &str) -> bool {
        if self.skips.iter().any(|skip| skip.matches(namespace)) {
            return false;
        }
        self.names.iter().any(|name| name.matches(namespace))
    }

    /// The normalized list this set was built from, comma separated.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.skips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        let entries: Vec<&str> = split_list(" a, b\tc,,\n-d ").collect();
        assert_eq!(entries, vec!["a", "b", "c", "-d"]);
        assert_eq!(split_list("").count(), 0);
    }

    #[test]
    fn test_empty_set_enables_nothing() {
        let set = EnabledSet::parse("");
        assert!(set.is_empty());
        assert!(!set.is_enabled("ns"));
    }

    #[test]
    fn test_enable_by_glob() {
        let set = EnabledSet::parse("app:*,worker");
        assert!(set.is_enabled("app:db"));
        assert!(set.is_enabled("app:"));
        assert!(set.is_enabled("worker"));
        assert!(!set.is_enabled("worker:1"));
        assert!(!set.is_enabled("other"));
    }

    #[test]
    fn test_negation_wins_regardless_of_position() {
        let set = EnabledSet::parse("-ns2 ns*");
        assert!(set.is_enabled("ns"));
        assert!(!set.is_enabled("ns2"));

        let later = EnabledSet::parse("ns* -ns2");
        assert!(later.is_enabled("ns"));
        assert!(!later.is_enabled("ns2"));
    }

    #[test]
    fn test_negated_glob() {
        let set = EnabledSet::parse("*,-noisy:*");
        assert!(set.is_enabled("quiet"));
        assert!(!set.is_enabled("noisy:chatter"));
    }

    #[test]
    fn test_source_is_normalized() {
        let set = EnabledSet::from_entries(["a", " ", "-b", "c*"]);
        assert_eq!(set.as_str(), "a,-b,c*");
    }
}
