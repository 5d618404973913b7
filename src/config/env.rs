//! Enablement list from the environment.

use crate::routing::enabled::split_list;

/// Variable holding the enabled namespaces, as in the debug convention.
pub const DEBUG_ENV: &str = "DEBUG";

/// Entries of `DEBUG`, split on whitespace and commas.
///
/// Read once at install; later changes to the variable have no effect.
pub fn enablement_from_env() -> Vec<String> {
    enablement_from(std::env::var(DEBUG_ENV).ok().as_deref())
}

/// Entries of an optional enablement list.
pub fn enablement_from(value: Option<&str>) -> Vec<String> {
    value
        .map(|list| split_list(list).map(str::to_string).collect())
        .unwrap_or_default()
}
