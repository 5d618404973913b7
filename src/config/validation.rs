//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject empty patterns and skip entries
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BridgeConfig → Result<(), Vec<ValidationError>>
//! - Any non-empty string is a valid pattern; there is no glob syntax error

use thiserror::Error;

use crate::config::schema::BridgeConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A routing pattern is the empty string.
    #[error("map entry {index} has an empty pattern")]
    EmptyPattern { index: usize },

    /// A skip entry is empty (or only whitespace).
    #[error("skip entry {index} is empty")]
    EmptySkip { index: usize },
}

pub fn validate_config(config: &BridgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (index, pattern) in config.map.patterns().enumerate() {
        if pattern.is_empty() {
            errors.push(ValidationError::EmptyPattern { index });
        }
    }

    for (index, entry) in config.skip.iter().enumerate() {
        if entry.trim().is_empty() {
            errors.push(ValidationError::EmptySkip { index });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
