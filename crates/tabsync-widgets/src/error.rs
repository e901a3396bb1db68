#![forbid(unsafe_code)]

//! Tab group errors.
//!
//! Every variant is a programming error in the code that builds or drives a
//! group, never a condition an end user can trigger. Callers are expected to
//! propagate them, not recover.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TabError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TabError {
    #[error("tab group needs at least one tab")]
    EmptyTabs,

    #[error("duplicate tab values: {values}")]
    DuplicateValues { values: String },

    #[error("more than one tab is marked default: {values}")]
    MultipleDefaults { values: String },

    #[error("default value {value:?} matches no tab (expected one of: {expected})")]
    InvalidDefault { value: String, expected: String },

    #[error("query-string key falls back to the group id, but no group id is set")]
    QueryKeyWithoutGroup,

    #[error("no tab has value {value:?}")]
    InvalidSelection { value: String },
}

impl TabError {
    /// True for errors raised while validating a group's configuration.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::InvalidSelection { .. })
    }

    #[must_use]
    pub fn invalid_selection(value: impl Into<String>) -> Self {
        Self::InvalidSelection {
            value: value.into(),
        }
    }
}
