//! Field-level validation shared by all entity kinds.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected input at the store mutation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyTitle,
    EmptyProjectName,
    EmptyTagName,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title cannot be empty"),
            Self::EmptyProjectName => write!(f, "project name cannot be empty"),
            Self::EmptyTagName => write!(f, "tag name cannot be empty"),
        }
    }
}

impl Error for ValidationError {}

/// Returns `err` when `value` is empty after trimming whitespace.
pub(crate) fn require_non_blank(value: &str, err: ValidationError) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(err)
    } else {
        Ok(())
    }
}
