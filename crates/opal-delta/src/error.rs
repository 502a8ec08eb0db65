//! Error types for patch application.

use thiserror::Error;

/// A structural mismatch between a patch and its target.
///
/// These are caller contract violations: a patch computed against one shape
/// was applied to another. Paths are dotted, list positions included
/// (`attachments.0.name`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    #[error("key not found: {0}")]
    KeyNotFound(String),

    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("length mismatch at {path}: diff covers {expected} elements, list has {found}")]
    LengthMismatch {
        path: String,
        expected: usize,
        found: usize,
    },

    #[error("cannot pop from empty list at {0}")]
    PopFromEmpty(String),

    #[error("removal marker outside a state diff at {0}")]
    UnexpectedRemoval(String),
}

pub type Result<T> = std::result::Result<T, ApplyError>;
