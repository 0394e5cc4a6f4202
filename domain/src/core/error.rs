//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    #[error("Category word cannot be empty")]
    EmptyCategoryWord,

    #[error("Invalid cap value: {0} (must be -1 or >= 0)")]
    InvalidCapValue(i64),
}
