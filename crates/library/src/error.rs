//! Library Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("unknown topic: {_0}")]
    UnknownTopic(#[error(not(source))] String),
    #[display("unknown category: {_0}")]
    UnknownCategory(#[error(not(source))] String),
    #[display("category already exists: {_0}")]
    DuplicateCategory(#[error(not(source))] String),
    /// Category names and renamed titles must contain something other than
    /// whitespace.
    #[display("name must not be blank")]
    BlankName,
    #[display("no entry at index {index} in {category}")]
    IndexOutOfRange { category: String, index: usize },
    /// Every category was removed, so there's nowhere to put a new entry.
    #[display("topic has no categories")]
    NoCategories,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
