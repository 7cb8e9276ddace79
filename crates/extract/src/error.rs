//! Extraction Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! The extraction pipeline itself never returns these: a page that can't be
//! probed degrades to a title-only [`Extraction`](crate::models::Extraction).
//! The probe kinds exist for [`PageProbe`](crate::PageProbe) implementations,
//! and so the degradation path has something concrete to log.

use derive_more::{Display, Error};
use std::time::Duration;

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The page uses a scheme that scripts can't be injected into.
    #[display("restricted page, scripting not permitted: {_0}")]
    Restricted(#[error(not(source))] String),
    /// The page probe ran, but failed (injection blocked, page error, ...).
    #[display("page probe failed: {_0}")]
    ProbeFailed(#[error(not(source))] String),
    /// The page probe did not answer in time.
    #[display("page probe timed out after {}ms", _0.as_millis())]
    Timeout(#[error(not(source))] Duration),
    /// A user-supplied value couldn't be turned into a regular expression.
    #[display("invalid pattern: {_0}")]
    InvalidPattern(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ProbeFailed(_) | Self::Timeout(_))
    }
}
