//! Store error types.

use thiserror::Error;

/// Recipe store operation errors.
///
/// The hosted store fails in exactly one way as far as callers are
/// concerned: it is unavailable. Network failures, permission rejections,
/// and malformed responses all collapse into [`StoreError::Unavailable`];
/// the only decision a caller ever makes is "retry or keep what I have".
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store could not be reached or returned an unusable response.
    #[error("recipe store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Wrap any displayable cause as an unavailability error.
    pub fn unavailable(cause: impl std::fmt::Display) -> Self {
        Self::Unavailable(cause.to_string())
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        Self::Unavailable(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Unavailable(format!("malformed store response: {e}"))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
