//! Error types for the Mealdeck plugin.
//!
//! [`MealdeckError`] covers remote fetch failures, local persistence failures
//! and configuration problems. None of them are fatal: fetch failures are
//! scoped to the panel that issued the request, and persistence failures leave
//! the in-memory state authoritative for the session.

use thiserror::Error;

/// The main error type for Mealdeck operations.
///
/// # Examples
///
/// ```
/// use mealdeck::MealdeckError;
///
/// let err = MealdeckError::Http(404);
/// assert_eq!(err.to_string(), "HTTP error! status: 404");
/// assert!(err.is_network());
/// ```
#[derive(Debug, Error)]
pub enum MealdeckError {
    /// The remote source answered with a non-success status.
    ///
    /// Zellij also reports transport failures through a non-success status,
    /// so this variant covers both cases.
    #[error("HTTP error! status: {0}")]
    Http(u16),

    /// The remote source answered with a body that is not the expected JSON.
    #[error("Invalid response: {0}")]
    Decode(String),

    /// A web result arrived without the request tag it was issued with.
    #[error("Response is missing its request context")]
    MissingContext,

    /// Reading or writing the local key-value store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MealdeckError {
    /// Returns `true` for errors raised while talking to the remote source.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Decode(_) | Self::MissingContext)
    }
}

impl From<serde_json::Error> for MealdeckError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// A specialized `Result` type for Mealdeck operations.
pub type Result<T> = std::result::Result<T, MealdeckError>;
