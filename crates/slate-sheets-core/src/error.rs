//! Error types for slate-sheets-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in slate-sheets-core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The string is not a legal cell name
    #[error("Invalid cell name: {0}")]
    InvalidName(String),
}
