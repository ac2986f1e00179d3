//! JSON persistence error types

use thiserror::Error;

/// Result type for JSON persistence operations
pub type JsonResult<T> = std::result::Result<T, JsonError>;

/// Errors that can occur while reading or writing the serialized form
///
/// [`Io`](JsonError::Io) and [`Json`](JsonError::Json) mean the byte stream
/// could not be read, written, or parsed as JSON; the remaining variants
/// mean the stream was readable but its content was structurally invalid.
#[derive(Debug, Error)]
pub enum JsonError {
    /// The byte stream could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The byte stream is not well-formed JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The same cell name appears in more than one record
    #[error("Duplicate cell: {0}")]
    DuplicateCell(String),

    /// A record failed engine validation (invalid name, unparsable formula,
    /// or a cycle embedded in the saved data)
    #[error(transparent)]
    Engine(#[from] crate::Error),
}
