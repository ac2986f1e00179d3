//! Engine error types

use slate_sheets_formula::FormulaError;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the [`Spreadsheet`](crate::Spreadsheet) API
///
/// All variants are synchronous, locally recoverable conditions; callers are
/// expected to catch them and present them to the user. Per-cell evaluation
/// failures are not errors at this level — they become
/// [`CellValue::Error`](crate::CellValue::Error) values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The name fails the cell name grammar or the configured validity
    /// predicate
    #[error("Invalid cell name: {0}")]
    InvalidName(String),

    /// The `=`-formula text failed to parse
    #[error(transparent)]
    FormulaFormat(#[from] FormulaError),

    /// The proposed change would make the named cell depend on itself,
    /// directly or indirectly
    #[error("Circular dependency involving cell {0}")]
    CircularDependency(String),
}

impl From<slate_sheets_core::Error> for Error {
    fn from(err: slate_sheets_core::Error) -> Self {
        match err {
            slate_sheets_core::Error::InvalidName(name) => Error::InvalidName(name),
        }
    }
}
