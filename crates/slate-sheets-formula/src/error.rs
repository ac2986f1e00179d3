//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur during formula parsing or evaluation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// The formula text is malformed (reported at parse time)
    #[error("Formula format error: {0}")]
    Format(String),

    /// The formula could not be evaluated (undefined variable, division by
    /// zero)
    #[error("Formula evaluation error: {0}")]
    Evaluation(String),
}
