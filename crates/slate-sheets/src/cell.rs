//! Cell contents and value types
//!
//! Each cell has a *contents* (what is typed on the editing line) and a
//! *value* (what is displayed in the grid). Text and number contents are
//! their own value; formula contents evaluate to a number or to an error
//! value.

use slate_sheets_formula::{Formula, FormulaError};
use std::fmt;

/// What a cell holds, as entered
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellContents {
    /// The default for every cell that has never been set (or was set back
    /// to empty text)
    #[default]
    Empty,
    /// Plain text
    Text(String),
    /// A numeric literal
    Number(f64),
    /// A parsed formula
    Formula(Formula),
}

impl CellContents {
    /// Check whether these contents are the empty string
    pub fn is_empty(&self) -> bool {
        matches!(self, CellContents::Empty)
    }

    /// Check whether these contents are a formula
    pub fn is_formula(&self) -> bool {
        matches!(self, CellContents::Formula(_))
    }
}

impl fmt::Display for CellContents {
    /// The serialized input form: formulas with a leading `=`, numbers in
    /// canonical decimal form, text verbatim
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellContents::Empty => Ok(()),
            CellContents::Text(s) => f.write_str(s),
            CellContents::Number(n) => write!(f, "{}", n),
            CellContents::Formula(formula) => write!(f, "={}", formula),
        }
    }
}

/// What a cell displays
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Text contents, or the empty string for an empty cell
    Text(String),
    /// A numeric literal or a successfully evaluated formula
    Number(f64),
    /// A formula that failed to evaluate
    Error(FormulaErrorValue),
}

impl CellValue {
    /// The value of an empty cell
    pub fn empty() -> Self {
        CellValue::Text(String::new())
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Check whether this is an error value
    pub fn is_error(&self) -> bool {
        matches!(self, CellValue::Error(_))
    }
}

impl Default for CellValue {
    /// The value of an empty cell: empty text
    fn default() -> Self {
        CellValue::empty()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Error(e) => write!(f, "{}", e),
        }
    }
}

/// An evaluation failure captured as a displayable cell value
///
/// Unlike [`Error`](crate::Error), this is data rather than control flow:
/// a cell whose formula divides by zero or references an undefined cell
/// displays an error value like any other value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaErrorValue {
    reason: String,
}

impl FormulaErrorValue {
    /// Create an error value with a human-readable reason
    pub fn new<S: Into<String>>(reason: S) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// The human-readable reason the formula failed
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for FormulaErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#ERROR: {}", self.reason)
    }
}

impl From<FormulaError> for FormulaErrorValue {
    fn from(err: FormulaError) -> Self {
        let (FormulaError::Format(reason) | FormulaError::Evaluation(reason)) = err;
        Self { reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use slate_sheets_formula::Formula;

    #[test]
    fn test_contents_display() {
        assert_eq!(CellContents::Empty.to_string(), "");
        assert_eq!(CellContents::Text("hi".into()).to_string(), "hi");
        assert_eq!(CellContents::Number(2.5).to_string(), "2.5");
        assert_eq!(CellContents::Number(3.0).to_string(), "3");

        let formula = Formula::parse("A1 + 2").unwrap();
        assert_eq!(CellContents::Formula(formula).to_string(), "=A1+2");
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(CellValue::Number(4.0).as_number(), Some(4.0));
        assert_eq!(CellValue::Text("4".into()).as_number(), None);
        assert!(CellValue::Error(FormulaErrorValue::new("division by zero")).is_error());
        assert_eq!(CellValue::empty(), CellValue::Text(String::new()));
    }
}
