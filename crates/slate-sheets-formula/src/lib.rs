//! # slate-sheets-formula
//!
//! Infix formula parser and evaluator for slate-sheets.
//!
//! A [`Formula`] is an immutable, validated arithmetic expression over
//! non-negative floating-point literals, variables, parentheses, and the four
//! binary operators `+ - * /`. Syntax is checked once at construction;
//! evaluation can then only fail on division by zero or an unresolvable
//! variable.
//!
//! ## Example
//!
//! ```rust
//! use slate_sheets_formula::Formula;
//!
//! let formula = Formula::parse("2.5e9 + x5 / 17").unwrap();
//! let value = formula.evaluate(|var| if var == "x5" { Some(34.0) } else { None });
//! assert_eq!(value.unwrap(), 2.5e9 + 2.0);
//! ```

pub mod error;
pub mod formula;
mod token;

pub use error::{FormulaError, FormulaResult};
pub use formula::Formula;
