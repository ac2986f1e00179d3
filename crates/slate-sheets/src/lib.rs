//! # slate-sheets
//!
//! An in-memory spreadsheet evaluation engine.
//!
//! Cells are named `A1`-style and hold text, numbers, or infix arithmetic
//! formulas referencing other cells. The engine computes each cell's derived
//! value, keeps values consistent as cells are edited via cascading
//! recalculation, and rejects edits that would create a circular definition,
//! rolling the attempt back in full.
//!
//! ## Example
//!
//! ```rust
//! use slate_sheets::prelude::*;
//!
//! let mut sheet = Spreadsheet::new();
//! sheet.set_contents_of_cell("A1", "2").unwrap();
//! sheet.set_contents_of_cell("B1", "=A1*3").unwrap();
//!
//! // Editing A1 reports every cell whose displayed value needs refreshing
//! let affected = sheet.set_contents_of_cell("A1", "10").unwrap();
//! assert_eq!(affected, vec!["A1", "B1"]);
//! assert_eq!(sheet.get_cell_value("B1").unwrap().as_number(), Some(30.0));
//!
//! // A circular definition is rejected and nothing changes
//! assert!(sheet.set_contents_of_cell("A1", "=B1+1").is_err());
//! assert_eq!(sheet.get_cell_value("A1").unwrap().as_number(), Some(10.0));
//! ```

pub mod cell;
pub mod error;
pub mod io;
pub mod prelude;
pub mod spreadsheet;

pub use cell::{CellContents, CellValue, FormulaErrorValue};
pub use error::{Error, Result};
pub use spreadsheet::Spreadsheet;

// Re-export core types
pub use slate_sheets_core::{CellName, DependencyGraph};

// Re-export formula types
pub use slate_sheets_formula::{Formula, FormulaError, FormulaResult};
