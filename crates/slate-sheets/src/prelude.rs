//! Convenient glob import for common types
//!
//! ```rust
//! use slate_sheets::prelude::*;
//! ```

pub use crate::cell::{CellContents, CellValue, FormulaErrorValue};
pub use crate::error::{Error, Result};
pub use crate::io::{JsonError, JsonReader, JsonResult, JsonWriter};
pub use crate::spreadsheet::Spreadsheet;
pub use slate_sheets_core::{CellName, DependencyGraph};
pub use slate_sheets_formula::{Formula, FormulaError, FormulaResult};
