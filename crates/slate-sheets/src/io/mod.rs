//! JSON persistence collaborator
//!
//! Serializes a spreadsheet as an array of `{name, contents}` records:
//! formulas with a leading `=`, numbers in canonical decimal form, text
//! verbatim. An array (rather than a map) keeps duplicate cell names
//! detectable on read.
//!
//! Structurally invalid content — a bad cell name, a duplicate cell, an
//! unparsable formula, or a cycle embedded in the saved data — reuses the
//! engine error taxonomy and is reported separately from byte-stream and
//! JSON syntax failures.

mod error;
mod reader;
mod writer;

pub use error::{JsonError, JsonResult};
pub use reader::JsonReader;
pub use writer::JsonWriter;

use serde::{Deserialize, Serialize};

/// Top-level serialized document
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SheetDocument {
    pub(crate) cells: Vec<CellRecord>,
}

/// One serialized cell: canonical name plus raw contents text
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CellRecord {
    pub(crate) name: String,
    pub(crate) contents: String,
}
