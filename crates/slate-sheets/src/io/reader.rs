//! JSON reader

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::io::error::JsonResult;
use crate::io::{JsonError, SheetDocument};
use crate::Spreadsheet;
use ahash::AHashSet;
use slate_sheets_core::CellName;

/// JSON file reader
pub struct JsonReader;

impl JsonReader {
    /// Read a serialized spreadsheet from a file
    pub fn read_file<P: AsRef<Path>>(path: P) -> JsonResult<Spreadsheet> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Read a serialized spreadsheet from a reader
    pub fn read<R: Read>(reader: R) -> JsonResult<Spreadsheet> {
        let document: SheetDocument = serde_json::from_reader(reader)?;

        let mut spreadsheet = Spreadsheet::new();
        let mut seen = AHashSet::new();

        for record in &document.cells {
            let canonical = CellName::parse(&record.name)
                .map_err(crate::Error::from)?
                .into_string();
            if !seen.insert(canonical.clone()) {
                return Err(JsonError::DuplicateCell(canonical));
            }

            // Circular data and unparsable formulas surface here as engine
            // errors; forward references are fine, the affected cells are
            // recalculated as later records land.
            spreadsheet.set_contents_of_cell(&canonical, &record.contents)?;
        }

        // A freshly loaded spreadsheet has no unsaved changes
        spreadsheet.mark_saved();
        Ok(spreadsheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_read_values_and_forward_references() {
        let json = r#"{"cells": [
            {"name": "C1", "contents": "=B1+1"},
            {"name": "B1", "contents": "=A1*3"},
            {"name": "A1", "contents": "2"}
        ]}"#;

        let sheet = JsonReader::read(json.as_bytes()).unwrap();
        assert_eq!(sheet.get_cell_value("C1").unwrap().as_number(), Some(7.0));
        assert!(!sheet.changed());
    }

    #[test]
    fn test_read_rejects_duplicates_case_insensitively() {
        let json = r#"{"cells": [
            {"name": "A1", "contents": "1"},
            {"name": "a1", "contents": "2"}
        ]}"#;

        assert!(matches!(
            JsonReader::read(json.as_bytes()),
            Err(JsonError::DuplicateCell(_))
        ));
    }

    #[test]
    fn test_read_rejects_embedded_cycle() {
        let json = r#"{"cells": [
            {"name": "A1", "contents": "=B1"},
            {"name": "B1", "contents": "=A1"}
        ]}"#;

        assert!(matches!(
            JsonReader::read(json.as_bytes()),
            Err(JsonError::Engine(crate::Error::CircularDependency(_)))
        ));
    }

    #[test]
    fn test_read_rejects_malformed_json() {
        assert!(matches!(
            JsonReader::read("not json".as_bytes()),
            Err(JsonError::Json(_))
        ));
    }

    #[test]
    fn test_read_rejects_bad_names_and_formulas() {
        let bad_name = r#"{"cells": [{"name": "X07", "contents": "1"}]}"#;
        assert!(matches!(
            JsonReader::read(bad_name.as_bytes()),
            Err(JsonError::Engine(crate::Error::InvalidName(_)))
        ));

        let bad_formula = r#"{"cells": [{"name": "A1", "contents": "=1++2"}]}"#;
        assert!(matches!(
            JsonReader::read(bad_formula.as_bytes()),
            Err(JsonError::Engine(crate::Error::FormulaFormat(_)))
        ));
    }
}
