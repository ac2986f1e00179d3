//! JSON writer

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::io::error::JsonResult;
use crate::io::{CellRecord, SheetDocument};
use crate::Spreadsheet;

/// JSON file writer
pub struct JsonWriter;

impl JsonWriter {
    /// Write the spreadsheet to a file, clearing its changed flag on success
    pub fn write_file<P: AsRef<Path>>(spreadsheet: &mut Spreadsheet, path: P) -> JsonResult<()> {
        let file = File::create(path)?;
        Self::write(spreadsheet, BufWriter::new(file))
    }

    /// Write the spreadsheet to a writer, clearing its changed flag on
    /// success
    pub fn write<W: Write>(spreadsheet: &mut Spreadsheet, mut writer: W) -> JsonResult<()> {
        let mut cells = Vec::new();
        for name in spreadsheet.names_of_nonempty_cells() {
            let contents = spreadsheet.get_cell_contents(name)?;
            cells.push(CellRecord {
                name: name.to_string(),
                contents: contents.to_string(),
            });
        }
        // Deterministic output regardless of cell map iteration order
        cells.sort_by(|a, b| a.name.cmp(&b.name));

        serde_json::to_writer_pretty(&mut writer, &SheetDocument { cells })?;
        writer.flush()?;

        spreadsheet.mark_saved();
        Ok(())
    }
}
