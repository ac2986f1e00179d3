//! End-to-end engine scenarios exercised through the public API

use pretty_assertions::assert_eq;
use slate_sheets::prelude::*;

fn number(sheet: &Spreadsheet, name: &str) -> f64 {
    sheet
        .get_cell_value(name)
        .unwrap()
        .as_number()
        .unwrap_or_else(|| panic!("{name} does not hold a number"))
}

#[test]
fn budget_sheet_recalculates_through_the_chain() {
    let mut sheet = Spreadsheet::new();

    sheet.set_contents_of_cell("A1", "Subtotal").unwrap();
    sheet.set_contents_of_cell("B1", "100").unwrap();
    sheet.set_contents_of_cell("B2", "250").unwrap();
    sheet.set_contents_of_cell("B3", "=B1+B2").unwrap();
    sheet.set_contents_of_cell("B4", "=B3*1.08").unwrap();

    assert_eq!(number(&sheet, "B3"), 350.0);
    assert_eq!(number(&sheet, "B4"), 378.0);

    let affected = sheet.set_contents_of_cell("B1", "200").unwrap();
    assert_eq!(affected, vec!["B1", "B3", "B4"]);
    assert_eq!(number(&sheet, "B4"), 486.0);

    // The label cell is plain text and untouched by recalculation
    assert_eq!(
        sheet.get_cell_value("A1").unwrap(),
        CellValue::Text("Subtotal".into())
    );
}

#[test]
fn formula_round_trip_through_contents() {
    let mut sheet = Spreadsheet::new();
    sheet.set_contents_of_cell("A1", "=b1 + c1 * 2").unwrap();

    let serialized = sheet.get_cell_contents("A1").unwrap().to_string();
    assert!(serialized.starts_with('='));

    let reparsed = Formula::parse(serialized.strip_prefix('=').unwrap()).unwrap();
    let vars: Vec<_> = reparsed.variables().collect();
    assert_eq!(vars, vec!["B1", "C1"]);
}

#[test]
fn cycle_rejection_preserves_observable_state() {
    let mut sheet = Spreadsheet::new();
    sheet.set_contents_of_cell("A1", "5").unwrap();
    sheet.mark_saved();

    let err = sheet.set_contents_of_cell("A1", "=A1+1").unwrap_err();
    assert!(matches!(err, Error::CircularDependency(_)));

    assert_eq!(number(&sheet, "A1"), 5.0);
    assert!(!sheet.changed());
}

#[test]
fn error_values_are_data_not_panics() {
    let mut sheet = Spreadsheet::new();

    sheet.set_contents_of_cell("A1", "=Z9+1").unwrap();
    assert!(sheet.get_cell_value("A1").unwrap().is_error());

    sheet.set_contents_of_cell("B1", "=1/0").unwrap();
    let value = sheet.get_cell_value("B1").unwrap();
    match value {
        CellValue::Error(err) => assert!(!err.reason().is_empty()),
        other => panic!("expected error value, got {other:?}"),
    }
}

#[test]
fn save_and_reload_preserves_contents_and_values() {
    let mut sheet = Spreadsheet::new();
    sheet.set_contents_of_cell("A1", "4").unwrap();
    sheet.set_contents_of_cell("A2", "6").unwrap();
    sheet.set_contents_of_cell("A3", "8").unwrap();
    sheet
        .set_contents_of_cell("B1", "=(A1 + A2) * (A3 / A1) * 1.0")
        .unwrap();
    assert_eq!(number(&sheet, "B1"), 20.0);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sheet.json");

    JsonWriter::write_file(&mut sheet, &path).unwrap();
    assert!(!sheet.changed());

    let restored = JsonReader::read_file(&path).unwrap();
    assert_eq!(number(&restored, "B1"), 20.0);
    assert_eq!(
        restored.get_cell_contents("B1").unwrap().to_string(),
        "=(A1+A2)*(A3/A1)*1"
    );

    let mut names: Vec<_> = restored.names_of_nonempty_cells().collect();
    names.sort_unstable();
    assert_eq!(names, vec!["A1", "A2", "A3", "B1"]);
}

#[test]
fn validator_constrains_loads_too() {
    let mut sheet = Spreadsheet::with_validator(|name| name.len() <= 2);
    sheet.set_contents_of_cell("A1", "1").unwrap();
    assert!(matches!(
        sheet.set_contents_of_cell("AA10", "1"),
        Err(Error::InvalidName(_))
    ));
    assert!(matches!(
        sheet.set_contents_of_cell("A2", "=AA10"),
        Err(Error::FormulaFormat(_))
    ));
}
