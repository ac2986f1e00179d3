//! The spreadsheet engine
//!
//! A [`Spreadsheet`] owns a cell map and a [`DependencyGraph`] mirroring the
//! variable references inside every formula cell. All mutation goes through
//! [`Spreadsheet::set_contents_of_cell`], which keeps the mirror
//! transactionally consistent: the speculative graph edit is rolled back in
//! full when the change would create a circular dependency, and the cell's
//! contents are only committed afterwards.

use crate::cell::{CellContents, CellValue, FormulaErrorValue};
use crate::error::{Error, Result};
use ahash::{AHashMap, AHashSet};
use slate_sheets_core::{CellName, DependencyGraph};
use slate_sheets_formula::Formula;

/// One materialized cell
#[derive(Debug, Clone, Default)]
struct Cell {
    contents: CellContents,
    value: CellValue,
}

/// Predicate narrowing which cell names the host considers legal
type NameValidator = Box<dyn Fn(&str) -> bool>;

/// An in-memory spreadsheet with cascading recalculation
///
/// Conceptually the spreadsheet has one cell per possible valid name, all
/// empty to begin with; only non-empty cells are materialized. Cell names are
/// case-insensitive and stored upper-case. The spreadsheet is never allowed
/// to hold a combination of formulas establishing a circular dependency.
///
/// # Example
/// ```
/// use slate_sheets::Spreadsheet;
///
/// let mut sheet = Spreadsheet::new();
/// sheet.set_contents_of_cell("A1", "2").unwrap();
/// sheet.set_contents_of_cell("B1", "=A1*3").unwrap();
///
/// assert_eq!(sheet.get_cell_value("B1").unwrap().as_number(), Some(6.0));
/// ```
pub struct Spreadsheet {
    /// Canonical name → cell, for non-empty cells only
    cells: AHashMap<String, Cell>,
    /// Mirrors the variable references of every formula cell
    graph: DependencyGraph,
    /// True after any committed mutation since the last save
    changed: bool,
    /// Extra validity predicate beyond the base name grammar
    validator: Option<NameValidator>,
}

impl Spreadsheet {
    /// Create an empty spreadsheet accepting every grammatical cell name
    pub fn new() -> Self {
        Self {
            cells: AHashMap::new(),
            graph: DependencyGraph::new(),
            changed: false,
            validator: None,
        }
    }

    /// Create an empty spreadsheet whose legal names are narrowed by
    /// `validator`
    ///
    /// The predicate sees canonical (upper-case) names that already match
    /// the base grammar. It also governs which cells a formula may
    /// reference.
    pub fn with_validator<F>(validator: F) -> Self
    where
        F: Fn(&str) -> bool + 'static,
    {
        Self {
            validator: Some(Box::new(validator)),
            ..Self::new()
        }
    }

    /// Whether the spreadsheet has been mutated since construction or the
    /// last [`mark_saved`](Self::mark_saved)
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Clear the changed flag after a successful save
    ///
    /// Intended for the persistence collaborator; the engine never clears
    /// the flag on its own.
    pub fn mark_saved(&mut self) {
        self.changed = false;
    }

    /// The canonical names of all non-empty cells, in no particular order
    pub fn names_of_nonempty_cells(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// The contents of the named cell (empty for unmaterialized cells)
    pub fn get_cell_contents(&self, name: &str) -> Result<CellContents> {
        let name = self.validate_name(name)?;
        Ok(self
            .cells
            .get(&name)
            .map(|cell| cell.contents.clone())
            .unwrap_or_default())
    }

    /// The displayed value of the named cell (empty text for unmaterialized
    /// cells)
    pub fn get_cell_value(&self, name: &str) -> Result<CellValue> {
        let name = self.validate_name(name)?;
        Ok(self
            .cells
            .get(&name)
            .map(|cell| cell.value.clone())
            .unwrap_or_else(CellValue::empty))
    }

    /// Set the contents of the named cell from raw input text
    ///
    /// The text is classified: anything that parses as a double becomes
    /// numeric contents, a leading `=` makes the remainder a formula
    /// (variables normalized to upper-case and checked against the name
    /// validity rules), and everything else is plain text. The empty string
    /// reverts the cell to its default empty state.
    ///
    /// On success the affected cells — the named cell plus every cell
    /// depending on it, directly or indirectly — are recalculated, and their
    /// names are returned in recalculation (dependency) order, the named
    /// cell first.
    ///
    /// Fails with [`Error::InvalidName`] or [`Error::FormulaFormat`] before
    /// any state changes, and with [`Error::CircularDependency`] after
    /// rolling the speculative dependency edit back in full; in every
    /// failure case the cell's contents are left untouched.
    pub fn set_contents_of_cell(&mut self, name: &str, content: &str) -> Result<Vec<String>> {
        let name = self.validate_name(name)?;
        let contents = self.classify(content)?;

        // Speculative graph edit: capture the pre-image of this cell's
        // dependees, then point them at the new formula's variables (or
        // nothing, for text/number/empty contents).
        let previous: Vec<String> = self.graph.dependees(&name).map(String::from).collect();
        match &contents {
            CellContents::Formula(formula) => {
                self.graph.replace_dependees(&name, formula.variables())
            }
            _ => self.graph.replace_dependees(&name, std::iter::empty::<&str>()),
        }

        // Cycle check doubles as computing the recalculation order. On
        // failure, restore the pre-image; the commit below never happened.
        let order = match self.cells_to_recalculate(&name) {
            Ok(order) => order,
            Err(err) => {
                self.graph.replace_dependees(&name, &previous);
                return Err(err);
            }
        };

        // Commit
        if contents.is_empty() {
            self.cells.remove(&name);
        } else {
            self.cells.entry(name).or_default().contents = contents;
        }
        self.changed = true;

        self.recalculate(&order);
        Ok(order)
    }

    /// Canonicalize a name, enforcing the grammar and the configured
    /// predicate
    fn validate_name(&self, name: &str) -> Result<String> {
        let canonical = CellName::parse(name)?.into_string();
        if !self.name_is_legal(&canonical) {
            return Err(Error::InvalidName(canonical));
        }
        Ok(canonical)
    }

    /// Whether a canonical name passes the extra validity predicate
    /// (and the base grammar, for formula variables)
    fn name_is_legal(&self, canonical: &str) -> bool {
        CellName::is_valid(canonical)
            && self.validator.as_ref().map_or(true, |valid| valid(canonical))
    }

    /// Classify raw input text as number, formula, or text contents
    fn classify(&self, content: &str) -> Result<CellContents> {
        if content.is_empty() {
            return Ok(CellContents::Empty);
        }
        if let Ok(number) = content.trim().parse::<f64>() {
            return Ok(CellContents::Number(number));
        }
        if let Some(expression) = content.strip_prefix('=') {
            let formula = Formula::parse_with(
                expression,
                |var| var.to_ascii_uppercase(),
                |var| self.name_is_legal(var),
            )?;
            return Ok(CellContents::Formula(formula));
        }
        Ok(CellContents::Text(content.to_string()))
    }

    /// The named cell plus all its direct and indirect dependents, in an
    /// order where every cell comes after the cells it depends on
    ///
    /// Depth-first traversal of the dependents edges with an in-progress
    /// marker; revisiting an in-progress cell signals a cycle. The reversed
    /// postorder is a topological order of the affected cells, starting with
    /// `start`.
    fn cells_to_recalculate(&self, start: &str) -> Result<Vec<String>> {
        let mut visited = AHashSet::new();
        let mut in_progress = AHashSet::new();
        let mut postorder = Vec::new();

        self.visit(start, &mut visited, &mut in_progress, &mut postorder)?;

        postorder.reverse();
        Ok(postorder)
    }

    fn visit(
        &self,
        cell: &str,
        visited: &mut AHashSet<String>,
        in_progress: &mut AHashSet<String>,
        postorder: &mut Vec<String>,
    ) -> Result<()> {
        in_progress.insert(cell.to_string());

        for dependent in self.graph.dependents(cell) {
            if in_progress.contains(dependent) {
                return Err(Error::CircularDependency(dependent.to_string()));
            }
            if !visited.contains(dependent) {
                self.visit(dependent, visited, in_progress, postorder)?;
            }
        }

        in_progress.remove(cell);
        visited.insert(cell.to_string());
        postorder.push(cell.to_string());
        Ok(())
    }

    /// Recompute values along a dependency-respecting order
    ///
    /// Evaluation failures become error values on the affected cell; they
    /// never abort the pass.
    fn recalculate(&mut self, order: &[String]) {
        for name in order {
            let Some(cell) = self.cells.get(name) else {
                // Unmaterialized dependents cannot occur (only formula cells
                // appear as dependents); the cell being emptied can.
                continue;
            };

            let value = match &cell.contents {
                CellContents::Empty => CellValue::empty(),
                CellContents::Text(text) => CellValue::Text(text.clone()),
                CellContents::Number(number) => CellValue::Number(*number),
                CellContents::Formula(formula) => {
                    match formula.evaluate(|var| self.lookup(var)) {
                        Ok(number) => CellValue::Number(number),
                        Err(err) => CellValue::Error(FormulaErrorValue::from(err)),
                    }
                }
            };

            if let Some(cell) = self.cells.get_mut(name) {
                cell.value = value;
            }
        }
    }

    /// The variable-lookup capability handed to formula evaluation: a cell
    /// supplies a value only when its current value is a number
    fn lookup(&self, var: &str) -> Option<f64> {
        self.cells.get(var)?.value.as_number()
    }
}

impl Default for Spreadsheet {
    fn default() -> Self {
        Self::new()
    }
}
