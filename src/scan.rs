use crate::matchers::{self, Cell, MatchContext, Rejection};
use crate::types::Record;
use crate::{Column, Role, Value};

/// Per-row split of the tested columns into plain equality checks and
/// predicate calls, fixed at compile time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ScanRow {
    pub(crate) constants: Vec<usize>,
    pub(crate) predicates: Vec<usize>,
}

/// A data row after compilation.
#[derive(Debug, Clone)]
pub(crate) struct CompiledRow {
    pub(crate) cells: Vec<Cell>,
    pub(crate) scan: ScanRow,
}

/// Compile one column's cell, returning it with its scan classification:
/// `Some(true)` for a predicate column, `Some(false)` for a constant column,
/// `None` when the cell is never tested.
pub(crate) fn scan_cell(
    column: &Column,
    cell: &str,
    ctx: &MatchContext<'_>,
    text_only: bool,
) -> Result<(Cell, Option<bool>), Rejection> {
    let compiled = match column.role() {
        Role::Input if text_only || column.is_text_only() => {
            if cell.is_empty() {
                Cell::Blank
            } else {
                Cell::Text(cell.to_owned())
            }
        }
        Role::Input => matchers::scan_input(cell, ctx)?,
        Role::Guard => matchers::scan_guard(cell)?,
        Role::Output => matchers::scan_output(cell, text_only || column.is_text_only())?,
        Role::If => return Ok((matchers::scan_if(cell)?, None)),
    };
    let class = match (column.role(), &compiled) {
        (Role::Output | Role::If, _) | (_, Cell::Blank) => None,
        (_, Cell::Pred(_)) => Some(true),
        (_, Cell::Text(_) | Cell::Const(_)) => Some(false),
    };
    Ok((compiled, class))
}

impl CompiledRow {
    /// Two-phase match: every constant column by equality first, then every
    /// predicate column. `scan` holds the input's value for each column.
    pub(crate) fn matches<R: Record + ?Sized>(&self, scan: &[&Value], record: &R) -> bool {
        self.scan
            .constants
            .iter()
            .all(|&col| self.cells[col].matches_constant(scan[col]))
            && self.scan.predicates.iter().all(|&col| match &self.cells[col] {
                Cell::Pred(predicate) => predicate.matches(scan[col], record),
                _ => true,
            })
    }
}
