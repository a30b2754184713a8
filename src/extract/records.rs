//! Record count inference.
//!
//! Repeated-record tables (tasks, problems, participants) do not declare
//! their row count; it is inferred by scanning the table body for described
//! rows. A row is described when any cell outside the title column is
//! non-empty.
//!
//! The inference deliberately scans the whole body and returns the highest
//! described row index, so a blank row followed by a filled one still
//! counts toward the total. That rule is load-bearing for existing forms
//! and must not be changed without product guidance.

use crate::model::{Table, TableRow};

/// Check whether a row is described: at least one cell outside the title
/// column carries text.
pub fn is_described(row: &TableRow, title_column: usize) -> bool {
    row.cells
        .iter()
        .enumerate()
        .any(|(column, cell)| column != title_column && !cell.is_empty())
}

/// Infer the number of records in a table body.
///
/// Returns the 1-based index of the last described body row (row 0 is the
/// header). A sparse body where row 1 is blank and row 2 is filled yields
/// 2, not 0.
pub fn infer_count(table: &Table, title_column: usize) -> usize {
    let mut count = 0;
    for (index, row) in table.body().iter().enumerate() {
        if is_described(row, title_column) {
            count = index + 1;
        }
    }
    count
}
