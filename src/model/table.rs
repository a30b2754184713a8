//! Table types.

use serde::{Deserialize, Serialize};

/// Content of a single table cell.
///
/// A cell either exposes its text directly, or holds a single-choice widget
/// whose chosen value is only reachable through the document markup. The
/// ordinal is the widget's document-order position within its table, used to
/// pair the cell with the value list returned by widget resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellContent {
    /// Plain text content.
    Text(String),

    /// A single-choice widget; the value lives in the markup.
    Widget(usize),
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell content.
    pub content: CellContent,
}

impl TableCell {
    /// Create a cell with plain text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: CellContent::Text(text.into()),
        }
    }

    /// Create an empty text cell.
    pub fn empty() -> Self {
        Self::text("")
    }

    /// Create a cell holding the widget with the given in-table ordinal.
    pub fn widget(ordinal: usize) -> Self {
        Self {
            content: CellContent::Widget(ordinal),
        }
    }

    /// Get the cell text; a widget cell exposes no text.
    pub fn plain_text(&self) -> &str {
        match &self.content {
            CellContent::Text(text) => text,
            CellContent::Widget(_) => "",
        }
    }

    /// Check if the cell exposes no text.
    ///
    /// Widget cells count as empty here, mirroring how the source form's
    /// cell accessors behave when a widget is present.
    pub fn is_empty(&self) -> bool {
        self.plain_text().is_empty()
    }

    /// Check if the cell holds a widget.
    pub fn is_widget(&self) -> bool {
        matches!(self.content, CellContent::Widget(_))
    }
}

/// A table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row.
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a row with the given cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// Create a row of plain text cells.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }

    /// Get a cell by column index.
    pub fn cell(&self, column: usize) -> Option<&TableCell> {
        self.cells.get(column)
    }
}

/// A table: an ordered grid of cells.
///
/// Row 0 is the header row; the rows after it are the table body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table, header first.
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from rows of strings (convenient in tests).
    pub fn from_rows<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows.into_iter().map(TableRow::from_strings).collect(),
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on the first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.cells.len()).unwrap_or(0)
    }

    /// Get a cell by row and column index.
    pub fn cell(&self, row: usize, column: usize) -> Option<&TableCell> {
        self.rows.get(row).and_then(|r| r.cell(column))
    }

    /// Get the body rows (everything after the header row).
    pub fn body(&self) -> &[TableRow] {
        if self.rows.is_empty() {
            &[]
        } else {
            &self.rows[1..]
        }
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_from_rows() {
        let table = Table::from_rows([["Name", "Value"], ["Device", "Model X"]]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.cell(1, 1).unwrap().plain_text(), "Model X");
        assert_eq!(table.body().len(), 1);
    }

    #[test]
    fn test_widget_cell_exposes_no_text() {
        let cell = TableCell::widget(0);
        assert!(cell.is_widget());
        assert!(cell.is_empty());
        assert_eq!(cell.plain_text(), "");
    }

    #[test]
    fn test_empty_table_body() {
        let table = Table::new();
        assert!(table.is_empty());
        assert!(table.body().is_empty());
        assert_eq!(table.column_count(), 0);
    }
}
