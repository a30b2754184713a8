//! Document type.

use serde::{Deserialize, Serialize};

use super::{Paragraph, Table};
use crate::error::{Error, Result};

/// A parsed form document: an ordered paragraph sequence and an ordered
/// table sequence.
///
/// Paragraphs inside table cells do not appear in `paragraphs`; they belong
/// to their cells. Tables are addressed purely by ordinal position, which is
/// why a [`TableCatalog`](crate::extract::TableCatalog) is validated against
/// `tables.len()` before any extraction runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Top-level paragraphs in document order.
    pub paragraphs: Vec<Paragraph>,

    /// Tables in document order.
    pub tables: Vec<Table>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a paragraph.
    pub fn push_paragraph(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    /// Append a table.
    pub fn push_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Get a table by ordinal position.
    pub fn table(&self, index: usize) -> Result<&Table> {
        self.tables.get(index).ok_or(Error::TableOutOfRange {
            index,
            count: self.tables.len(),
        })
    }

    /// Get the number of tables.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Check if the document has no content.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty() && self.tables.is_empty()
    }
}
