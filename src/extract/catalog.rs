//! Table catalog.
//!
//! Tables carry no identifier of their own; the report template author
//! supplies an ordered name list whose positions must line up with the
//! physical tables of the form. The catalog is validated against the
//! document once at startup so a mismatch fails immediately instead of
//! reading the wrong table later.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::{Document, Table};

/// Validated mapping from table name to table ordinal.
#[derive(Debug, Clone)]
pub struct TableCatalog {
    names: Vec<String>,
    indices: HashMap<String, usize>,
}

impl TableCatalog {
    /// Build a catalog from an ordered name list, validating it against the
    /// document's table sequence.
    pub fn new<S: Into<String>>(
        names: impl IntoIterator<Item = S>,
        document: &Document,
    ) -> Result<Self> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() != document.table_count() {
            return Err(Error::CatalogMismatch {
                catalog: names.len(),
                document: document.table_count(),
            });
        }
        let indices = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Ok(Self { names, indices })
    }

    /// Get the ordinal position of a named table.
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.indices
            .get(name)
            .copied()
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    /// Get a named table from the document.
    pub fn table<'a>(&self, document: &'a Document, name: &str) -> Result<&'a Table> {
        document.table(self.index_of(name)?)
    }

    /// The catalog's names, in table order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of cataloged tables.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
