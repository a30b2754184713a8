//! Single-choice widget resolution.
//!
//! A cell holding a widget exposes no text through the cell grid, so the
//! chosen values are read straight out of the document markup: every
//! `sdtContent` element below the requested `tbl` holds one text node with
//! the selected value.

use log::trace;

use crate::error::{Error, Result};
use crate::parser::MarkupTree;

/// The reserved value meaning "slot intentionally unbound".
///
/// Widgets default to a placeholder containing this literal, and template
/// slots bound to it stay empty. It must never collide with a legitimate
/// parameter value.
pub const SENTINEL: &str = "-";

/// Resolve the chosen value of every single-choice widget in a table.
///
/// Values come back in document order. No count validation is performed
/// against the table geometry; callers must know how many values they
/// expect.
pub fn resolve(markup: &MarkupTree, table_index: usize) -> Result<Vec<String>> {
    let table = markup.table(table_index)?;
    let mut values = Vec::new();
    for (ordinal, content) in table.descendants("sdtContent").iter().enumerate() {
        let text = content
            .first_descendant("t")
            .ok_or(Error::MalformedWidget {
                table: table_index,
                ordinal,
            })?;
        values.push(text.text.clone());
    }
    trace!("table {table_index}: resolved {} widget values", values.len());
    Ok(values)
}

/// Count the leading widget values that are actually set.
///
/// The scan stops at the first value containing the placeholder `"-"`; when
/// every value is set, the count is the full list length, so the scan never
/// runs past the table's physical widgets.
pub fn count_set(values: &[String]) -> usize {
    values.iter().take_while(|v| !v.contains(SENTINEL)).count()
}
