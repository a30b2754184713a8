//! Shared fixtures: in-memory forms whose markup lines up with the model's
//! table ordinals.

use formfill::{Document, FormDocument, MarkupTree, StyleMap};

/// Build a markup tree with one `tbl` element per entry; each entry lists
/// the widget values embedded in that table, in document order.
pub fn markup_for_tables(widget_values: &[&[&str]]) -> MarkupTree {
    let mut xml = String::from("<w:document><w:body>");
    for values in widget_values {
        xml.push_str("<w:tbl>");
        for value in *values {
            xml.push_str("<w:sdt><w:sdtContent><w:t>");
            xml.push_str(value);
            xml.push_str("</w:t></w:sdtContent></w:sdt>");
        }
        xml.push_str("</w:tbl>");
    }
    xml.push_str("</w:body></w:document>");
    MarkupTree::parse(xml.as_bytes()).unwrap()
}

/// Pair a hand-built document model with matching markup. `widget_values`
/// must list one entry per table in the document.
pub fn form(document: Document, widget_values: &[&[&str]]) -> FormDocument {
    assert_eq!(
        document.table_count(),
        widget_values.len(),
        "markup tables must align with model tables"
    );
    FormDocument {
        markup: markup_for_tables(widget_values),
        styles: StyleMap::empty(),
        document,
    }
}
