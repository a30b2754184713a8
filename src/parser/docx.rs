//! DOCX form parsing.
//!
//! The form package is opened exactly once per run: the zip container is
//! read into memory, `word/document.xml` is parsed into both the document
//! model and the markup tree, and `word/styles.xml` supplies display names
//! for paragraph styles. Every extraction component borrows the resulting
//! [`FormDocument`]; nothing re-opens or re-parses the package.

use std::io::{Cursor, Read};
use std::path::Path;

use log::debug;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{Error, Result};
use crate::model::{Document, Paragraph, Table, TableCell, TableRow};
use crate::parser::markup::{MarkupNode, MarkupTree};
use crate::parser::styles::StyleMap;

const DOCUMENT_PART: &str = "word/document.xml";
const STYLES_PART: &str = "word/styles.xml";

/// A fully parsed form: the document model plus the markup it was built
/// from.
///
/// The markup tree stays available because single-choice widget values are
/// only reachable through it, not through the cell grid.
#[derive(Debug, Clone)]
pub struct FormDocument {
    /// The document model (paragraphs and tables).
    pub document: Document,

    /// Markup tree of `word/document.xml`.
    pub markup: MarkupTree,

    /// Style id to display name mapping.
    pub styles: StyleMap,
}

/// Parser for DOCX form packages.
pub struct FormParser {
    document_xml: Vec<u8>,
    styles_xml: Option<Vec<u8>>,
}

impl FormParser {
    /// Open a form package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Open a form package from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(data))?;
        let document_xml = read_part(&mut archive, DOCUMENT_PART)?
            .ok_or_else(|| Error::MissingPart(DOCUMENT_PART.to_string()))?;
        let styles_xml = read_part(&mut archive, STYLES_PART)?;
        Ok(Self {
            document_xml,
            styles_xml,
        })
    }

    /// Open a form package from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Parse the package into a [`FormDocument`].
    pub fn parse(&self) -> Result<FormDocument> {
        let styles = match &self.styles_xml {
            Some(xml) => StyleMap::parse(xml)?,
            None => StyleMap::empty(),
        };
        let markup = MarkupTree::parse(&self.document_xml)?;
        let document = build_document(&markup, &styles);
        debug!(
            "parsed form: {} paragraphs, {} tables, {} styles",
            document.paragraphs.len(),
            document.table_count(),
            styles.len()
        );
        Ok(FormDocument {
            document,
            markup,
            styles,
        })
    }
}

fn read_part<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<Vec<u8>>> {
    match archive.by_name(name) {
        Ok(mut file) => {
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)?;
            Ok(Some(data))
        }
        Err(ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Build the document model from the parsed markup.
///
/// Only elements that are direct children of `body` enter the paragraph and
/// table sequences; paragraphs inside table cells belong to their cells.
fn build_document(markup: &MarkupTree, styles: &StyleMap) -> Document {
    let mut document = Document::new();
    let Some(body) = markup.root().first_descendant("body") else {
        return document;
    };
    for element in &body.children {
        match element.name.as_str() {
            "p" => document.push_paragraph(build_paragraph(element, styles)),
            "tbl" => document.push_table(build_table(element)),
            _ => {}
        }
    }
    document
}

fn build_paragraph(p: &MarkupNode, styles: &StyleMap) -> Paragraph {
    let style_id = p
        .children_named("pPr")
        .next()
        .and_then(|ppr| ppr.children_named("pStyle").next())
        .and_then(|s| s.attr("val"))
        .unwrap_or("Normal");
    Paragraph::new(paragraph_text(p), styles.resolve(style_id))
}

fn paragraph_text(p: &MarkupNode) -> String {
    p.descendants("t").iter().map(|t| t.text.as_str()).collect()
}

fn build_table(tbl: &MarkupNode) -> Table {
    let mut table = Table::new();
    // Widget ordinals are assigned in document order within the table, so
    // they line up with the value list produced by widget resolution.
    let mut widget_ordinal = 0usize;
    for tr in tbl.children_named("tr") {
        let mut cells = Vec::new();
        for tc in tr.children_named("tc") {
            if tc.first_descendant("sdt").is_some() {
                cells.push(TableCell::widget(widget_ordinal));
                widget_ordinal += 1;
            } else {
                cells.push(TableCell::text(cell_text(tc)));
            }
        }
        table.add_row(TableRow::new(cells));
    }
    table
}

fn cell_text(tc: &MarkupNode) -> String {
    tc.descendants("p")
        .iter()
        .map(|p| paragraph_text(p))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellContent;

    const DOC_XML: &[u8] = br#"<w:document><w:body>
        <w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Purpose</w:t></w:r></w:p>
        <w:p><w:r><w:t>Use </w:t></w:r><w:r><w:t>{0} daily.</w:t></w:r></w:p>
        <w:tbl>
            <w:tr><w:tc><w:p><w:r><w:t>Device name</w:t></w:r></w:p></w:tc>
                  <w:tc><w:p><w:r><w:t>Model X</w:t></w:r></w:p></w:tc></w:tr>
            <w:tr><w:tc><w:p><w:r><w:t>Type</w:t></w:r></w:p></w:tc>
                  <w:tc><w:sdt><w:sdtContent><w:t>Critical</w:t></w:sdtContent></w:sdt></w:tc></w:tr>
        </w:tbl>
    </w:body></w:document>"#;

    fn parse_doc() -> Document {
        let markup = MarkupTree::parse(DOC_XML).unwrap();
        let styles = StyleMap::parse(
            br#"<w:styles><w:style w:styleId="Heading1"><w:name w:val="Heading 1"/></w:style></w:styles>"#,
        )
        .unwrap();
        build_document(&markup, &styles)
    }

    #[test]
    fn test_paragraph_styles_resolved() {
        let doc = parse_doc();
        assert_eq!(doc.paragraphs[0].text, "Purpose");
        assert_eq!(doc.paragraphs[0].style, "Heading 1");
        assert_eq!(doc.paragraphs[1].style, "Normal");
    }

    #[test]
    fn test_runs_concatenated() {
        let doc = parse_doc();
        assert_eq!(doc.paragraphs[1].text, "Use {0} daily.");
    }

    #[test]
    fn test_table_cells_and_widgets() {
        let doc = parse_doc();
        let table = doc.table(0).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(0, 1).unwrap().plain_text(), "Model X");
        assert_eq!(
            table.cell(1, 1).unwrap().content,
            CellContent::Widget(0)
        );
    }

    #[test]
    fn test_table_paragraphs_not_in_document_sequence() {
        let doc = parse_doc();
        // Cell paragraphs stay inside their cells.
        assert_eq!(doc.paragraphs.len(), 2);
    }
}
