//! # formfill
//!
//! Form extraction and template substitution engine for DOCX-based report
//! generation.
//!
//! Authors fill in a form template: styled headings delimit free-text
//! sections, and tables carry parameters, repeated records and
//! single-choice widgets. This library parses that form once, extracts a
//! typed parameter dictionary from it, and renders parameterized report
//! chapters and cross-referenced definition lists through an output sink.
//!
//! ## Quick Start
//!
//! ```no_run
//! use formfill::{parse_file, BufferSink, ParameterStore, StoreConfig, TableCatalog};
//!
//! fn main() -> formfill::Result<()> {
//!     // Parse the filled-in form.
//!     let form = parse_file("Text_input.docx")?;
//!
//!     // Bind table names to their positions, validated up front.
//!     let catalog = TableCatalog::new(
//!         ["Report table", "Study table", "Purpose parameter table"],
//!         &form.document,
//!     )?;
//!
//!     // Extract the parameter dictionary and render a chapter.
//!     let store = ParameterStore::build(&form, &catalog, &StoreConfig::default())?;
//!     let mut sink = BufferSink::new();
//!     formfill::render_chapter(&mut sink, &form, &catalog, &store, "Purpose")?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Pieces
//!
//! - **Model**: paragraphs with style names, tables whose cells are plain
//!   text or single-choice widgets
//! - **Parser**: one-shot DOCX package reader keeping the raw markup tree
//!   alongside the model (widget values only exist in the markup)
//! - **Extraction**: section location, record count inference, the
//!   parameter store, glossary resolution
//! - **Rendering**: three-slot positional templates written to a pluggable
//!   output sink
//!
//! The engine is synchronous and single-threaded; every operation is a
//! direct read over the once-parsed form.

pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use extract::{
    DefinitionsConfig, DefinitionsResolver, Glossary, ParamValue, ParameterStore, StandardSpec,
    StoreConfig, StyleMatch, TableCatalog,
};
pub use model::{CellContent, Document, Paragraph, Table, TableCell, TableRow};
pub use parser::{FormDocument, FormParser, MarkupTree, StyleMap};
pub use render::{render_chapter, BufferSink, ReportSink, SinkEvent, TextSink};

use std::io::Read;
use std::path::Path;

/// Parse a DOCX form file into a [`FormDocument`].
///
/// # Example
///
/// ```no_run
/// use formfill::parse_file;
///
/// let form = parse_file("Text_input.docx").unwrap();
/// println!("Tables: {}", form.document.table_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<FormDocument> {
    FormParser::open(path)?.parse()
}

/// Parse a DOCX form from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<FormDocument> {
    FormParser::from_bytes(data)?.parse()
}

/// Parse a DOCX form from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<FormDocument> {
    FormParser::from_reader(reader)?.parse()
}
