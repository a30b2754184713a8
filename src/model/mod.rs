//! Document model types for form content representation.
//!
//! This module defines the intermediate representation that bridges DOCX
//! parsing and parameter extraction. Paragraphs carry their style names,
//! tables carry a rectangular cell grid, and a cell is either plain text or
//! a single-choice widget whose value lives in the document markup.

mod document;
mod paragraph;
mod table;

pub use document::Document;
pub use paragraph::Paragraph;
pub use table::{CellContent, Table, TableCell, TableRow};
