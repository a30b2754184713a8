//! Error types for the formfill library.

use std::io;
use thiserror::Error;

/// Result type alias for formfill operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading a form or rendering a report.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading the form package.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not a readable DOCX package.
    #[error("Unknown file format: not a valid DOCX package")]
    UnknownFormat,

    /// Error reading the zip container of the form.
    #[error("Package error: {0}")]
    Package(String),

    /// A required package part (e.g. `word/document.xml`) is missing.
    #[error("Missing package part: {0}")]
    MissingPart(String),

    /// Error parsing the document markup.
    #[error("Markup parsing error: {0}")]
    Xml(String),

    /// Table ordinal is out of range for the document.
    #[error("Table {index} is out of range (document has {count} tables)")]
    TableOutOfRange {
        /// Requested table ordinal.
        index: usize,
        /// Number of tables in the document.
        count: usize,
    },

    /// A table name is not present in the catalog.
    #[error("Table not found in catalog: {0}")]
    TableNotFound(String),

    /// The table catalog does not line up with the document's tables.
    #[error("Catalog lists {catalog} tables but document has {document}")]
    CatalogMismatch {
        /// Number of names in the catalog.
        catalog: usize,
        /// Number of tables in the document.
        document: usize,
    },

    /// A styled heading was not found in the document.
    #[error("Heading not found: {title:?} with style {style:?}")]
    HeadingNotFound {
        /// Heading text that was searched for.
        title: String,
        /// Style the heading was expected to carry.
        style: String,
    },

    /// A single-choice widget has no resolvable text payload.
    #[error("Malformed widget {ordinal} in table {table}")]
    MalformedWidget {
        /// Table ordinal the widget belongs to.
        table: usize,
        /// Document-order ordinal of the widget within the table.
        ordinal: usize,
    },

    /// A parameter key referenced by a template is not in the store.
    #[error("Parameter not found: {0}")]
    ParameterNotFound(String),

    /// A declared record count is unusable and no inference rule exists.
    #[error("Invalid count for {key:?}: {value:?}")]
    InvalidCount {
        /// The `"Number of ..."` parameter key.
        key: String,
        /// The declared cell value that failed to parse.
        value: String,
    },

    /// Error substituting parameters into a paragraph template.
    #[error("Template error: {0}")]
    Template(String),

    /// Error serializing extracted content.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            zip::result::ZipError::InvalidArchive(_) => Error::UnknownFormat,
            _ => Error::Package(err.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(err.to_string())
    }
}
