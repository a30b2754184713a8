//! Paragraph type.

use serde::{Deserialize, Serialize};

/// A paragraph of the source form: its text and the name of its style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Plain text content of the paragraph.
    pub text: String,

    /// Style name (e.g. `"Normal"`, `"Heading 1"`).
    pub style: String,
}

impl Paragraph {
    /// Create a paragraph with the given text and style.
    pub fn new(text: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: style.into(),
        }
    }

    /// Create a body paragraph with the `"Normal"` style.
    pub fn normal(text: impl Into<String>) -> Self {
        Self::new(text, "Normal")
    }

    /// Create a heading paragraph (`"Heading <level>"`).
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        Self::new(text, format!("Heading {}", level.clamp(1, 9)))
    }

    /// Check if the paragraph carries any heading style.
    ///
    /// Matches every style whose name contains `"Heading"`, which is how the
    /// form distinguishes section anchors from body text.
    pub fn is_heading(&self) -> bool {
        self.style.contains("Heading")
    }

    /// Check if the paragraph has no visible text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::normal("")
    }
}
