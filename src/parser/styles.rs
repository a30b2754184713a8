//! Style name resolution.
//!
//! Paragraph properties reference styles by id (`Heading1`), while the
//! extraction components match on the human-readable names shown in the
//! editor (`Heading 1`). `word/styles.xml` carries the id-to-name mapping.

use std::collections::HashMap;

use crate::error::Result;
use crate::parser::markup::MarkupTree;

/// Map from style id to style name, built from `word/styles.xml`.
#[derive(Debug, Clone, Default)]
pub struct StyleMap {
    names: HashMap<String, String>,
}

impl StyleMap {
    /// Create an empty map; every lookup falls back to the raw id.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse `word/styles.xml` content into a style map.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let tree = MarkupTree::parse(xml)?;
        let mut names = HashMap::new();
        for style in tree.root().descendants("style") {
            let Some(id) = style.attr("styleId") else {
                continue;
            };
            if let Some(name) = style
                .children_named("name")
                .next()
                .and_then(|n| n.attr("val"))
            {
                names.insert(id.to_string(), name.to_string());
            }
        }
        Ok(Self { names })
    }

    /// Resolve a style id to its display name, falling back to the id when
    /// the map has no entry for it.
    pub fn resolve<'a>(&'a self, style_id: &'a str) -> &'a str {
        self.names.get(style_id).map(String::as_str).unwrap_or(style_id)
    }

    /// Number of known styles.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
