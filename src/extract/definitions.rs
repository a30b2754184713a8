//! Glossary assembly from per-standard term selections.
//!
//! Each recognized standard has a companion table in the form where terms
//! are flagged wanted through widgets, and a heading-delimited block in the
//! definitions document holding the term texts. The resolver correlates the
//! two, numbers citations per contributing standard, and assembles one
//! deduplicated, alphabetically ordered glossary.

use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::extract::section::{self, StyleMatch};
use crate::extract::{widgets, TableCatalog};
use crate::model::{Document, Paragraph};
use crate::parser::FormDocument;
use crate::render::ReportSink;

/// Flag value marking a term as wanted.
const WANTED_FLAG: &str = "Yes";

/// One recognized standard and its companion table in the form.
#[derive(Debug, Clone)]
pub struct StandardSpec {
    /// Heading text of the standard in the definitions document.
    pub name: String,

    /// Catalog name of the term-selection table in the form.
    pub table: String,
}

impl StandardSpec {
    /// Create a spec whose table follows the `"<name> definitions table"`
    /// convention.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let table = format!("{name} definitions table");
        Self { name, table }
    }
}

/// Configuration for glossary resolution.
#[derive(Debug, Clone)]
pub struct DefinitionsConfig {
    /// Standards in priority order; citation numbers follow this order.
    pub standards: Vec<StandardSpec>,

    /// Style of standard headings in the definitions document.
    pub standard_style: String,

    /// Style of term anchor headings in the definitions document.
    pub term_style: String,
}

impl Default for DefinitionsConfig {
    fn default() -> Self {
        Self {
            standards: vec![
                StandardSpec::new("EU Regulation 2017/745"),
                StandardSpec::new("IEC 62366-1"),
                StandardSpec::new("FDA Guidance"),
            ],
            standard_style: "Heading 1".to_string(),
            term_style: "Heading 2".to_string(),
        }
    }
}

/// A resolved definition: the term's paragraphs with their source styles,
/// citation marker already appended to the last one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinitionEntry {
    /// Paragraphs of the definition, in source order.
    pub paragraphs: Vec<Paragraph>,
}

/// The assembled glossary, ordered lexicographically by term key.
///
/// A space-suffixed duplicate key sorts immediately after its un-suffixed
/// sibling under ordinary string ordering, so colliding terms stay adjacent
/// in the output.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Glossary {
    entries: BTreeMap<String, DefinitionEntry>,
}

impl Glossary {
    /// Create an empty glossary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a definition by its exact key (including any suffix spaces).
    pub fn get(&self, term: &str) -> Option<&DefinitionEntry> {
        self.entries.get(term)
    }

    /// Insert a definition, suffixing the key with trailing spaces until it
    /// is unique.
    ///
    /// This is the collision rule for terms defined by more than one
    /// standard: the later entry is kept under a visibly distinct key
    /// instead of silently overwriting the earlier one. Returns the key the
    /// entry was stored under.
    pub fn insert_or_suffix(&mut self, term: &str, entry: DefinitionEntry) -> String {
        let mut key = term.to_string();
        while self.entries.contains_key(&key) {
            key.push(' ');
        }
        self.entries.insert(key.clone(), entry);
        key
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the glossary is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over definitions in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DefinitionEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Write the glossary to a sink: each term as a heading in `term_style`
    /// followed by its stored paragraphs with their recorded styles.
    pub fn write(&self, sink: &mut dyn ReportSink, term_style: &str) {
        for (term, entry) in &self.entries {
            sink.add_paragraph(term, term_style);
            for paragraph in &entry.paragraphs {
                sink.add_paragraph(&paragraph.text, &paragraph.style);
            }
        }
    }
}

/// Resolves wanted terms into a glossary.
#[derive(Debug, Clone, Default)]
pub struct DefinitionsResolver {
    config: DefinitionsConfig,
}

impl DefinitionsResolver {
    /// Create a resolver with the given configuration.
    pub fn new(config: DefinitionsConfig) -> Self {
        Self { config }
    }

    /// Resolve every standard's wanted terms into one glossary.
    ///
    /// `form` supplies the term-selection tables (and their widgets);
    /// `definitions` is the document holding the term blocks.
    pub fn resolve(
        &self,
        form: &FormDocument,
        definitions: &Document,
        catalog: &TableCatalog,
    ) -> Result<Glossary> {
        let mut glossary = Glossary::new();
        let mut citation = 0usize;

        for standard in &self.config.standards {
            let wanted = self.wanted_terms(form, catalog, standard)?;
            if wanted.is_empty() {
                debug!("standard {:?}: no wanted terms", standard.name);
                continue;
            }

            let range = section::section(
                &definitions.paragraphs,
                &standard.name,
                &StyleMatch::Exact(&self.config.standard_style),
                &StyleMatch::Exact(&self.config.standard_style),
            )?
            .body;

            // Citation numbers are dense: this standard contributes, so it
            // takes the next number.
            citation += 1;
            for term in &wanted {
                let entry = self.collect_definition(definitions, range.clone(), term, citation)?;
                glossary.insert_or_suffix(term, entry);
            }
            debug!(
                "standard {:?}: {} terms, citation [{citation}]",
                standard.name,
                wanted.len()
            );
        }
        Ok(glossary)
    }

    /// Resolve and write the glossary in one step.
    pub fn resolve_all(
        &self,
        sink: &mut dyn ReportSink,
        form: &FormDocument,
        definitions: &Document,
        catalog: &TableCatalog,
    ) -> Result<()> {
        let glossary = self.resolve(form, definitions, catalog)?;
        glossary.write(sink, &self.config.term_style);
        Ok(())
    }

    /// Read the standard's term-selection table: non-widget cell texts in
    /// row-major order are the terms, widget values are the flags, and a
    /// `"Yes"` flag marks the preceding term as wanted.
    fn wanted_terms(
        &self,
        form: &FormDocument,
        catalog: &TableCatalog,
        standard: &StandardSpec,
    ) -> Result<Vec<String>> {
        let table = catalog.table(&form.document, &standard.table)?;
        let flags = widgets::resolve(&form.markup, catalog.index_of(&standard.table)?)?;

        let mut wanted = Vec::new();
        let mut widget_index = 0usize;
        let mut last_text: Option<&str> = None;
        for row in &table.rows {
            for cell in &row.cells {
                if cell.is_widget() {
                    if flags.get(widget_index).map(String::as_str) == Some(WANTED_FLAG) {
                        if let Some(term) = last_text {
                            wanted.push(term.to_string());
                        }
                    }
                    widget_index += 1;
                } else if !cell.is_empty() {
                    last_text = Some(cell.plain_text());
                }
            }
        }
        Ok(wanted)
    }

    /// Collect a term's paragraphs: everything after its anchor heading up
    /// to the next term anchor (or the end of the standard's block), with
    /// the citation marker appended to the last paragraph.
    fn collect_definition(
        &self,
        definitions: &Document,
        range: std::ops::Range<usize>,
        term: &str,
        citation: usize,
    ) -> Result<DefinitionEntry> {
        let block = &definitions.paragraphs[range];
        let term_style = StyleMatch::Exact(&self.config.term_style);
        let anchor = section::locate(block, term, &term_style).ok_or_else(|| {
            Error::HeadingNotFound {
                title: term.to_string(),
                style: self.config.term_style.clone(),
            }
        })?;
        let end = section::next_boundary(block, &term_style, anchor).unwrap_or(block.len());

        let mut paragraphs: Vec<Paragraph> = block[anchor + 1..end].to_vec();
        let marker = format!(" [{citation}]");
        match paragraphs.last_mut() {
            Some(last) => last.text.push_str(&marker),
            None => paragraphs.push(Paragraph::normal(marker.trim_start().to_string())),
        }
        Ok(DefinitionEntry { paragraphs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str) -> DefinitionEntry {
        DefinitionEntry {
            paragraphs: vec![Paragraph::normal(text)],
        }
    }

    #[test]
    fn test_insert_or_suffix_keeps_both() {
        let mut glossary = Glossary::new();
        assert_eq!(glossary.insert_or_suffix("Risk", entry("first")), "Risk");
        assert_eq!(glossary.insert_or_suffix("Risk", entry("second")), "Risk ");
        assert_eq!(glossary.len(), 2);
        assert_eq!(
            glossary.get("Risk").unwrap().paragraphs[0].text,
            "first"
        );
        assert_eq!(
            glossary.get("Risk ").unwrap().paragraphs[0].text,
            "second"
        );
    }

    #[test]
    fn test_insert_or_suffix_third_collision() {
        let mut glossary = Glossary::new();
        glossary.insert_or_suffix("Risk", entry("a"));
        glossary.insert_or_suffix("Risk", entry("b"));
        assert_eq!(glossary.insert_or_suffix("Risk", entry("c")), "Risk  ");
    }

    #[test]
    fn test_suffixed_keys_sort_adjacently() {
        let mut glossary = Glossary::new();
        glossary.insert_or_suffix("Severity", entry("s"));
        glossary.insert_or_suffix("Risk", entry("a"));
        glossary.insert_or_suffix("Risk", entry("b"));
        let keys: Vec<&str> = glossary.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["Risk", "Risk ", "Severity"]);
    }

    #[test]
    fn test_standard_spec_table_convention() {
        let spec = StandardSpec::new("IEC 62366-1");
        assert_eq!(spec.table, "IEC 62366-1 definitions table");
    }
}
