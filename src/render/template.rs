//! Parameterized chapter rendering.
//!
//! A chapter's paragraphs are positional-format templates with up to three
//! substitution sites. The placeholder keys for the three slots come from
//! the chapter's parameter table (widget-backed); a slot bound to the
//! sentinel `"-"` stays empty.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::extract::section::{self, StyleMatch};
use crate::extract::widgets::{self, SENTINEL};
use crate::extract::{ParameterStore, TableCatalog};
use crate::parser::FormDocument;
use crate::render::ReportSink;

/// Number of positional substitution slots per paragraph.
pub const SLOT_COUNT: usize = 3;

/// Style applied to every emitted body paragraph, replacing the source
/// style.
pub const NORMAL_STYLE: &str = "Normal";

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{|\}\}|\{(\d*)\}").expect("placeholder regex"));

/// Substitute slot values into a paragraph template.
///
/// Supports indexed sites (`{0}`..`{2}`), auto-advancing sites (`{}`) and
/// brace escapes (`{{`, `}}`). A site index beyond the slot count is a hard
/// error. Substitution is pure: the same template and values always produce
/// the same output.
pub fn substitute(template: &str, values: &[String; SLOT_COUNT]) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    let mut auto = 0usize;
    for caps in PLACEHOLDER.captures_iter(template) {
        let site = caps.get(0).expect("whole match");
        out.push_str(&template[last..site.start()]);
        last = site.end();
        match site.as_str() {
            "{{" => out.push('{'),
            "}}" => out.push('}'),
            _ => {
                let slot = match caps.get(1).map(|digits| digits.as_str()) {
                    Some("") | None => {
                        let slot = auto;
                        auto += 1;
                        slot
                    }
                    Some(digits) => digits
                        .parse::<usize>()
                        .map_err(|_| Error::Template(format!("bad slot index {digits:?}")))?,
                };
                let value = values.get(slot).ok_or_else(|| {
                    Error::Template(format!("slot {slot} out of range (max {})", SLOT_COUNT - 1))
                })?;
                out.push_str(value);
            }
        }
    }
    out.push_str(&template[last..]);
    Ok(out)
}

/// Resolve the three slot values for a chapter from its placeholder keys.
///
/// Each key is either the sentinel `"-"` (slot stays empty) or a parameter
/// name; a name missing from the store is a hard error.
pub fn slot_values(keys: &[String], store: &ParameterStore) -> Result<[String; SLOT_COUNT]> {
    let mut values: [String; SLOT_COUNT] = Default::default();
    for (slot, key) in keys.iter().take(SLOT_COUNT).enumerate() {
        if key != SENTINEL {
            values[slot] = store.expect(key)?.to_string();
        }
    }
    Ok(values)
}

/// Render one chapter of the report.
///
/// Locates the chapter's section in the form (any heading style closes it),
/// emits the heading with its source style, then every body paragraph with
/// the slot values substituted and the normalized output style.
pub fn render_chapter(
    sink: &mut dyn ReportSink,
    form: &FormDocument,
    catalog: &TableCatalog,
    store: &ParameterStore,
    title: &str,
) -> Result<()> {
    let paragraphs = &form.document.paragraphs;
    let chapter = section::section(
        paragraphs,
        title,
        &StyleMatch::AnyHeading,
        &StyleMatch::AnyHeading,
    )?;
    sink.add_paragraph(title, &paragraphs[chapter.heading].style);

    let table_index = catalog.index_of(&format!("{title} parameter table"))?;
    let keys = widgets::resolve(&form.markup, table_index)?;
    let values = slot_values(&keys, store)?;

    for paragraph in &paragraphs[chapter.body] {
        sink.add_paragraph(&substitute(&paragraph.text, &values)?, NORMAL_STYLE);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(a: &str, b: &str, c: &str) -> [String; SLOT_COUNT] {
        [a.to_string(), b.to_string(), c.to_string()]
    }

    #[test]
    fn test_indexed_sites() {
        let out = substitute("Use {0} for {1}.", &values("Model X", "insertion", "")).unwrap();
        assert_eq!(out, "Use Model X for insertion.");
    }

    #[test]
    fn test_auto_sites_advance() {
        let out = substitute("{} then {}", &values("first", "second", "")).unwrap();
        assert_eq!(out, "first then second");
    }

    #[test]
    fn test_empty_slots_render_empty() {
        let out = substitute("Use {0} for {1}", &values("Model X", "", "")).unwrap();
        assert_eq!(out, "Use Model X for ");
    }

    #[test]
    fn test_brace_escapes() {
        let out = substitute("{{not a slot}} {0}", &values("x", "", "")).unwrap();
        assert_eq!(out, "{not a slot} x");
    }

    #[test]
    fn test_slot_out_of_range() {
        let err = substitute("{3}", &values("", "", "")).unwrap_err();
        assert!(matches!(err, Error::Template(_)));
    }

    #[test]
    fn test_no_sites_is_identity() {
        let out = substitute("Plain text.", &values("a", "b", "c")).unwrap();
        assert_eq!(out, "Plain text.");
    }

    #[test]
    fn test_slot_values_sentinel_and_lookup() {
        let mut store = ParameterStore::new();
        store.insert("Device name", "Model X");
        let keys = vec!["Device name".to_string(), SENTINEL.to_string()];
        let values = slot_values(&keys, &store).unwrap();
        assert_eq!(values, ["Model X", "", ""]);
    }

    #[test]
    fn test_slot_values_missing_key_is_hard_error() {
        let store = ParameterStore::new();
        let keys = vec!["Device name".to_string()];
        assert!(matches!(
            slot_values(&keys, &store),
            Err(Error::ParameterNotFound(_))
        ));
    }

    #[test]
    fn test_substitution_is_deterministic() {
        let vals = values("Model X", "", "");
        let first = substitute("Use {0} for {1}", &vals).unwrap();
        let second = substitute("Use {0} for {1}", &vals).unwrap();
        assert_eq!(first, second);
    }
}
