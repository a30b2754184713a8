//! Integration tests for chapter rendering.

mod common;

use formfill::render::SinkEvent;
use formfill::{
    render_chapter, BufferSink, Document, Error, Paragraph, ParameterStore, Table, TableCatalog,
    TableCell, TableRow,
};

fn parameter_table(slots: usize) -> Table {
    let mut table = Table::new();
    for i in 0..slots {
        table.add_row(TableRow::new(vec![TableCell::widget(i)]));
    }
    table
}

fn chapter_form(
    title: &str,
    body: &[&str],
    keys: &[&str],
) -> (formfill::FormDocument, TableCatalog) {
    let mut doc = Document::new();
    doc.push_paragraph(Paragraph::heading(title, 1));
    for text in body {
        doc.push_paragraph(Paragraph::normal(*text));
    }
    doc.push_table(parameter_table(keys.len()));

    let form = common::form(doc, &[keys]);
    let catalog = TableCatalog::new([format!("{title} parameter table")], &form.document).unwrap();
    (form, catalog)
}

#[test]
fn test_chapter_substitutes_bound_slots() {
    let (form, catalog) = chapter_form(
        "Instructions",
        &["Use {0} for {1}"],
        &["Device name", "-", "-"],
    );
    let mut store = ParameterStore::new();
    store.insert("Device name", "Model X");

    let mut sink = BufferSink::new();
    render_chapter(&mut sink, &form, &catalog, &store, "Instructions").unwrap();

    assert_eq!(
        sink.events,
        vec![
            SinkEvent::Paragraph {
                text: "Instructions".into(),
                style: "Heading 1".into(),
            },
            SinkEvent::Paragraph {
                text: "Use Model X for ".into(),
                style: "Normal".into(),
            },
        ]
    );
}

#[test]
fn test_rendering_is_deterministic() {
    let (form, catalog) = chapter_form(
        "Instructions",
        &["Use {0} for {1}"],
        &["Device name", "-", "-"],
    );
    let mut store = ParameterStore::new();
    store.insert("Device name", "Model X");

    let mut first = BufferSink::new();
    let mut second = BufferSink::new();
    render_chapter(&mut first, &form, &catalog, &store, "Instructions").unwrap();
    render_chapter(&mut second, &form, &catalog, &store, "Instructions").unwrap();
    assert_eq!(first.events, second.events);
}

#[test]
fn test_source_styles_are_normalized() {
    let (mut form, catalog) = chapter_form("Notes", &[], &["-", "-", "-"]);
    // A styled body paragraph still comes out as "Normal".
    form.document
        .push_paragraph(Paragraph::new("Quoted text.", "Quote"));

    let store = ParameterStore::new();
    let mut sink = BufferSink::new();
    render_chapter(&mut sink, &form, &catalog, &store, "Notes").unwrap();

    assert_eq!(
        sink.events[1],
        SinkEvent::Paragraph {
            text: "Quoted text.".into(),
            style: "Normal".into(),
        }
    );
}

#[test]
fn test_unbound_placeholder_key_is_a_hard_error() {
    let (form, catalog) = chapter_form(
        "Instructions",
        &["Use {0}."],
        &["Device name", "-", "-"],
    );
    let store = ParameterStore::new();

    let mut sink = BufferSink::new();
    let err = render_chapter(&mut sink, &form, &catalog, &store, "Instructions").unwrap_err();
    assert!(matches!(err, Error::ParameterNotFound(key) if key == "Device name"));
}

#[test]
fn test_missing_chapter_heading_is_a_hard_error() {
    let (form, catalog) = chapter_form("Instructions", &[], &["-", "-", "-"]);
    let store = ParameterStore::new();

    let mut sink = BufferSink::new();
    let err = render_chapter(&mut sink, &form, &catalog, &store, "Conclusion").unwrap_err();
    assert!(matches!(err, Error::HeadingNotFound { .. }));
}
