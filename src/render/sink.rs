//! Output sink boundary.
//!
//! The engine never writes the output document itself; it hands styled
//! paragraphs and table shells to a sink and does not inspect what the sink
//! does with them.

use serde::Serialize;

/// Receiver for generated report content.
pub trait ReportSink {
    /// Append a paragraph with the given style.
    fn add_paragraph(&mut self, text: &str, style: &str);

    /// Append an empty table shell with the given dimensions.
    fn add_table(&mut self, rows: usize, cols: usize);
}

/// One recorded sink call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SinkEvent {
    /// A paragraph was emitted.
    Paragraph {
        /// Paragraph text.
        text: String,
        /// Paragraph style.
        style: String,
    },

    /// A table shell was emitted.
    Table {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },
}

/// Sink that records every call; the engine's test double and the simplest
/// way to hand content to a downstream writer.
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    /// Recorded events in emission order.
    pub events: Vec<SinkEvent>,
}

impl BufferSink {
    /// Create an empty buffer sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Texts of all recorded paragraphs, in order.
    pub fn paragraph_texts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Paragraph { text, .. } => Some(text.as_str()),
                SinkEvent::Table { .. } => None,
            })
            .collect()
    }
}

impl ReportSink for BufferSink {
    fn add_paragraph(&mut self, text: &str, style: &str) {
        self.events.push(SinkEvent::Paragraph {
            text: text.to_string(),
            style: style.to_string(),
        });
    }

    fn add_table(&mut self, rows: usize, cols: usize) {
        self.events.push(SinkEvent::Table { rows, cols });
    }
}

/// Sink that renders content as plain text, one paragraph per line.
#[derive(Debug, Clone, Default)]
pub struct TextSink {
    output: String,
}

impl TextSink {
    /// Create an empty text sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the accumulated text.
    pub fn into_string(self) -> String {
        self.output
    }

    /// Borrow the accumulated text.
    pub fn as_str(&self) -> &str {
        &self.output
    }
}

impl ReportSink for TextSink {
    fn add_paragraph(&mut self, text: &str, _style: &str) {
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn add_table(&mut self, rows: usize, cols: usize) {
        self.output.push_str(&format!("[table {rows}x{cols}]\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_sink_records_in_order() {
        let mut sink = BufferSink::new();
        sink.add_paragraph("Purpose", "Heading 1");
        sink.add_table(3, 2);
        sink.add_paragraph("Body.", "Normal");

        assert_eq!(sink.events.len(), 3);
        assert_eq!(sink.paragraph_texts(), ["Purpose", "Body."]);
        assert_eq!(sink.events[1], SinkEvent::Table { rows: 3, cols: 2 });
    }

    #[test]
    fn test_text_sink_output() {
        let mut sink = TextSink::new();
        sink.add_paragraph("One", "Normal");
        sink.add_table(1, 2);
        assert_eq!(sink.as_str(), "One\n[table 1x2]\n");
    }
}
