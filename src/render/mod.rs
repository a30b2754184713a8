//! Report content generation.

mod sink;
mod template;

pub use sink::{BufferSink, ReportSink, SinkEvent, TextSink};
pub use template::{render_chapter, slot_values, substitute, NORMAL_STYLE, SLOT_COUNT};

use crate::error::Result;
use crate::extract::ParameterStore;

/// Serialize the extracted parameter set to JSON.
pub fn to_json(store: &ParameterStore, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(store)?
    } else {
        serde_json::to_string(store)?
    };
    Ok(json)
}
