//! Form package parsing.

mod docx;
mod markup;
mod styles;

pub use docx::{FormDocument, FormParser};
pub use markup::{MarkupNode, MarkupTree};
pub use styles::StyleMap;
