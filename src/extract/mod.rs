//! Form extraction components.
//!
//! Pure readers over the parsed form: widget resolution and section
//! location feed the parameter store, which in turn feeds definitions
//! resolution and chapter rendering.

mod catalog;
pub mod definitions;
mod params;
pub mod records;
pub mod section;
pub mod widgets;

pub use catalog::TableCatalog;
pub use definitions::{
    DefinitionEntry, DefinitionsConfig, DefinitionsResolver, Glossary, StandardSpec,
};
pub use params::{
    CountRule, CountSource, ParamValue, ParameterStore, StoreConfig, COUNT_PREFIX,
    MAX_DECLARED_COUNT,
};
pub use section::{Section, StyleMatch};
