//! Parameter extraction.
//!
//! One flat key/value dictionary feeds every report chapter. It is built in
//! three passes over the form's tables: the fixed catalog of two-column
//! key/value tables, the three-column task table, and the three-column
//! problem table whose type column hides behind widgets. The store is built
//! once per run and passed by reference to every consumer.

use std::collections::BTreeMap;
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::extract::{records, widgets, TableCatalog};
use crate::parser::FormDocument;

/// Prefix marking count-like parameter keys.
pub const COUNT_PREFIX: &str = "Number of";

/// Upper sanity bound for declared record counts. Declared values above it
/// are treated as implausible and fall back to structural inference.
pub const MAX_DECLARED_COUNT: i64 = 15;

/// A parameter value: an integer for count-like keys, a string otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Count-like value (keys prefixed `"Number of "`).
    Count(i64),

    /// Verbatim text value.
    Text(String),
}

impl ParamValue {
    /// Get the value as a count, if it is one.
    pub fn as_count(&self) -> Option<i64> {
        match self {
            ParamValue::Count(n) => Some(*n),
            ParamValue::Text(_) => None,
        }
    }

    /// Get the value as text, if it is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Count(_) => None,
            ParamValue::Text(text) => Some(text),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Count(n) => write!(f, "{n}"),
            ParamValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(text: &str) -> Self {
        ParamValue::Text(text.to_string())
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Count(n)
    }
}

/// Structural fallback for a declared record count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountSource {
    /// Infer from described body rows of the named table.
    BodyRows(String),

    /// Count set widget values of the named table (stops at the first
    /// placeholder).
    Widgets(String),
}

/// Binds a `"Number of ..."` key to its structural fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountRule {
    /// The parameter key the rule applies to.
    pub key: String,

    /// Where to infer the count from when the declared value is unusable.
    pub source: CountSource,
}

/// Configuration for the parameter build: which tables feed which pass.
///
/// The defaults carry the table names of the usability report form; every
/// name must appear in the catalog handed to [`ParameterStore::build`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Two-column key/value tables, read row by row.
    pub standard_tables: Vec<String>,

    /// The three-column task description table.
    pub tasks_table: String,

    /// Count key gating the task table pass.
    pub tasks_count_key: String,

    /// The three-column problem table with a widget type column.
    pub problems_table: String,

    /// Count key gating the problem table pass.
    pub problems_count_key: String,

    /// Structural fallbacks for declared counts.
    pub count_rules: Vec<CountRule>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let tasks_table = "Critical tasks description table".to_string();
        let problems_table = "Effectiveness analysis problem type table".to_string();
        Self {
            standard_tables: [
                "Report table",
                "Study table",
                "Header table",
                "Approval table",
                "Participants number table",
                "Critical tasks number table",
                "Effectiveness analysis problem number table",
            ]
            .map(String::from)
            .to_vec(),
            tasks_count_key: "Number of critical tasks".to_string(),
            problems_count_key: "Number of problems".to_string(),
            count_rules: vec![
                CountRule {
                    key: "Number of critical tasks".to_string(),
                    source: CountSource::BodyRows(tasks_table.clone()),
                },
                CountRule {
                    key: "Number of problems".to_string(),
                    source: CountSource::Widgets(problems_table.clone()),
                },
                CountRule {
                    key: "Number of participants".to_string(),
                    source: CountSource::BodyRows("Participants description table".to_string()),
                },
            ],
            tasks_table,
            problems_table,
        }
    }
}

impl StoreConfig {
    /// Create a config with the default form layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the standard table list.
    pub fn with_standard_tables<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        self.standard_tables = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the task table name.
    pub fn with_tasks_table(mut self, name: impl Into<String>) -> Self {
        self.tasks_table = name.into();
        self
    }

    /// Set the problem table name.
    pub fn with_problems_table(mut self, name: impl Into<String>) -> Self {
        self.problems_table = name.into();
        self
    }

    /// Add or replace the structural fallback for a count key.
    pub fn with_count_rule(mut self, key: impl Into<String>, source: CountSource) -> Self {
        let key = key.into();
        self.count_rules.retain(|r| r.key != key);
        self.count_rules.push(CountRule { key, source });
        self
    }

    fn rule_for(&self, key: &str) -> Option<&CountRule> {
        self.count_rules.iter().find(|r| r.key == key)
    }
}

/// The flat parameter dictionary built from the form.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ParameterStore {
    values: BTreeMap<String, ParamValue>,
}

impl ParameterStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the dictionary from a parsed form.
    pub fn build(
        form: &FormDocument,
        catalog: &TableCatalog,
        config: &StoreConfig,
    ) -> Result<Self> {
        let mut store = Self::new();
        store.read_standard_tables(form, catalog, config)?;
        store.read_tasks_table(form, catalog, config)?;
        store.read_problems_table(form, catalog, config)?;
        debug!("parameter store built: {} entries", store.len());
        Ok(store)
    }

    /// Insert or replace a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Look up a parameter.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    /// Look up a parameter, failing hard when it is absent.
    pub fn expect(&self, key: &str) -> Result<&ParamValue> {
        self.values
            .get(key)
            .ok_or_else(|| Error::ParameterNotFound(key.to_string()))
    }

    /// Look up a count-like parameter.
    pub fn count(&self, key: &str) -> Result<i64> {
        match self.expect(key)? {
            ParamValue::Count(n) => Ok(*n),
            ParamValue::Text(text) => Err(Error::InvalidCount {
                key: key.to_string(),
                value: text.clone(),
            }),
        }
    }

    /// Look up a text parameter, rendering counts as text too.
    pub fn text(&self, key: &str) -> Result<String> {
        Ok(self.expect(key)?.to_string())
    }

    /// Number of stored parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Pass 1: fixed two-column key/value tables.
    ///
    /// Column 0 is the key, column 1 the value; values of count-like keys
    /// are parsed through the declared-count policy, everything else is
    /// stored verbatim (no trimming).
    fn read_standard_tables(
        &mut self,
        form: &FormDocument,
        catalog: &TableCatalog,
        config: &StoreConfig,
    ) -> Result<()> {
        for table_name in &config.standard_tables {
            let table = catalog.table(&form.document, table_name)?;
            for row in &table.rows {
                let key = match row.cell(0) {
                    Some(cell) => cell.plain_text().to_string(),
                    None => continue,
                };
                let value = row.cell(1).map(|c| c.plain_text()).unwrap_or_default();
                if key.starts_with(COUNT_PREFIX) {
                    let count = self.resolve_count(&key, value, form, catalog, config)?;
                    self.values.insert(key, ParamValue::Count(count));
                } else {
                    self.values.insert(key, ParamValue::Text(value.to_string()));
                }
            }
        }
        Ok(())
    }

    /// Declared-count policy: accept the declared value only when it parses
    /// as a small positive integer; otherwise fall back to structural
    /// inference through the key's count rule.
    fn resolve_count(
        &self,
        key: &str,
        declared: &str,
        form: &FormDocument,
        catalog: &TableCatalog,
        config: &StoreConfig,
    ) -> Result<i64> {
        if let Ok(n) = declared.trim().parse::<i64>() {
            if (1..=MAX_DECLARED_COUNT).contains(&n) {
                return Ok(n);
            }
        }
        let Some(rule) = config.rule_for(key) else {
            return Err(Error::InvalidCount {
                key: key.to_string(),
                value: declared.to_string(),
            });
        };
        let inferred = match &rule.source {
            CountSource::BodyRows(table_name) => {
                let table = catalog.table(&form.document, table_name)?;
                records::infer_count(table, 0)
            }
            CountSource::Widgets(table_name) => {
                let index = catalog.index_of(table_name)?;
                let values = widgets::resolve(&form.markup, index)?;
                widgets::count_set(&values)
            }
        };
        debug!("count {key:?}: declared {declared:?} unusable, inferred {inferred}");
        Ok(inferred as i64)
    }

    /// Pass 2: the three-column task table (label, name, description).
    ///
    /// A record's fields enter the dictionary only when the record is
    /// described; the keys reuse the label text from column 0.
    fn read_tasks_table(
        &mut self,
        form: &FormDocument,
        catalog: &TableCatalog,
        config: &StoreConfig,
    ) -> Result<()> {
        let table = catalog.table(&form.document, &config.tasks_table)?;
        let count = self.count(&config.tasks_count_key)?;
        for i in 1..=count.max(0) as usize {
            let Some(row) = table.rows.get(i) else {
                break;
            };
            if !records::is_described(row, 0) {
                continue;
            }
            let label = row.cell(0).map(|c| c.plain_text()).unwrap_or_default();
            let name = row.cell(1).map(|c| c.plain_text()).unwrap_or_default();
            let description = row.cell(2).map(|c| c.plain_text()).unwrap_or_default();
            self.values
                .insert(format!("{label} name"), ParamValue::Text(name.to_string()));
            self.values.insert(
                format!("{label} description"),
                ParamValue::Text(description.to_string()),
            );
        }
        Ok(())
    }

    /// Pass 3: the problem table, whose type column is a widget.
    ///
    /// Widget cells expose no text, so the pass reconstructs the records
    /// structurally: the non-widget cell texts of the candidate rows form a
    /// flat number/description list, and the widget value list supplies the
    /// types positionally.
    fn read_problems_table(
        &mut self,
        form: &FormDocument,
        catalog: &TableCatalog,
        config: &StoreConfig,
    ) -> Result<()> {
        let table = catalog.table(&form.document, &config.problems_table)?;
        let count = self.count(&config.problems_count_key)?;
        let types = widgets::resolve(&form.markup, catalog.index_of(&config.problems_table)?)?;

        let mut texts: Vec<&str> = Vec::new();
        for i in 1..=count.max(0) as usize {
            let Some(row) = table.rows.get(i) else {
                break;
            };
            for cell in &row.cells {
                if !cell.is_widget() {
                    texts.push(cell.plain_text());
                }
            }
        }

        // chunks_exact drops a trailing unmatched description; zip aligns
        // the pair list with the available widget values.
        for (pair, problem_type) in texts.chunks_exact(2).zip(types.iter()) {
            let (number, description) = (pair[0], pair[1]);
            self.values.insert(
                format!("{number} type"),
                ParamValue::Text(problem_type.clone()),
            );
            self.values.insert(
                format!("{number} description"),
                ParamValue::Text(description.to_string()),
            );
        }
        Ok(())
    }
}
