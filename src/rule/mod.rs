/// Selection-rule engine: a registry of named rule expressions over table
/// columns, evaluated to boolean masks and row subsets.
///
/// Rules are plain text in a bracketed mini-language (`[column]` references
/// combined with comparisons, `&`, `|`, `!`, parentheses). Registration is
/// lazy: nothing is validated until a rule is evaluated, so syntax and
/// column-reference errors surface at [`SelectionRules::subset`] time.
pub mod eval;
pub mod parser;
pub mod token;

use std::collections::BTreeMap;

use log::debug;

use crate::data::store::TableStore;
use crate::data::table::Table;
use crate::error::{Error, Result};

/// Named selection rules, process-local with no persistence.
#[derive(Debug, Clone, Default)]
pub struct SelectionRules {
    rules: BTreeMap<String, String>,
}

impl SelectionRules {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or overwrite a named rule. The text is not validated here.
    pub fn add_rule(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.rules.insert(name.into(), text.into());
    }

    /// Look up a rule's text.
    pub fn rule(&self, name: &str) -> Result<&str> {
        self.rules
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| Error::RuleNotFound(name.to_string()))
    }

    /// All registered rules, keyed by name.
    pub fn rules(&self) -> &BTreeMap<String, String> {
        &self.rules
    }

    /// Evaluate a named rule against a table, returning the row mask.
    pub fn subset_mask(&self, name: &str, table: &Table) -> Result<Vec<bool>> {
        let text = self.rule(name)?;
        let expr = parser::parse(text)?;
        let mask = eval::eval_mask(&expr, table)?;
        debug!(
            "rule '{name}' matched {} of {} rows",
            mask.iter().filter(|&&b| b).count(),
            mask.len()
        );
        Ok(mask)
    }

    /// Evaluate a named rule against a table in the store and return the
    /// filtered row subset (stable order, all original columns).
    pub fn subset(&self, name: &str, store: &TableStore, table_name: &str) -> Result<Table> {
        let table = store.get(table_name)?;
        let mask = self.subset_mask(name, table)?;
        table.filter_rows(&mask)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
