//! Session context: one explicit object owning the table store and the rule
//! registry for a processing pass, threaded through calls instead of ambient
//! working-directory or sample-ID state.

use std::collections::BTreeMap;

use log::info;
use regex::Regex;

use crate::data::store::{TableStore, DEFAULT_TABLE};
use crate::data::table::Table;
use crate::error::Result;
use crate::gate::{apply, Gate};
use crate::rule::SelectionRules;
use crate::summary::SampleSummary;
use crate::transform;

/// A gating session: named tables plus named selection rules.
///
/// Typical lifecycle per sample: [`Session::ingest_events`] (resets the table
/// registry, keeps the rules), then transforms, gates, and rule evaluations,
/// then [`Session::summarize`].
#[derive(Debug, Clone, Default)]
pub struct Session {
    store: TableStore,
    rules: SelectionRules,
}

impl Session {
    /// A session with no tables and no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a freshly loaded event table as the working table.
    ///
    /// All previously registered tables are dropped; selection rules persist
    /// across samples.
    pub fn ingest_events(&mut self, table: Table) {
        info!("ingesting {} events", table.row_count());
        self.store.clear();
        self.store.insert(DEFAULT_TABLE, table);
    }

    /// The table store.
    pub fn store(&self) -> &TableStore {
        &self.store
    }

    /// The table store, mutable (for derived views and cross-table writes).
    pub fn store_mut(&mut self) -> &mut TableStore {
        &mut self.store
    }

    // -- Transforms --

    /// Apply the log10 transform to matching columns of the working table.
    pub fn log10(&mut self, pattern: &Regex, remove_undefined: bool) -> Result<()> {
        let table = self.store.get_mut(DEFAULT_TABLE)?;
        transform::log10_columns(table, pattern, remove_undefined)
    }

    // -- Gates --

    /// Apply a gate to the working table, writing `result_name` in place.
    pub fn apply_gate(
        &mut self,
        x_col: &str,
        y_col: &str,
        gate: &Gate,
        result_name: &str,
    ) -> Result<Vec<bool>> {
        self.apply_gate_between(DEFAULT_TABLE, x_col, y_col, gate, result_name, DEFAULT_TABLE)
    }

    /// Apply a gate with explicit source and destination tables.
    pub fn apply_gate_between(
        &mut self,
        source: &str,
        x_col: &str,
        y_col: &str,
        gate: &Gate,
        result_name: &str,
        dest: &str,
    ) -> Result<Vec<bool>> {
        apply::apply_gate(&mut self.store, source, x_col, y_col, gate, result_name, dest)
    }

    // -- Selection rules --

    /// Register or overwrite a named subset rule (validated lazily).
    pub fn add_subset_rule(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.rules.add_rule(name, text);
    }

    /// The text of a named rule.
    pub fn subset_rule(&self, name: &str) -> Result<&str> {
        self.rules.rule(name)
    }

    /// All registered rules.
    pub fn subset_rules(&self) -> &BTreeMap<String, String> {
        self.rules.rules()
    }

    /// Evaluate a named rule against the working table.
    pub fn subset(&self, name: &str) -> Result<Table> {
        self.subset_in(name, DEFAULT_TABLE)
    }

    /// Evaluate a named rule against an arbitrary table in the store.
    pub fn subset_in(&self, name: &str, table_name: &str) -> Result<Table> {
        self.rules.subset(name, &self.store, table_name)
    }

    // -- Summary --

    /// Build the per-sample summary row from two registered rules.
    ///
    /// `signal_col` is the numeric column whose mean over the numerator
    /// subset becomes the rfu metric.
    pub fn summarize(
        &self,
        sample_id: &str,
        numerator_rule: &str,
        denominator_rule: &str,
        signal_col: &str,
    ) -> Result<SampleSummary> {
        let all_events = self.store.get(DEFAULT_TABLE)?.row_count();
        let denominator = self.subset(denominator_rule)?.row_count();
        let numerator = self.subset(numerator_rule)?;
        let signal = numerator.float_column(signal_col)?;
        Ok(SampleSummary::from_counts(
            sample_id, all_events, denominator, signal,
        ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::Column;
    use crate::gate::EllipseGate;

    fn events() -> Table {
        Table::from_columns([
            ("x".to_string(), Column::Float(vec![0.0, 0.1, 5.0, 0.2])),
            ("y".to_string(), Column::Float(vec![0.0, 0.0, 5.0, 0.1])),
            (
                "signal".to_string(),
                Column::Float(vec![6.0, 5.0, 7.0, 8.0]),
            ),
        ])
        .unwrap()
    }

    fn unit_circle() -> Gate {
        Gate::Ellipse(EllipseGate {
            center: (0.0, 0.0),
            width: 2.0,
            height: 2.0,
            angle: 0.0,
        })
    }

    #[test]
    fn full_pass_produces_a_summary_row() {
        let mut session = Session::new();
        session.ingest_events(events());
        session.apply_gate("x", "y", &unit_circle(), "in_gate").unwrap();
        session.add_subset_rule("denominator", "[in_gate]");
        session.add_subset_rule("numerator", "[in_gate] & ([signal] > 5.5)");

        let row = session
            .summarize("A01", "numerator", "denominator", "signal")
            .unwrap();
        assert_eq!(row.all_events, 4);
        assert_eq!(row.denominator, 3);
        assert_eq!(row.numerator, 2);
        assert_eq!(row.rfu, 7.0); // mean of 6.0 and 8.0
        assert_eq!(row.ratio_pct, 66.66); // 2/3, truncated
    }

    #[test]
    fn ingest_resets_tables_but_keeps_rules() {
        let mut session = Session::new();
        session.add_subset_rule("r", "[signal] > 5.5");
        session.ingest_events(events());
        session.store_mut().insert("df_extra", events());
        session.ingest_events(events());
        assert!(!session.store().contains("df_extra"));
        assert!(session.subset("r").is_ok());
    }

    #[test]
    fn derived_views_can_be_stashed_and_queried() {
        let mut session = Session::new();
        session.ingest_events(events());
        session.add_subset_rule("bright", "[signal] > 5.5");
        let view = session.subset("bright").unwrap();
        session.store_mut().insert("df_bright", view);
        session.add_subset_rule("brightest", "[signal] > 7.5");
        let narrowed = session.subset_in("brightest", "df_bright").unwrap();
        assert_eq!(narrowed.float_column("signal").unwrap(), [8.0]);
    }
}
