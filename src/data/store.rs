use std::collections::BTreeMap;

use crate::data::table::Table;
use crate::error::{Error, Result};

/// Well-known name of the current working table.
pub const DEFAULT_TABLE: &str = "df";

// ---------------------------------------------------------------------------
// TableStore – named-table registry
// ---------------------------------------------------------------------------

/// A named collection of tables.
///
/// The store exclusively owns its tables; derived/filtered views created by
/// gate or rule operations live here next to the working table under
/// [`DEFAULT_TABLE`]. Access is through named methods only — lookups of
/// missing names fail with [`Error::TableNotFound`], never a silent default.
#[derive(Debug, Clone, Default)]
pub struct TableStore {
    tables: BTreeMap<String, Table>,
}

impl TableStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a table under the given name.
    pub fn insert(&mut self, name: impl Into<String>, table: Table) {
        self.tables.insert(name.into(), table);
    }

    /// Look up a table.
    pub fn get(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    /// Look up a table for mutation.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    /// Remove and return a table.
    pub fn remove(&mut self, name: &str) -> Result<Table> {
        self.tables
            .remove(name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    /// Whether a table with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Registered table names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Iterate over (name, table) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Table)> {
        self.tables.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the store holds no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Drop all tables.
    pub fn clear(&mut self) {
        self.tables.clear();
    }

    /// Merge tables from another mapping, replacing on name collision.
    pub fn extend<I>(&mut self, tables: I)
    where
        I: IntoIterator<Item = (String, Table)>,
    {
        self.tables.extend(tables);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
