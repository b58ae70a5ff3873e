use std::collections::BTreeMap;

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Column – one named measurement or gate flag
// ---------------------------------------------------------------------------

/// A single table column. Event data is numeric; gate results are boolean.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Float(Vec<f64>),
    Bool(Vec<bool>),
}

impl Column {
    /// Number of rows in the column.
    pub fn len(&self) -> usize {
        match self {
            Column::Float(v) => v.len(),
            Column::Bool(v) => v.len(),
        }
    }

    /// Whether the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The numeric values, if this is a numeric column.
    pub fn as_float(&self) -> Option<&[f64]> {
        match self {
            Column::Float(v) => Some(v),
            Column::Bool(_) => None,
        }
    }

    /// The boolean values, if this is a boolean column.
    pub fn as_bool(&self) -> Option<&[bool]> {
        match self {
            Column::Bool(v) => Some(v),
            Column::Float(_) => None,
        }
    }

    /// Keep only the rows where `mask` is true. `mask.len()` must equal `self.len()`.
    fn filtered(&self, mask: &[bool]) -> Column {
        match self {
            Column::Float(v) => Column::Float(
                v.iter()
                    .zip(mask)
                    .filter(|(_, &keep)| keep)
                    .map(|(x, _)| *x)
                    .collect(),
            ),
            Column::Bool(v) => Column::Bool(
                v.iter()
                    .zip(mask)
                    .filter(|(_, &keep)| keep)
                    .map(|(x, _)| *x)
                    .collect(),
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – ordered named columns with a uniform row count
// ---------------------------------------------------------------------------

/// An event table: ordered named columns, all with the same row count.
///
/// Rows have no identity beyond their positional index. Inserting a column
/// under an existing name overwrites it in place, keeping its position.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Column names in first-insertion order.
    order: Vec<String>,
    columns: BTreeMap<String, Column>,
}

impl Table {
    /// An empty table with no columns and no rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from named columns, checking the uniform row count.
    pub fn from_columns<I>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Column)>,
    {
        let mut table = Table::new();
        for (name, col) in columns {
            table.insert_column(name, col)?;
        }
        Ok(table)
    }

    /// Number of rows shared by every column (0 for a column-less table).
    pub fn row_count(&self) -> usize {
        self.order
            .first()
            .and_then(|name| self.columns.get(name))
            .map_or(0, Column::len)
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.order.len()
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> &[String] {
        &self.order
    }

    /// Whether a column with this name exists.
    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Look up a column, failing with a lookup error naming it.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .get(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// Look up a numeric column as a slice.
    pub fn float_column(&self, name: &str) -> Result<&[f64]> {
        self.column(name)?.as_float().ok_or(Error::ColumnType {
            column: name.to_string(),
            expected: "numeric",
        })
    }

    /// Look up a boolean column as a slice.
    pub fn bool_column(&self, name: &str) -> Result<&[bool]> {
        self.column(name)?.as_bool().ok_or(Error::ColumnType {
            column: name.to_string(),
            expected: "boolean",
        })
    }

    /// Insert or overwrite a column.
    ///
    /// The column length must match the table row count, unless the table has
    /// no columns yet (the first column fixes the row count).
    pub fn insert_column(&mut self, name: String, column: Column) -> Result<()> {
        if !self.order.is_empty() {
            let expected = self.row_count();
            // Overwriting the only column may change the row count legally.
            let sole_column = self.order.len() == 1 && self.contains_column(&name);
            if !sole_column && column.len() != expected {
                return Err(Error::ColumnLength {
                    column: name,
                    expected,
                    actual: column.len(),
                });
            }
        }
        if !self.columns.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.columns.insert(name, column);
        Ok(())
    }

    /// Apply a rename map (old name → new name) to matching columns.
    ///
    /// Names absent from the map are left alone; names absent from the table
    /// are ignored, matching load-time rename semantics.
    pub fn rename_columns(&mut self, renames: &BTreeMap<String, String>) {
        for name in &mut self.order {
            if let Some(new_name) = renames.get(name) {
                if let Some(col) = self.columns.remove(name) {
                    self.columns.insert(new_name.clone(), col);
                    *name = new_name.clone();
                }
            }
        }
    }

    /// A new table holding only the rows where `mask` is true.
    ///
    /// Row order and column identity are preserved (stable filter).
    pub fn filter_rows(&self, mask: &[bool]) -> Result<Table> {
        if mask.len() != self.row_count() {
            return Err(Error::MaskLength {
                mask: mask.len(),
                rows: self.row_count(),
            });
        }
        let mut table = Table::new();
        for name in &self.order {
            let filtered = self.columns[name].filtered(mask);
            table.insert_column(name.clone(), filtered)?;
        }
        Ok(table)
    }

    /// Remove every row that holds a NaN in any numeric column.
    ///
    /// Table-wide: a NaN anywhere in a row discards the whole row, including
    /// its values in unaffected columns.
    pub fn drop_undefined_rows(&mut self) {
        let n = self.row_count();
        let mut keep = vec![true; n];
        for name in &self.order {
            if let Column::Float(values) = &self.columns[name] {
                for (row, v) in values.iter().enumerate() {
                    if v.is_nan() {
                        keep[row] = false;
                    }
                }
            }
        }
        if keep.iter().all(|&k| k) {
            return;
        }
        for name in &self.order {
            let filtered = self.columns[name].filtered(&keep);
            self.columns.insert(name.clone(), filtered);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn two_column_table() -> Table {
        Table::from_columns([
            ("a".to_string(), Column::Float(vec![1.0, 2.0, 3.0])),
            ("flag".to_string(), Column::Bool(vec![true, false, true])),
        ])
        .unwrap()
    }

    #[test]
    fn insert_preserves_order_and_overwrites_in_place() {
        let mut t = two_column_table();
        t.insert_column("a".to_string(), Column::Float(vec![9.0, 8.0, 7.0]))
            .unwrap();
        assert_eq!(t.column_names(), ["a", "flag"]);
        assert_eq!(t.float_column("a").unwrap(), [9.0, 8.0, 7.0]);
    }

    #[test]
    fn insert_rejects_length_mismatch() {
        let mut t = two_column_table();
        let err = t
            .insert_column("b".to_string(), Column::Float(vec![1.0]))
            .unwrap_err();
        assert!(matches!(err, Error::ColumnLength { .. }));
    }

    #[test]
    fn missing_column_error_names_it() {
        let t = two_column_table();
        let err = t.column("nonexistent").unwrap_err();
        assert!(err.to_string().contains("nonexistent"));
    }

    #[test]
    fn typed_access_rejects_wrong_type() {
        let t = two_column_table();
        assert!(matches!(
            t.float_column("flag").unwrap_err(),
            Error::ColumnType { .. }
        ));
        assert!(matches!(
            t.bool_column("a").unwrap_err(),
            Error::ColumnType { .. }
        ));
    }

    #[test]
    fn filter_rows_is_stable() {
        let t = two_column_table();
        let sub = t.filter_rows(&[true, false, true]).unwrap();
        assert_eq!(sub.row_count(), 2);
        assert_eq!(sub.float_column("a").unwrap(), [1.0, 3.0]);
        assert_eq!(sub.bool_column("flag").unwrap(), [true, true]);
    }

    #[test]
    fn rename_applies_map() {
        let mut t = two_column_table();
        let renames: BTreeMap<String, String> =
            [("a".to_string(), "FSC-H".to_string())].into_iter().collect();
        t.rename_columns(&renames);
        assert_eq!(t.column_names(), ["FSC-H", "flag"]);
        assert!(t.float_column("FSC-H").is_ok());
    }

    #[test]
    fn drop_undefined_rows_prunes_across_all_columns() {
        let mut t = Table::from_columns([
            ("a".to_string(), Column::Float(vec![1.0, f64::NAN, 3.0])),
            ("b".to_string(), Column::Float(vec![f64::NAN, 5.0, 6.0])),
            ("flag".to_string(), Column::Bool(vec![true, true, false])),
        ])
        .unwrap();
        t.drop_undefined_rows();
        assert_eq!(t.row_count(), 1);
        assert_eq!(t.float_column("a").unwrap(), [3.0]);
        assert_eq!(t.bool_column("flag").unwrap(), [false]);
    }

    #[test]
    fn empty_table_has_zero_rows() {
        assert_eq!(Table::new().row_count(), 0);
    }
}
