use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::data::table::{Column, Table};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load an event table from a CSV file.
///
/// Layout: a header row of channel names, then one event per record. Column
/// types are inferred per column: all-numeric → Float, all `true`/`false` →
/// Bool, anything else is a fatal parse error naming the row and column.
pub fn load_csv(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path)?;
    load_csv_reader(file)
}

/// Load an event table from any CSV source (used directly by tests).
pub fn load_csv_reader<R: Read>(reader: R) -> Result<Table> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut raw: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for result in reader.records() {
        let record = result?;
        for (idx, value) in record.iter().enumerate() {
            if idx < raw.len() {
                raw[idx].push(value.trim().to_string());
            }
        }
    }

    let mut table = Table::new();
    for (name, values) in headers.into_iter().zip(raw) {
        let column = infer_column(&name, &values)?;
        table.insert_column(name, column)?;
    }
    debug!(
        "loaded {} events across {} channels",
        table.row_count(),
        table.column_count()
    );
    Ok(table)
}

/// Derive a sample identifier from a data file path: the file stem, i.e. the
/// name left of the extension.
pub fn sample_id_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_string()
}

/// Build a column-rename map from loader metadata.
///
/// Binary flow-cytometry containers carry human channel labels under the
/// `$P{n}S` metadata keys (1-based, in column order). For each column whose
/// key is present, the map sends the raw column name to that label. Apply the
/// result once at load time via [`Table::rename_columns`].
pub fn channel_renames(
    meta: &BTreeMap<String, String>,
    columns: &[String],
) -> BTreeMap<String, String> {
    let mut renames = BTreeMap::new();
    for (idx, column) in columns.iter().enumerate() {
        let key = format!("$P{}S", idx + 1);
        if let Some(label) = meta.get(&key) {
            renames.insert(column.clone(), label.clone());
        }
    }
    renames
}

// ---------------------------------------------------------------------------
// Type inference
// ---------------------------------------------------------------------------

fn infer_column(name: &str, values: &[String]) -> Result<Column> {
    if !values.is_empty() && values.iter().all(|v| v == "true" || v == "false") {
        return Ok(Column::Bool(values.iter().map(|v| v == "true").collect()));
    }
    let mut floats = Vec::with_capacity(values.len());
    for (row, value) in values.iter().enumerate() {
        let parsed = value.parse::<f64>().map_err(|_| Error::NonNumericValue {
            row,
            column: name.to_string(),
            value: value.clone(),
        })?;
        floats.push(parsed);
    }
    Ok(Column::Float(floats))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_numeric_and_bool_columns() {
        let csv = "FSC-H,SSC-H,is_ref\n100.5,200.0,true\n50.25,75.0,false\n";
        let table = load_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.float_column("FSC-H").unwrap(), [100.5, 50.25]);
        assert_eq!(table.bool_column("is_ref").unwrap(), [true, false]);
    }

    #[test]
    fn non_numeric_cell_names_row_and_column() {
        let csv = "FSC-H\n1.0\noops\n";
        let err = load_csv_reader(csv.as_bytes()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("FSC-H") && msg.contains("oops"));
    }

    #[test]
    fn empty_body_yields_empty_table() {
        let csv = "FSC-H,SSC-H\n";
        let table = load_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn sample_id_is_the_file_stem() {
        assert_eq!(
            sample_id_from_path(Path::new("/data/plate1/A01 well.fcs")),
            "A01 well"
        );
    }

    #[test]
    fn channel_renames_follow_pns_keys() {
        let meta: BTreeMap<String, String> = [
            ("$P1S".to_string(), "CD3 FITC".to_string()),
            ("$P3S".to_string(), "PI".to_string()),
        ]
        .into_iter()
        .collect();
        let columns = vec!["FL1-H".to_string(), "FL2-H".to_string(), "FL3-H".to_string()];
        let renames = channel_renames(&meta, &columns);
        assert_eq!(renames.get("FL1-H").map(String::as_str), Some("CD3 FITC"));
        assert!(!renames.contains_key("FL2-H"));
        assert_eq!(renames.get("FL3-H").map(String::as_str), Some("PI"));
    }
}
