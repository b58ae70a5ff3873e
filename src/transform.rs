//! Derived-column transforms.

use log::debug;
use regex::Regex;

use crate::data::table::{Column, Table};
use crate::error::Result;

/// Conventional channel-name pattern: columns ending in an area/width/height
/// detector suffix (`-A`, `-W`, `-H`).
pub const CHANNEL_PATTERN: &str = r"\w+-(A|W|H)$";

/// Add a `log10(<name>)` column for every numeric column whose name matches
/// `pattern`.
///
/// The logarithm of zero or a negative value is recorded as an explicit NaN,
/// never an error. When `remove_undefined` is set, every row that then holds
/// a NaN in any numeric column of the table is pruned — a table-wide side
/// effect, not one scoped to the new columns.
///
/// Boolean columns are never transformed, even if their names match.
pub fn log10_columns(table: &mut Table, pattern: &Regex, remove_undefined: bool) -> Result<()> {
    let matching: Vec<String> = table
        .column_names()
        .iter()
        .filter(|name| pattern.is_match(name))
        .cloned()
        .collect();

    let mut added = 0;
    for name in matching {
        let Some(values) = table.column(&name)?.as_float() else {
            continue;
        };
        let transformed: Vec<f64> = values
            .iter()
            .map(|&v| if v > 0.0 { v.log10() } else { f64::NAN })
            .collect();
        table.insert_column(format!("log10({name})"), Column::Float(transformed))?;
        added += 1;
    }
    debug!("log10 transform added {added} columns");

    if remove_undefined {
        table.drop_undefined_rows();
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
