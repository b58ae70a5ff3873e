//! Gate application layer: binds a gate to two named columns of a source
//! table and writes the resulting boolean column into a destination table.

use log::debug;

use crate::data::store::TableStore;
use crate::data::table::Column;
use crate::error::{Error, Result};
use crate::gate::Gate;

/// Apply `gate` to the points zipped from `x_col`/`y_col` of `source`, and
/// write the boolean result into `dest` under `result_name`.
///
/// When `dest == source` the write is in place; otherwise the destination
/// table must already exist and have the same row count as the source. The
/// write is additive — existing columns are never removed — and the mask is
/// also returned for immediate use.
///
/// An empty source table yields an empty mask without error. Missing or
/// non-numeric x/y columns fail before anything is written.
pub fn apply_gate(
    store: &mut TableStore,
    source: &str,
    x_col: &str,
    y_col: &str,
    gate: &Gate,
    result_name: &str,
    dest: &str,
) -> Result<Vec<bool>> {
    let mask = {
        let table = store.get(source)?;
        let xs = table.float_column(x_col)?;
        let ys = table.float_column(y_col)?;
        let points: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        gate.contains_points(&points)?
    };

    if dest != source {
        let source_rows = mask.len();
        let dest_rows = store.get(dest)?.row_count();
        if dest_rows != source_rows {
            return Err(Error::RowCountMismatch {
                src: source_rows,
                dest: dest_rows,
            });
        }
    }

    debug!(
        "gate '{result_name}' on {source}[{x_col},{y_col}]: {} of {} inside",
        mask.iter().filter(|&&b| b).count(),
        mask.len()
    );
    store
        .get_mut(dest)?
        .insert_column(result_name.to_string(), Column::Bool(mask.clone()))?;
    Ok(mask)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
