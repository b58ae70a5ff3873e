//! Per-sample aggregate results and their CSV serialization.

use std::io::Write;

use serde::Serialize;

use crate::error::Result;

/// One row of the accumulating per-sample result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSummary {
    /// Sample identifier (conventionally the data file stem).
    pub sample_id: String,
    /// Total event count in the working table.
    pub all_events: usize,
    /// Row count of the denominator subset.
    pub denominator: usize,
    /// Row count of the numerator subset.
    pub numerator: usize,
    /// Mean of the signal column over the numerator subset, truncated to two
    /// decimals; 0 when the numerator subset is empty.
    pub rfu: f64,
    /// `numerator / denominator` as a percentage, truncated to two decimals;
    /// 0 when the denominator is empty.
    pub ratio_pct: f64,
}

impl SampleSummary {
    /// Assemble a summary row from subset counts and the numerator signal.
    pub fn from_counts(
        sample_id: impl Into<String>,
        all_events: usize,
        denominator: usize,
        numerator_signal: &[f64],
    ) -> Self {
        let numerator = numerator_signal.len();
        let rfu = if numerator < 1 {
            0.0
        } else {
            let mean = numerator_signal.iter().sum::<f64>() / numerator as f64;
            truncate_2(mean)
        };
        let ratio_pct = if denominator == 0 {
            0.0
        } else {
            truncate_2(numerator as f64 / denominator as f64 * 100.0)
        };
        SampleSummary {
            sample_id: sample_id.into(),
            all_events,
            denominator,
            numerator,
            rfu,
            ratio_pct,
        }
    }
}

/// Truncate toward zero at two decimal places (`int(x * 100) / 100`).
fn truncate_2(x: f64) -> f64 {
    (x * 100.0).trunc() / 100.0
}

/// Serialize summary rows as CSV (header + one record per sample).
pub fn write_summaries<W: Write>(writer: W, rows: &[SampleSummary]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_rather_than_rounds() {
        // mean = 5.678; rounding would give 5.68.
        let row = SampleSummary::from_counts("s", 10, 3, &[5.678]);
        assert_eq!(row.rfu, 5.67);
        // 1/3 → 33.333…% truncates to 33.33.
        assert_eq!(row.ratio_pct, 33.33);
    }

    #[test]
    fn empty_numerator_yields_zero_rfu() {
        let row = SampleSummary::from_counts("s", 10, 4, &[]);
        assert_eq!(row.numerator, 0);
        assert_eq!(row.rfu, 0.0);
        assert_eq!(row.ratio_pct, 0.0);
    }

    #[test]
    fn empty_denominator_yields_zero_ratio() {
        let row = SampleSummary::from_counts("s", 10, 0, &[6.0]);
        assert_eq!(row.ratio_pct, 0.0);
        assert_eq!(row.rfu, 6.0);
    }

    #[test]
    fn csv_output_has_named_header() {
        let rows = vec![SampleSummary::from_counts("A01", 100, 80, &[5.5, 6.5])];
        let mut buf = Vec::new();
        write_summaries(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("sample_id,all_events,denominator,numerator,rfu,ratio_pct")
        );
        assert_eq!(lines.next(), Some("A01,100,80,2,6.0,2.5"));
    }
}
