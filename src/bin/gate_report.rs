//! Batch gating pipeline: run the singlet/hot-spot analysis over a directory
//! of CSV event files and write the accumulated per-sample summary.
//!
//! Usage: `gate_report <data_dir> [results.csv]`
//! (writes to stdout when no output path is given)

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::info;
use regex::Regex;

use cytogate::data::loader;
use cytogate::{write_summaries, Gate, SampleSummary, Session, CHANNEL_PATTERN};

/// Presumed-singlet region on the log10(BL2 PI-H) vs log10(BL2 PI-A) plane.
const SINGLET_GATE: &str = "[[4.4,4.7],[4.54,4.9],[5.3,5.7],[5.6,5.75],[4.7,4.6],[4.4,4.7]]";

/// Scatter hot-spot on the log10(FSC-H) vs log10(SSC-H) plane.
const HOT_SPOT_GATE: &str = r#"{"center":[6.25,5.85],"width":0.5,"height":0.6}"#;

/// Signal channel for the rfu metric.
const SIGNAL_COLUMN: &str = "log10(R1 647-H)";

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let data_dir = args
        .next()
        .map(PathBuf::from)
        .context("usage: gate_report <data_dir> [results.csv]")?;
    let out_path = args.next().map(PathBuf::from);

    let singlet_gate: Gate =
        serde_json::from_str(SINGLET_GATE).context("parsing singlet gate definition")?;
    let hot_spot_gate: Gate =
        serde_json::from_str(HOT_SPOT_GATE).context("parsing hot-spot gate definition")?;
    let channel_pattern = Regex::new(CHANNEL_PATTERN).expect("channel pattern is valid");

    let mut session = Session::new();
    session.add_subset_rule("denominator", "[is_singlet]");
    session.add_subset_rule(
        "numerator",
        "[is_singlet] & ([log10(R1 647-H)] > 5.5) & [hot_spot]",
    );

    let mut results: Vec<SampleSummary> = Vec::new();
    for path in event_files(&data_dir)? {
        let sample_id = loader::sample_id_from_path(&path);
        info!("processing {sample_id}");

        let table = loader::load_csv(&path)
            .with_context(|| format!("loading {}", path.display()))?;
        session.ingest_events(table);

        // Signals of interest are lognormal; keep undefined rows so counts
        // stay consistent with the raw event total.
        session.log10(&channel_pattern, false)?;
        session.apply_gate(
            "log10(BL2 PI-H)",
            "log10(BL2 PI-A)",
            &singlet_gate,
            "is_singlet",
        )?;
        session.apply_gate("log10(FSC-H)", "log10(SSC-H)", &hot_spot_gate, "hot_spot")?;

        let row = session.summarize(&sample_id, "numerator", "denominator", SIGNAL_COLUMN)?;
        results.push(row);
    }

    if results.is_empty() {
        bail!("no .csv event files found in {}", data_dir.display());
    }

    match out_path {
        Some(path) => {
            let file = std::fs::File::create(&path)
                .with_context(|| format!("creating {}", path.display()))?;
            write_summaries(file, &results)?;
            info!("wrote {} summary rows to {}", results.len(), path.display());
        }
        None => write_summaries(std::io::stdout().lock(), &results)?,
    }
    Ok(())
}

/// CSV event files in the directory, in sorted (alphanumeric) order.
fn event_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("reading {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
        })
        .collect();
    files.sort();
    Ok(files)
}
