//! cytogate – flow-cytometry gating and subset-selection engine.
//!
//! Event data (per-cell optical measurements) is loaded into named tables,
//! transformed (log10 channels), classified through geometric gates (ellipse
//! or polygon regions in a 2D measurement plane) that write boolean columns,
//! and summarized by named selection rules over those columns.
//!
//! Data flows strictly forward:
//! store → transform → gate application → selection rules → summary.

pub mod data;
pub mod error;
pub mod gate;
pub mod rule;
pub mod session;
pub mod summary;
pub mod transform;

pub use data::store::{TableStore, DEFAULT_TABLE};
pub use data::table::{Column, Table};
pub use error::{Error, Result};
pub use gate::{apply::apply_gate, EllipseGate, Gate, PolygonGate};
pub use rule::SelectionRules;
pub use session::Session;
pub use summary::{write_summaries, SampleSummary};
pub use transform::{log10_columns, CHANNEL_PATTERN};
