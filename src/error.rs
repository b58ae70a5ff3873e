use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// All failures the gating engine can surface.
///
/// Every variant is fatal to the calling operation: nothing here is transient,
/// so there is no retry and no partial-result recovery.
#[derive(Debug, Error)]
pub enum Error {
    /// A named table is absent from the store.
    #[error("table not found: '{0}'")]
    TableNotFound(String),

    /// A named column is absent from the table under evaluation.
    #[error("column not found: '{0}'")]
    ColumnNotFound(String),

    /// A named selection rule was never registered.
    #[error("subset rule not found: '{0}'")]
    RuleNotFound(String),

    /// Malformed gate definition (non-positive dimensions, degenerate polygon).
    #[error("invalid gate: {0}")]
    InvalidGate(String),

    /// A column exists but has the wrong type for the requested access.
    #[error("column '{column}' is not {expected}")]
    ColumnType {
        column: String,
        expected: &'static str,
    },

    /// A column being inserted does not match the table's row count.
    #[error("column '{column}' has {actual} rows, table has {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Cross-table gate write where the destination row count differs.
    #[error("row count mismatch: source table has {src} rows, destination has {dest}")]
    RowCountMismatch { src: usize, dest: usize },

    /// A row mask whose length differs from the table it filters.
    #[error("mask has {mask} entries, table has {rows} rows")]
    MaskLength { mask: usize, rows: usize },

    /// Rule text that does not lex/parse as a boolean expression.
    #[error("rule syntax error at offset {offset}: {message}")]
    RuleSyntax { offset: usize, message: String },

    /// Rule that parsed but combines operands of the wrong types.
    #[error("rule type error: {0}")]
    RuleType(String),

    /// A CSV cell that could not be interpreted as event data.
    #[error("row {row}, column '{column}': '{value}' is not numeric or boolean")]
    NonNumericValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
