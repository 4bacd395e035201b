#![warn(missing_docs)]
//! Trialscope Frame - Trial Results Table
//!
//! Column-oriented table model for experiment trial results:
//! - Typed columns (float / int / text) with per-cell missing values
//! - Lossy numeric coercion (non-parseable and non-finite entries drop out)
//! - Grouping by configuration id with stable first-appearance ordering
//! - Column classification by the `config.*` / `result.*` naming convention

mod column;
mod frame;

pub use column::{Column, Key};
pub use frame::ResultsFrame;

/// Well-known column names shared by every trial-results table.
///
/// These must match the columns emitted by the benchmarking system's
/// storage layer; the frame itself treats them as ordinary columns.
pub mod well_known {
    /// Unique trial identifier within one experiment
    pub const TRIAL_ID: &str = "trial_id";
    /// Groups trials sharing a tunable configuration
    pub const TUNABLE_CONFIG_ID: &str = "tunable_config_id";
    /// Trial outcome, e.g. SUCCEEDED / FAILED
    pub const STATUS: &str = "status";
    /// Status value marking a failed trial
    pub const STATUS_FAILED: &str = "FAILED";
    /// Prefix of configuration-parameter columns
    pub const CONFIG_PREFIX: &str = "config";
    /// Prefix of result-metric columns
    pub const RESULT_PREFIX: &str = "result";
}

/// Errors produced by frame construction and column access
#[derive(Debug, Clone, thiserror::Error)]
pub enum FrameError {
    /// A requested column does not exist in the frame
    #[error("column '{name}' not found in results table")]
    MissingColumn {
        /// The missing column name
        name: String,
    },

    /// A column being added does not match the frame's row count
    #[error("column '{name}' has {got} rows, frame has {expected}")]
    LengthMismatch {
        /// Offending column name
        name: String,
        /// Row count of the frame
        expected: usize,
        /// Row count of the new column
        got: usize,
    },

    /// A column with this name already exists
    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),
}
