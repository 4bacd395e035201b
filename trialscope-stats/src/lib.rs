#![warn(missing_docs)]
//! Trialscope Statistical Engine
//!
//! Provides the analytics behind the dashboard panels:
//! - Pairwise significance testing between configuration groups
//!   (Welch's t-test, two-sided Mann-Whitney U)
//! - Gaussian kernel density estimation for distribution overlays
//! - Summary statistics and percentiles for per-group descriptions
//! - Pearson correlation for the config/result heatmaps
//!
//! Everything here is deterministic and closed-form; there is no
//! resampling and no shared state.

mod correlation;
mod kde;
mod mannwhitney;
mod pairwise;
mod percentiles;
mod special;
mod summary;
mod welch;

pub use correlation::pearson;
pub use kde::{compare_densities, DensityComparison, DensitySeries, GaussianKde};
pub use mannwhitney::mann_whitney_u;
pub use pairwise::{run_pairwise_tests, PairwiseComparison, PairwiseConfig, TestKind};
pub use percentiles::compute_percentile;
pub use summary::{compute_summary, SummaryStatistics};
pub use welch::welch_t_test;

use trialscope_frame::Key;

/// Default significance level
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Lowest accepted significance level
pub const ALPHA_MIN: f64 = 0.001;

/// Highest accepted significance level
pub const ALPHA_MAX: f64 = 0.1;

/// Number of evaluation points of the shared KDE grid
pub const KDE_GRID_POINTS: usize = 500;

/// Errors from the statistical routines
#[derive(Debug, Clone, thiserror::Error)]
pub enum StatsError {
    /// The target or grouping column is absent from the frame
    #[error(transparent)]
    Frame(#[from] trialscope_frame::FrameError),

    /// A selected group has no valid numeric observations
    #[error("configuration '{group}' has no valid data for column '{column}'")]
    EmptyGroup {
        /// Group key with no data
        group: Key,
        /// Target column being analyzed
        column: String,
    },

    /// Significance level outside the accepted range
    #[error("alpha {0} outside accepted range {ALPHA_MIN}..={ALPHA_MAX}")]
    AlphaOutOfRange(f64),

    /// Unknown test name in a selector
    #[error("unknown test type: {0} (expected 'ttest' or 'mannwhitney')")]
    UnknownTest(String),
}
