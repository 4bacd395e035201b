#![warn(missing_docs)]
//! # Trialscope
//!
//! Analytics and dashboard toolkit for benchmarking-experiment results.
//!
//! Trialscope reads trial results produced by an autotuning/benchmarking
//! system and turns them into statistics and dashboards:
//! - **Results frame**: column-oriented table of trials with lossy
//!   numeric coercion and `config.*` / `result.*` column conventions
//! - **Pairwise significance**: Welch's t-test and Mann-Whitney U
//!   between every pair of tunable configurations
//! - **Distribution views**: gaussian KDE overlays, box/violin plots
//! - **Chart specs**: serializable chart descriptions, no rasterization
//! - **Dashboard reports**: JSON and single-file HTML with
//!   independently degrading panels
//! - **Storage adapters**: local SQLite store or remote HTTP backend
//!
//! ## Quick Start
//!
//! ```ignore
//! use trialscope::prelude::*;
//!
//! let store = ResultsStore::open(Path::new("trialscope.db"))?;
//! let frame = store.results_frame("my-experiment")?;
//! let tests = run_pairwise_tests(
//!     &frame,
//!     "result.latency",
//!     well_known::TUNABLE_CONFIG_ID,
//!     &PairwiseConfig::default(),
//! )?;
//! ```
//!
//! The `trialscope` binary (from `trialscope-cli`) wraps all of this in
//! `list` / `report` / `stats` / `compare` / `explain` subcommands.

// Re-export frame types
pub use trialscope_frame::{well_known, Column, FrameError, Key, ResultsFrame};

// Re-export stats
pub use trialscope_stats::{
    compare_densities, compute_percentile, compute_summary, mann_whitney_u, pearson,
    run_pairwise_tests, welch_t_test, DensityComparison, GaussianKde, PairwiseComparison,
    PairwiseConfig, StatsError, SummaryStatistics, TestKind, DEFAULT_ALPHA, KDE_GRID_POINTS,
};

// Re-export chart and report types
pub use trialscope_charts::{
    compare_experiments, config_result_heatmap, density_overlay, failure_rate_by_config,
    generate_html_report, generate_json_report, parallel_coordinates, status_distribution,
    success_failure_by_config, target_correlation_row, top_bottom_trials, trial_scatter,
    whisker_top_bottom, ChartError, ChartSpec, DashboardReport, OutputFormat, Panel, PanelBody,
    ReportMeta, TableSpec,
};

// Re-export storage adapters
pub use trialscope_storage::{BackendClient, ExperimentSource, ResultsStore, StorageError};

// Re-export the CLI surface
pub use trialscope_cli::{build_dashboard, run, ReportOptions, TrialscopeConfig};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        run_pairwise_tests, well_known, Column, DashboardReport, ExperimentSource, Key,
        PairwiseConfig, ResultsFrame, ResultsStore, TestKind,
    };
}
