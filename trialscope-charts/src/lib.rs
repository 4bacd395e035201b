#![warn(missing_docs)]
//! Trialscope Charts - Visualization and Reporting
//!
//! Pure functions mapping a results frame plus column selections to
//! serializable chart specifications, and the dashboard report model
//! that collects them:
//! - Failure metrics (status pie, stacked counts, failure rate)
//! - Distribution views (box/whisker, violin, KDE overlay)
//! - Correlation heatmaps (config vs result columns)
//! - Trial and multi-experiment comparisons
//! - Parallel coordinates
//!
//! No chart is rasterized here; the specs are embedded as JSON into the
//! dashboard outputs (JSON and single-file HTML).

mod correlation;
mod distribution;
mod experiments;
mod failure;
mod html;
mod json;
mod parallel;
mod report;
mod spec;
mod trials;

pub use correlation::{config_result_heatmap, target_correlation_row};
pub use distribution::{
    compare_config_boxes, compare_config_violins, density_overlay, whisker_top_bottom,
};
pub use experiments::compare_experiments;
pub use failure::{failure_rate_by_config, status_distribution, success_failure_by_config};
pub use html::generate_html_report;
pub use json::generate_json_report;
pub use parallel::parallel_coordinates;
pub use report::{
    DashboardReport, OutputFormat, Panel, PanelBody, ReportMeta, ReportSummary, TableSpec,
};
pub use spec::{
    BarChart, BarSeries, BoxGroup, BoxPlot, ChartSpec, Dimension, Heatmap, ParallelPlot, PieChart,
    XyChart, XyKind, XySeries,
};
pub use trials::{top_bottom_trials, trial_scatter};

/// Errors from chart construction
#[derive(Debug, Clone, thiserror::Error)]
pub enum ChartError {
    /// A required column is absent
    #[error(transparent)]
    Frame(#[from] trialscope_frame::FrameError),

    /// The statistical layer rejected the request
    #[error(transparent)]
    Stats(#[from] trialscope_stats::StatsError),

    /// A selection produced no numeric data to plot
    #[error("no numeric data for {what}")]
    NoNumericData {
        /// Description of the empty selection
        what: String,
    },

    /// The caller selected no columns for a multi-column chart
    #[error("no columns selected for {chart}")]
    NoColumnsSelected {
        /// Chart that needed a selection
        chart: String,
    },
}
