//! Dashboard Panel Assembly
//!
//! Builds the full dashboard report for one experiment. Every panel is
//! built independently; a failing builder turns into a failed panel and
//! the rest of the report is unaffected.

use regex::Regex;
use trialscope_charts::{
    config_result_heatmap, density_overlay, failure_rate_by_config, parallel_coordinates,
    status_distribution, success_failure_by_config, target_correlation_row, top_bottom_trials,
    trial_scatter, whisker_top_bottom, ChartError, DashboardReport, PanelBody, ReportMeta,
    TableSpec,
};
use trialscope_charts::{compare_config_boxes, compare_config_violins};
use trialscope_frame::{Key, ResultsFrame};
use trialscope_stats::{
    compute_summary, run_pairwise_tests, PairwiseComparison, PairwiseConfig,
};

/// Selections driving the report, resolved from config and CLI flags
pub struct ReportOptions {
    /// Regex selecting the target metric among `result.*` columns
    pub metric: Regex,
    /// Group count in top/bottom ranked charts
    pub top_n: usize,
    /// Optional configuration pair for the head-to-head panels
    pub configs: Option<(Key, Key)>,
    /// Pairwise test configuration
    pub pairwise: PairwiseConfig,
    /// Grouping column for pairwise tests and summaries
    pub group_col: String,
}

/// Interpret a CLI-provided group id: integers become integer keys,
/// everything else a text key.
pub fn parse_key(s: &str) -> Key {
    match s.parse::<i64>() {
        Ok(n) => Key::Int(n),
        Err(_) => Key::from(s),
    }
}

/// First `result.*` column matching the metric selector.
pub fn select_metric(frame: &ResultsFrame, metric: &Regex) -> Option<String> {
    frame
        .result_columns()
        .into_iter()
        .find(|name| metric.is_match(name))
        .map(str::to_string)
}

/// Assemble the full dashboard for one experiment.
pub fn build_dashboard(
    frame: &ResultsFrame,
    experiment_id: &str,
    opts: &ReportOptions,
) -> DashboardReport {
    let metric = select_metric(frame, &opts.metric);
    let mut report =
        DashboardReport::new(ReportMeta::now(experiment_id, metric.as_deref()));

    report.push_chart("Status Distribution", status_distribution(frame));
    report.push_chart(
        "Success and Failure Counts by Configuration",
        success_failure_by_config(frame),
    );
    report.push_chart("Failure Rate by Configuration", failure_rate_by_config(frame));
    report.push_chart("Config/Result Correlation", config_result_heatmap(frame));

    let Some(metric) = metric else {
        report.push_panel(
            "Metric Panels",
            PanelBody::Failed {
                message: format!(
                    "no result column matches metric selector '{}'",
                    opts.metric
                ),
            },
        );
        return report;
    };

    match whisker_top_bottom(frame, &metric, opts.top_n) {
        Ok((top, bottom)) => {
            let title = top.title().to_string();
            report.push_panel(title, PanelBody::Chart(top));
            let title = bottom.title().to_string();
            report.push_panel(title, PanelBody::Chart(bottom));
        }
        Err(e) => report.push_panel(
            format!("Top/Bottom Configurations by {metric}"),
            PanelBody::Failed {
                message: e.to_string(),
            },
        ),
    }

    report.push_chart(
        format!("Trials over Time ({metric})"),
        trial_scatter(frame, &metric),
    );
    report.push_chart(
        format!("Top and Bottom Trials by {metric}"),
        top_bottom_trials(frame, &metric, opts.top_n),
    );
    report.push_chart(
        format!("Correlation with {metric}"),
        target_correlation_row(frame, &metric),
    );

    let parallel_cols: Vec<String> = frame
        .config_columns()
        .into_iter()
        .map(str::to_string)
        .collect();
    report.push_chart(
        "Parallel Coordinates",
        parallel_coordinates(frame, &parallel_cols, &metric),
    );

    if let Some((a, b)) = &opts.configs {
        report.push_chart(
            format!("Box Plot: Config {a} vs Config {b}"),
            compare_config_boxes(frame, &metric, a, b),
        );
        report.push_chart(
            format!("Violin Plot: Config {a} vs Config {b}"),
            compare_config_violins(frame, &metric, a, b),
        );
        report.push_chart(
            format!("Density Overlay: Config {a} vs Config {b}"),
            density_overlay(frame, &metric, a, b),
        );
    }

    match run_pairwise_tests(frame, &metric, &opts.group_col, &opts.pairwise) {
        Ok(comparisons) => report.push_panel(
            format!("Pairwise Significance ({})", opts.pairwise.test),
            PanelBody::Table(pairwise_table(&comparisons)),
        ),
        Err(e) => report.push_panel(
            "Pairwise Significance",
            PanelBody::Failed {
                message: e.to_string(),
            },
        ),
    }

    match summary_table(frame, &metric, &opts.group_col) {
        Ok(table) => report.push_panel(
            format!("Summary Statistics of {metric}"),
            PanelBody::Table(table),
        ),
        Err(e) => report.push_panel(
            format!("Summary Statistics of {metric}"),
            PanelBody::Failed {
                message: e.to_string(),
            },
        ),
    }

    report
}

/// Pairwise test results as a display table.
pub fn pairwise_table(comparisons: &[PairwiseComparison]) -> TableSpec {
    TableSpec {
        columns: vec![
            "Config A".to_string(),
            "Config B".to_string(),
            "N A".to_string(),
            "N B".to_string(),
            "Statistic".to_string(),
            "p-value".to_string(),
            "Significant".to_string(),
        ],
        rows: comparisons
            .iter()
            .map(|c| {
                vec![
                    c.config_a.to_string(),
                    c.config_b.to_string(),
                    c.n_a.to_string(),
                    c.n_b.to_string(),
                    format!("{:.4}", c.statistic),
                    format!("{:.4}", c.p_value),
                    if c.significant { "yes" } else { "no" }.to_string(),
                ]
            })
            .collect(),
    }
}

/// Per-group descriptive statistics of the target metric.
pub fn summary_table(
    frame: &ResultsFrame,
    metric: &str,
    group_col: &str,
) -> Result<TableSpec, ChartError> {
    let groups = frame.grouped_numeric(group_col, metric)?;
    let rows = groups
        .iter()
        .map(|(key, samples)| {
            let s = compute_summary(samples);
            vec![
                key.to_string(),
                s.count.to_string(),
                format!("{:.4}", s.mean),
                format!("{:.4}", s.median),
                format!("{:.4}", s.std_dev),
                format!("{:.4}", s.min),
                format!("{:.4}", s.max),
            ]
        })
        .collect();
    Ok(TableSpec {
        columns: vec![
            "Config".to_string(),
            "Count".to_string(),
            "Mean".to_string(),
            "Median".to_string(),
            "Std Dev".to_string(),
            "Min".to_string(),
            "Max".to_string(),
        ],
        rows,
    })
}
