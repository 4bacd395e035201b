//! Failure Metrics
//!
//! Status-based panels: overall success/failure distribution, per-config
//! success/failure counts, and per-config failure rate.

use crate::spec::{BarChart, BarSeries, ChartSpec, PieChart};
use crate::ChartError;
use trialscope_frame::{well_known, ResultsFrame};

/// Pie chart of the overall status distribution
pub fn status_distribution(frame: &ResultsFrame) -> Result<ChartSpec, ChartError> {
    let counts = frame.value_counts(well_known::STATUS)?;
    if counts.is_empty() {
        return Err(ChartError::NoNumericData {
            what: "status column".to_string(),
        });
    }

    Ok(ChartSpec::Pie(PieChart {
        title: "Overall Success/Failure Distribution".to_string(),
        labels: counts.iter().map(|(k, _)| k.to_string()).collect(),
        values: counts.iter().map(|(_, n)| *n as f64).collect(),
    }))
}

/// Stacked bar chart of success/failure counts per configuration
pub fn success_failure_by_config(frame: &ResultsFrame) -> Result<ChartSpec, ChartError> {
    let configs = frame.group_keys(well_known::TUNABLE_CONFIG_ID)?;
    let statuses = frame.value_counts(well_known::STATUS)?;
    let status_col = frame.require(well_known::STATUS)?;
    let config_col = frame.require(well_known::TUNABLE_CONFIG_ID)?;

    let mut series: Vec<BarSeries> = statuses
        .iter()
        .map(|(status, _)| BarSeries {
            name: status.to_string(),
            values: vec![0.0; configs.len()],
        })
        .collect();

    for row in 0..frame.rows() {
        let (Some(config), Some(status)) = (config_col.key_at(row), status_col.key_at(row)) else {
            continue;
        };
        let ci = configs.iter().position(|k| *k == config);
        let si = statuses.iter().position(|(k, _)| *k == status);
        if let (Some(ci), Some(si)) = (ci, si) {
            series[si].values[ci] += 1.0;
        }
    }

    Ok(ChartSpec::Bar(BarChart {
        title: "Success/Failure Count by Configuration".to_string(),
        x_label: "Configuration ID".to_string(),
        y_label: "Count".to_string(),
        categories: configs.iter().map(|k| k.to_string()).collect(),
        series,
        stacked: true,
    }))
}

/// Bar chart of the `FAILED` fraction per configuration
pub fn failure_rate_by_config(frame: &ResultsFrame) -> Result<ChartSpec, ChartError> {
    let configs = frame.group_keys(well_known::TUNABLE_CONFIG_ID)?;
    let status_col = frame.require(well_known::STATUS)?;
    let config_col = frame.require(well_known::TUNABLE_CONFIG_ID)?;

    let mut totals = vec![0usize; configs.len()];
    let mut failed = vec![0usize; configs.len()];

    for row in 0..frame.rows() {
        let Some(config) = config_col.key_at(row) else {
            continue;
        };
        let Some(idx) = configs.iter().position(|k| *k == config) else {
            continue;
        };
        totals[idx] += 1;
        let is_failed = status_col
            .key_at(row)
            .map(|s| s.to_string() == well_known::STATUS_FAILED)
            .unwrap_or(false);
        if is_failed {
            failed[idx] += 1;
        }
    }

    let rates: Vec<f64> = totals
        .iter()
        .zip(&failed)
        .map(|(&t, &f)| if t > 0 { f as f64 / t as f64 } else { 0.0 })
        .collect();

    Ok(ChartSpec::Bar(BarChart {
        title: "Failure Rate by Configuration".to_string(),
        x_label: "Configuration ID".to_string(),
        y_label: "Failure Rate".to_string(),
        categories: configs.iter().map(|k| k.to_string()).collect(),
        series: vec![BarSeries {
            name: "failure_rate".to_string(),
            values: rates,
        }],
        stacked: false,
    }))
}
