//! Trial-Level Views
//!
//! Per-trial scatter of a metric and the top/bottom-N trial traces.

use crate::spec::{ChartSpec, XyChart, XyKind, XySeries};
use crate::ChartError;
use trialscope_frame::{well_known, ResultsFrame};

/// Scatter of `target_col` against trial id, sorted by trial id
pub fn trial_scatter(frame: &ResultsFrame, target_col: &str) -> Result<ChartSpec, ChartError> {
    let points = trial_points(frame, target_col)?;

    Ok(ChartSpec::Xy(XyChart {
        title: format!("Scatter Plot of trial_id vs {target_col}"),
        x_label: "Trial ID".to_string(),
        y_label: target_col.to_string(),
        mode: XyKind::Scatter,
        series: vec![XySeries {
            name: target_col.to_string(),
            x: points.iter().map(|(t, _)| *t).collect(),
            y: points.iter().map(|(_, v)| *v).collect(),
        }],
    }))
}

/// Line traces of the N best and N worst trials by `target_col`
pub fn top_bottom_trials(
    frame: &ResultsFrame,
    target_col: &str,
    n: usize,
) -> Result<ChartSpec, ChartError> {
    let mut points = trial_points(frame, target_col)?;
    points.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let top: Vec<(f64, f64)> = points.iter().take(n).cloned().collect();
    let bottom: Vec<(f64, f64)> = points.iter().rev().take(n).cloned().collect();

    Ok(ChartSpec::Xy(XyChart {
        title: format!("Top {n} and Bottom {n} Trials by {target_col}"),
        x_label: "Trial ID".to_string(),
        y_label: target_col.to_string(),
        mode: XyKind::LineMarkers,
        series: vec![
            XySeries {
                name: format!("Top {n} Trials"),
                x: top.iter().map(|(t, _)| *t).collect(),
                y: top.iter().map(|(_, v)| *v).collect(),
            },
            XySeries {
                name: format!("Bottom {n} Trials"),
                x: bottom.iter().map(|(t, _)| *t).collect(),
                y: bottom.iter().map(|(_, v)| *v).collect(),
            },
        ],
    }))
}

/// (trial_id, value) pairs where both cells are valid, sorted by trial id
fn trial_points(frame: &ResultsFrame, target_col: &str) -> Result<Vec<(f64, f64)>, ChartError> {
    let trials = frame.numeric(well_known::TRIAL_ID)?;
    let values = frame.numeric(target_col)?;

    let mut points: Vec<(f64, f64)> = trials
        .iter()
        .zip(&values)
        .filter_map(|(t, v)| match (t, v) {
            (Some(t), Some(v)) => Some((*t, *v)),
            _ => None,
        })
        .collect();

    if points.is_empty() {
        return Err(ChartError::NoNumericData {
            what: format!("column '{target_col}' against trial_id"),
        });
    }

    points.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    Ok(points)
}
