//! Multi-Experiment Comparison
//!
//! Scatter, line, box, and violin views of one target column across
//! several experiments' result frames.

use crate::spec::{BoxGroup, BoxPlot, ChartSpec, XyChart, XyKind, XySeries};
use crate::ChartError;
use trialscope_frame::{well_known, ResultsFrame};
use trialscope_stats::compute_summary;

/// Compare `target_col` across experiments.
///
/// Produces four charts in order: per-trial scatter, per-trial line,
/// per-experiment box plot, per-experiment violin plot. Every
/// experiment must carry the target column; experiments whose column
/// has no valid data still appear in the traces (empty) so their
/// absence is visible rather than silent.
pub fn compare_experiments(
    experiments: &[(String, &ResultsFrame)],
    target_col: &str,
) -> Result<Vec<ChartSpec>, ChartError> {
    if experiments.is_empty() {
        return Err(ChartError::NoColumnsSelected {
            chart: "experiment comparison (no experiments selected)".to_string(),
        });
    }

    let mut xy_series = Vec::new();
    let mut box_groups = Vec::new();

    for (id, frame) in experiments {
        let trials = frame.numeric(well_known::TRIAL_ID)?;
        let values = frame.numeric(target_col)?;

        let points: Vec<(f64, f64)> = trials
            .iter()
            .zip(&values)
            .filter_map(|(t, v)| match (t, v) {
                (Some(t), Some(v)) => Some((*t, *v)),
                _ => None,
            })
            .collect();

        xy_series.push(XySeries {
            name: format!("Experiment {id}"),
            x: points.iter().map(|(t, _)| *t).collect(),
            y: points.iter().map(|(_, v)| *v).collect(),
        });

        let samples: Vec<f64> = values.into_iter().flatten().collect();
        box_groups.push(BoxGroup {
            label: id.clone(),
            summary: compute_summary(&samples),
            samples,
        });
    }

    let xy = |mode: XyKind, what: &str| {
        ChartSpec::Xy(XyChart {
            title: format!("{what} Comparison of {target_col} across Experiments"),
            x_label: "Trial ID".to_string(),
            y_label: target_col.to_string(),
            mode,
            series: xy_series.clone(),
        })
    };
    let boxes = |violin: bool, what: &str| {
        ChartSpec::Box(BoxPlot {
            title: format!("{what} Comparison of {target_col} across Experiments"),
            x_label: "Experiment ID".to_string(),
            y_label: target_col.to_string(),
            groups: box_groups.clone(),
            violin,
        })
    };

    Ok(vec![
        xy(XyKind::Scatter, "Scatter Plot"),
        xy(XyKind::LineMarkers, "Line Plot"),
        boxes(false, "Box Plot"),
        boxes(true, "Violin Plot"),
    ])
}
