//! Parallel Coordinates
//!
//! One axis per selected column, one line per trial, colored by a
//! chosen metric. Used to eyeball which configuration dimensions move
//! with the target.

use crate::spec::{ChartSpec, Dimension, ParallelPlot};
use crate::ChartError;
use trialscope_frame::ResultsFrame;

/// Build a parallel-coordinates plot over `columns`, coloring lines by
/// `color_metric`.
///
/// Every selected column and the color metric must exist; non-numeric
/// cells become gaps rather than dropping the trial, so all dimensions
/// stay row-aligned.
pub fn parallel_coordinates(
    frame: &ResultsFrame,
    columns: &[String],
    color_metric: &str,
) -> Result<ChartSpec, ChartError> {
    if columns.is_empty() {
        return Err(ChartError::NoColumnsSelected {
            chart: "parallel coordinates".to_string(),
        });
    }

    let mut dimensions = Vec::with_capacity(columns.len());
    for name in columns {
        dimensions.push(Dimension {
            name: name.clone(),
            values: frame.numeric(name)?,
        });
    }

    let color_values = frame.numeric(color_metric)?;
    if color_values.iter().all(Option::is_none) {
        return Err(ChartError::NoNumericData {
            what: format!("color metric {color_metric}"),
        });
    }

    Ok(ChartSpec::Parallel(ParallelPlot {
        title: format!("Parallel Coordinates colored by {color_metric}"),
        dimensions,
        color_metric: color_metric.to_string(),
        color_values,
    }))
}
