//! Correlation Panels
//!
//! Pearson correlation between configuration parameters and result
//! metrics, rendered as heatmaps.

use crate::spec::{ChartSpec, Heatmap};
use crate::ChartError;
use trialscope_frame::ResultsFrame;
use trialscope_stats::pearson;

/// Heatmap of correlations between every `config*` column (rows) and
/// every `result*` column (columns).
///
/// Cells without a computable correlation (constant or mostly-missing
/// columns) are `None`.
pub fn config_result_heatmap(frame: &ResultsFrame) -> Result<ChartSpec, ChartError> {
    let config_cols = frame.config_columns();
    let result_cols = frame.result_columns();
    if config_cols.is_empty() {
        return Err(ChartError::NoColumnsSelected {
            chart: "correlation heatmap (no config columns)".to_string(),
        });
    }
    if result_cols.is_empty() {
        return Err(ChartError::NoColumnsSelected {
            chart: "correlation heatmap (no result columns)".to_string(),
        });
    }

    let config_views: Vec<Vec<Option<f64>>> = config_cols
        .iter()
        .map(|c| frame.numeric(c))
        .collect::<Result<_, _>>()?;
    let result_views: Vec<Vec<Option<f64>>> = result_cols
        .iter()
        .map(|c| frame.numeric(c))
        .collect::<Result<_, _>>()?;

    let values: Vec<Vec<Option<f64>>> = config_views
        .iter()
        .map(|cfg| result_views.iter().map(|res| pearson(cfg, res)).collect())
        .collect();

    Ok(ChartSpec::Heatmap(Heatmap {
        title: "Heatmap of Configuration Parameters vs Performance Metrics".to_string(),
        x_label: "Performance Metrics".to_string(),
        y_label: "Configuration Parameters".to_string(),
        rows: config_cols.iter().map(|s| s.to_string()).collect(),
        columns: result_cols.iter().map(|s| s.to_string()).collect(),
        values,
    }))
}

/// Single-row heatmap of each config column's correlation with one
/// target column, sorted descending by correlation.
pub fn target_correlation_row(
    frame: &ResultsFrame,
    target_col: &str,
) -> Result<ChartSpec, ChartError> {
    let config_cols = frame.config_columns();
    if config_cols.is_empty() {
        return Err(ChartError::NoColumnsSelected {
            chart: "target correlation (no config columns)".to_string(),
        });
    }

    let target = frame.numeric(target_col)?;
    let mut entries: Vec<(String, Option<f64>)> = Vec::new();
    for col in config_cols {
        let view = frame.numeric(col)?;
        entries.push((col.to_string(), pearson(&view, &target)));
    }

    // Descending; incomputable correlations sort last
    entries.sort_by(|a, b| match (a.1, b.1) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    Ok(ChartSpec::Heatmap(Heatmap {
        title: format!("Correlation Heatmap with {target_col}"),
        x_label: "Config Columns".to_string(),
        y_label: "Correlation".to_string(),
        rows: vec!["Correlation".to_string()],
        columns: entries.iter().map(|(name, _)| name.clone()).collect(),
        values: vec![entries.iter().map(|(_, r)| *r).collect()],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use trialscope_frame::Column;

    fn correlated_frame() -> ResultsFrame {
        let mut f = ResultsFrame::new();
        let xs: Vec<Option<f64>> = (0..10).map(|i| Some(i as f64)).collect();
        f.push_column("config.threads", Column::Float(xs.clone())).unwrap();
        // Perfectly anticorrelated with config.threads
        f.push_column(
            "config.cache_mb",
            Column::Float(xs.iter().map(|v| v.map(|x| -x)).collect()),
        )
        .unwrap();
        // result.throughput = 3*threads + 1
        f.push_column(
            "result.throughput",
            Column::Float(xs.iter().map(|v| v.map(|x| 3.0 * x + 1.0)).collect()),
        )
        .unwrap();
        f
    }

    #[test]
    fn test_heatmap_dimensions() {
        let chart = config_result_heatmap(&correlated_frame()).unwrap();
        let ChartSpec::Heatmap(hm) = chart else {
            panic!("expected heatmap");
        };
        assert_eq!(hm.rows, vec!["config.threads", "config.cache_mb"]);
        assert_eq!(hm.columns, vec!["result.throughput"]);
        assert!((hm.values[0][0].unwrap() - 1.0).abs() < 1e-12);
        assert!((hm.values[1][0].unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_target_row_sorted_descending() {
        let chart = target_correlation_row(&correlated_frame(), "result.throughput").unwrap();
        let ChartSpec::Heatmap(hm) = chart else {
            panic!("expected heatmap");
        };
        assert_eq!(hm.columns, vec!["config.threads", "config.cache_mb"]);
        assert!(hm.values[0][0].unwrap() > hm.values[0][1].unwrap());
    }

    #[test]
    fn test_no_config_columns() {
        let mut f = ResultsFrame::new();
        f.push_column("result.x", Column::Float(vec![Some(1.0), Some(2.0)]))
            .unwrap();
        assert!(matches!(
            config_result_heatmap(&f),
            Err(ChartError::NoColumnsSelected { .. })
        ));
    }
}
