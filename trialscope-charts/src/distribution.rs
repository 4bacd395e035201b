//! Distribution Views
//!
//! Box/whisker plots of top and bottom configurations, side-by-side
//! configuration comparisons, and the KDE overlay.

use crate::spec::{BoxGroup, BoxPlot, ChartSpec, XyChart, XyKind, XySeries};
use crate::ChartError;
use trialscope_frame::{well_known, Key, ResultsFrame};
use trialscope_stats::{compare_densities, compute_summary};

/// Whisker plots of the top-N and bottom-N configurations ranked by the
/// mean of `target_col`. Configurations without any valid observation
/// are excluded from the ranking.
pub fn whisker_top_bottom(
    frame: &ResultsFrame,
    target_col: &str,
    n: usize,
) -> Result<(ChartSpec, ChartSpec), ChartError> {
    let groups = frame.grouped_numeric(well_known::TUNABLE_CONFIG_ID, target_col)?;

    let mut ranked: Vec<(&Key, &Vec<f64>, f64)> = groups
        .iter()
        .filter(|(_, vals)| !vals.is_empty())
        .map(|(key, vals)| {
            let mean = vals.iter().sum::<f64>() / vals.len() as f64;
            (key, vals, mean)
        })
        .collect();

    if ranked.is_empty() {
        return Err(ChartError::NoNumericData {
            what: format!("column '{target_col}'"),
        });
    }

    ranked.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));

    let build = |slice: &[(&Key, &Vec<f64>, f64)], which: &str| {
        ChartSpec::Box(BoxPlot {
            title: format!("Whisker Plot for {which} {} Configurations by {target_col}", slice.len()),
            x_label: "Configuration ID".to_string(),
            y_label: target_col.to_string(),
            groups: slice
                .iter()
                .map(|(key, vals, _)| BoxGroup {
                    label: key.to_string(),
                    samples: (*vals).clone(),
                    summary: compute_summary(vals),
                })
                .collect(),
            violin: false,
        })
    };

    let top: Vec<_> = ranked.iter().take(n).cloned().collect();
    let mut bottom: Vec<_> = ranked.iter().rev().take(n).cloned().collect();
    // Bottom plot lists worst-first
    bottom.sort_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal));

    Ok((build(&top, "Top"), build(&bottom, "Bottom")))
}

/// Side-by-side box plot of two configurations over `target_col`
pub fn compare_config_boxes(
    frame: &ResultsFrame,
    target_col: &str,
    config_a: &Key,
    config_b: &Key,
) -> Result<ChartSpec, ChartError> {
    build_pair_plot(frame, target_col, config_a, config_b, false)
}

/// Side-by-side violin plot of two configurations over `target_col`
pub fn compare_config_violins(
    frame: &ResultsFrame,
    target_col: &str,
    config_a: &Key,
    config_b: &Key,
) -> Result<ChartSpec, ChartError> {
    build_pair_plot(frame, target_col, config_a, config_b, true)
}

fn build_pair_plot(
    frame: &ResultsFrame,
    target_col: &str,
    config_a: &Key,
    config_b: &Key,
    violin: bool,
) -> Result<ChartSpec, ChartError> {
    let mut groups = Vec::new();
    for key in [config_a, config_b] {
        let samples = frame.values_for_group(well_known::TUNABLE_CONFIG_ID, target_col, key)?;
        if samples.is_empty() {
            return Err(ChartError::NoNumericData {
                what: format!("configuration {key} in '{target_col}'"),
            });
        }
        groups.push(BoxGroup {
            label: key.to_string(),
            summary: compute_summary(&samples),
            samples,
        });
    }

    let shape = if violin { "Violin" } else { "Whisker" };
    Ok(ChartSpec::Box(BoxPlot {
        title: format!("{shape} Plot for Configurations {config_a} and {config_b} by {target_col}"),
        x_label: "Configuration ID".to_string(),
        y_label: target_col.to_string(),
        groups,
        violin,
    }))
}

/// KDE overlay of two configurations' value distributions.
///
/// Delegates the estimation to the stats layer; an empty group surfaces
/// as [`ChartError::Stats`] with the missing-group message.
pub fn density_overlay(
    frame: &ResultsFrame,
    target_col: &str,
    config_a: &Key,
    config_b: &Key,
) -> Result<ChartSpec, ChartError> {
    let cmp = compare_densities(frame, target_col, config_a, config_b)?;

    Ok(ChartSpec::Xy(XyChart {
        title: format!("Score Distribution for Configurations {config_a} and {config_b}"),
        x_label: cmp.target.clone(),
        y_label: "Density".to_string(),
        mode: XyKind::Line,
        series: cmp
            .series
            .into_iter()
            .map(|s| XySeries {
                name: s.name,
                x: cmp.grid.clone(),
                y: s.density,
            })
            .collect(),
    }))
}
