//! Kernel Density Estimation
//!
//! Gaussian KDE with Scott's-rule bandwidth, used by the distribution
//! overlay panel to compare two configurations visually.

use crate::{StatsError, KDE_GRID_POINTS};
use serde::{Deserialize, Serialize};
use trialscope_frame::{well_known, Key, ResultsFrame};

/// Gaussian kernel density estimator over a fixed sample
#[derive(Debug, Clone)]
pub struct GaussianKde {
    samples: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Fit a KDE to the samples. Requires at least one observation.
    ///
    /// Bandwidth is Scott's rule, `sigma * n^(-1/5)`, with a small floor
    /// so zero-variance samples still render as a narrow spike.
    pub fn fit(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        let sigma = variance.sqrt();

        let scale = if sigma > 0.0 { sigma } else { mean.abs().max(1.0) * 1e-3 };
        let bandwidth = scale * n.powf(-0.2);

        Some(Self {
            samples: samples.to_vec(),
            bandwidth,
        })
    }

    /// Bandwidth in use
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Density estimate at a single point
    pub fn density(&self, x: f64) -> f64 {
        let n = self.samples.len() as f64;
        let h = self.bandwidth;
        let norm = 1.0 / (n * h * (2.0 * std::f64::consts::PI).sqrt());
        self.samples
            .iter()
            .map(|&s| {
                let u = (x - s) / h;
                (-0.5 * u * u).exp()
            })
            .sum::<f64>()
            * norm
    }

    /// Evaluate the density over a grid of points
    pub fn evaluate(&self, grid: &[f64]) -> Vec<f64> {
        grid.iter().map(|&x| self.density(x)).collect()
    }
}

/// One named density curve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DensitySeries {
    /// Display name, e.g. "Config 3"
    pub name: String,
    /// Density values aligned with the shared grid
    pub density: Vec<f64>,
}

/// Density curves of two configurations over a shared grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DensityComparison {
    /// Target column the densities describe
    pub target: String,
    /// Shared evaluation grid spanning both groups' value range
    pub grid: Vec<f64>,
    /// One series per configuration, in argument order
    pub series: Vec<DensitySeries>,
}

/// Smoothed distribution comparison of `target_col` between two
/// configuration groups.
///
/// Each group needs at least one valid numeric observation; otherwise
/// the comparison fails with [`StatsError::EmptyGroup`] for the first
/// offending group. The grid has [`KDE_GRID_POINTS`] points spanning the
/// combined min..max of both groups.
pub fn compare_densities(
    frame: &ResultsFrame,
    target_col: &str,
    config_a: &Key,
    config_b: &Key,
) -> Result<DensityComparison, StatsError> {
    let group_col = well_known::TUNABLE_CONFIG_ID;
    let data_a = frame.values_for_group(group_col, target_col, config_a)?;
    let data_b = frame.values_for_group(group_col, target_col, config_b)?;

    for (key, data) in [(config_a, &data_a), (config_b, &data_b)] {
        if data.is_empty() {
            return Err(StatsError::EmptyGroup {
                group: key.clone(),
                column: target_col.to_string(),
            });
        }
    }

    let min = data_a
        .iter()
        .chain(&data_b)
        .cloned()
        .fold(f64::INFINITY, f64::min);
    let max = data_a
        .iter()
        .chain(&data_b)
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);
    let span = if max > min { max - min } else { 1.0 };

    let grid: Vec<f64> = (0..KDE_GRID_POINTS)
        .map(|i| min + span * i as f64 / (KDE_GRID_POINTS - 1) as f64)
        .collect();

    // fit() only fails on empty input, which is excluded above
    let kde_a = GaussianKde::fit(&data_a).ok_or_else(|| StatsError::EmptyGroup {
        group: config_a.clone(),
        column: target_col.to_string(),
    })?;
    let kde_b = GaussianKde::fit(&data_b).ok_or_else(|| StatsError::EmptyGroup {
        group: config_b.clone(),
        column: target_col.to_string(),
    })?;

    Ok(DensityComparison {
        target: target_col.to_string(),
        series: vec![
            DensitySeries {
                name: format!("Config {config_a}"),
                density: kde_a.evaluate(&grid),
            },
            DensitySeries {
                name: format!("Config {config_b}"),
                density: kde_b.evaluate(&grid),
            },
        ],
        grid,
    })
}
