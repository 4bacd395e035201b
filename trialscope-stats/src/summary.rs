//! Summary Statistics
//!
//! Descriptive statistics for one group's observations, shown in the
//! dashboard's description table and reused by the box-plot builders.

use crate::percentiles::compute_percentile;
use serde::{Deserialize, Serialize};

/// Descriptive statistics of one sample
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Arithmetic mean
    pub mean: f64,
    /// Median (p50)
    pub median: f64,
    /// Sample standard deviation (n-1 denominator)
    pub std_dev: f64,
    /// Smallest observation
    pub min: f64,
    /// Largest observation
    pub max: f64,
    /// First quartile
    pub q25: f64,
    /// Third quartile
    pub q75: f64,
    /// Number of observations
    pub count: usize,
}

/// Compute descriptive statistics of a sample.
///
/// An empty sample yields all-zero statistics with `count == 0`; callers
/// that care about empty groups check the count.
pub fn compute_summary(samples: &[f64]) -> SummaryStatistics {
    if samples.is_empty() {
        return SummaryStatistics {
            mean: 0.0,
            median: 0.0,
            std_dev: 0.0,
            min: 0.0,
            max: 0.0,
            q25: 0.0,
            q75: 0.0,
            count: 0,
        };
    }

    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;

    let std_dev = if samples.len() < 2 {
        0.0
    } else {
        let variance =
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (samples.len() - 1) as f64;
        variance.sqrt()
    };

    let min = samples
        .iter()
        .cloned()
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or(0.0);
    let max = samples
        .iter()
        .cloned()
        .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or(0.0);

    SummaryStatistics {
        mean,
        median: compute_percentile(samples, 50.0),
        std_dev,
        min,
        max,
        q25: compute_percentile(samples, 25.0),
        q75: compute_percentile(samples, 75.0),
        count: samples.len(),
    }
}

impl SummaryStatistics {
    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.q75 - self.q25
    }
}
