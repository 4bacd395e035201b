//! Correlation
//!
//! Pairwise-complete Pearson correlation over optional numeric views,
//! feeding the config/result heatmap and the target-correlation row.

/// Pearson correlation between two coerced numeric columns.
///
/// Only rows where both values are present contribute. Returns `None`
/// when fewer than two complete pairs exist or either series is
/// constant over the complete pairs.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter_map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) => Some((*a, *b)),
            _ => None,
        })
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_correlation() {
        let x: Vec<Option<f64>> = (0..10).map(|i| Some(i as f64)).collect();
        let y: Vec<Option<f64>> = (0..10).map(|i| Some(i as f64 * 2.0 + 1.0)).collect();
        let r = pearson(&x, &y).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_anticorrelation() {
        let x: Vec<Option<f64>> = (0..10).map(|i| Some(i as f64)).collect();
        let y: Vec<Option<f64>> = (0..10).map(|i| Some(-(i as f64))).collect();
        let r = pearson(&x, &y).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_cells_excluded_pairwise() {
        let x = vec![Some(1.0), None, Some(3.0), Some(4.0)];
        let y = vec![Some(2.0), Some(9.0), None, Some(8.0)];
        // Only rows 0 and 3 are complete
        let r = pearson(&x, &y).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_series_has_no_correlation() {
        let x = vec![Some(5.0), Some(5.0), Some(5.0)];
        let y = vec![Some(1.0), Some(2.0), Some(3.0)];
        assert!(pearson(&x, &y).is_none());
    }

    #[test]
    fn test_too_few_pairs() {
        let x = vec![Some(1.0), None];
        let y = vec![Some(2.0), Some(3.0)];
        assert!(pearson(&x, &y).is_none());
    }
}
