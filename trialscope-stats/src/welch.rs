//! Welch's t-test
//!
//! Independent two-sample t-test without the equal-variance assumption,
//! using the Welch-Satterthwaite degrees of freedom.

use crate::special::student_t_two_sided;

/// Welch's two-sample t-test, two-sided.
///
/// Returns `(statistic, p_value)`. Samples must be non-empty; a sample
/// with fewer than two observations (or two zero-variance samples with
/// equal means) yields a NaN p-value, which downstream significance
/// checks treat as not significant.
pub fn welch_t_test(a: &[f64], b: &[f64]) -> (f64, f64) {
    let na = a.len() as f64;
    let nb = b.len() as f64;
    if a.is_empty() || b.is_empty() {
        return (f64::NAN, f64::NAN);
    }

    let mean_a = a.iter().sum::<f64>() / na;
    let mean_b = b.iter().sum::<f64>() / nb;

    let var_a = sample_variance(a, mean_a);
    let var_b = sample_variance(b, mean_b);

    let se2 = var_a / na + var_b / nb;
    let diff = mean_a - mean_b;

    if se2 == 0.0 {
        // Both samples constant. Distinct constants are an infinitely
        // strong signal; identical constants carry no information.
        return if diff == 0.0 {
            (f64::NAN, f64::NAN)
        } else {
            (diff.signum() * f64::INFINITY, 0.0)
        };
    }

    let t = diff / se2.sqrt();

    // Welch-Satterthwaite degrees of freedom
    let df_num = se2 * se2;
    let df_den = (var_a / na).powi(2) / (na - 1.0) + (var_b / nb).powi(2) / (nb - 1.0);
    if df_den == 0.0 || !df_den.is_finite() {
        return (t, f64::NAN);
    }
    let df = df_num / df_den;

    (t, student_t_two_sided(t, df))
}

fn sample_variance(xs: &[f64], mean: f64) -> f64 {
    if xs.len() < 2 {
        return 0.0;
    }
    xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (xs.len() - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_samples_not_significant() {
        // Near-zero mean/variance difference, deterministic data
        let a = vec![100.0, 102.0, 98.0, 101.0, 99.0, 100.0, 101.0, 99.0];
        let b = vec![100.0, 101.9, 98.1, 101.0, 99.0, 100.1, 100.9, 99.1];
        let (t, p) = welch_t_test(&a, &b);
        assert!(t.abs() < 0.5);
        assert!(p > 0.05, "p = {p}");
    }

    #[test]
    fn test_clear_separation_significant() {
        let a = vec![100.0, 102.0, 98.0, 101.0, 99.0, 100.0, 101.0, 99.0];
        let b = vec![200.0, 202.0, 198.0, 201.0, 199.0, 200.0, 201.0, 199.0];
        let (t, p) = welch_t_test(&a, &b);
        assert!(t < -50.0);
        assert!(p < 1e-6, "p = {p}");
    }

    #[test]
    fn test_reference_value() {
        // scipy.stats.ttest_ind(a, b, equal_var=False):
        // statistic = -2.0, df = 8, pvalue ~= 0.0805
        let a = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let b = vec![3.0, 4.0, 5.0, 6.0, 7.0];
        let (t, p) = welch_t_test(&a, &b);
        assert!((t - (-2.0)).abs() < 1e-10, "t = {t}");
        assert!((p - 0.0805).abs() < 0.005, "p = {p}");
    }

    #[test]
    fn test_degenerate_sample_gives_nan() {
        let a = vec![1.0];
        let b = vec![2.0, 3.0, 4.0];
        let (_, p) = welch_t_test(&a, &b);
        assert!(p.is_nan());
        // NaN is never < alpha, so the pair is reported as not significant
        assert!(!(p < 0.05));
    }

    #[test]
    fn test_constant_samples() {
        let a = vec![5.0, 5.0, 5.0];
        let b = vec![5.0, 5.0, 5.0];
        let (t, p) = welch_t_test(&a, &b);
        assert!(t.is_nan() && p.is_nan());

        let c = vec![6.0, 6.0, 6.0];
        let (t, p) = welch_t_test(&a, &c);
        assert!(t.is_infinite());
        assert_eq!(p, 0.0);
    }
}
