//! Mann-Whitney U Test
//!
//! Two-sided rank-sum test with mid-rank tie handling, normal
//! approximation with tie correction and continuity correction.

use crate::special::normal_sf;

/// Two-sided Mann-Whitney U test.
///
/// Returns `(u_statistic, p_value)` where the statistic is the U of the
/// first sample, matching the usual convention. Samples must be
/// non-empty; if every observation across both samples is tied the test
/// carries no information and the p-value is 1.
pub fn mann_whitney_u(a: &[f64], b: &[f64]) -> (f64, f64) {
    let n1 = a.len() as f64;
    let n2 = b.len() as f64;
    if a.is_empty() || b.is_empty() {
        return (f64::NAN, f64::NAN);
    }

    // Rank the pooled samples with mid-ranks for ties
    let mut pooled: Vec<(f64, usize)> = a
        .iter()
        .map(|&v| (v, 0usize))
        .chain(b.iter().map(|&v| (v, 1usize)))
        .collect();
    pooled.sort_by(|x, y| x.0.partial_cmp(&y.0).unwrap_or(std::cmp::Ordering::Equal));

    let n = pooled.len();
    let mut ranks = vec![0.0f64; n];
    let mut tie_term = 0.0f64;
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && pooled[j + 1].0 == pooled[i].0 {
            j += 1;
        }
        // Mid-rank of the tied run [i, j]
        let mid = (i + j) as f64 / 2.0 + 1.0;
        for rank in ranks.iter_mut().take(j + 1).skip(i) {
            *rank = mid;
        }
        let t = (j - i + 1) as f64;
        tie_term += t * t * t - t;
        i = j + 1;
    }

    let r1: f64 = pooled
        .iter()
        .zip(&ranks)
        .filter(|((_, sample), _)| *sample == 0)
        .map(|(_, &r)| r)
        .sum();

    let u1 = r1 - n1 * (n1 + 1.0) / 2.0;
    let u2 = n1 * n2 - u1;

    let mean_u = n1 * n2 / 2.0;
    let nf = n as f64;
    let variance = n1 * n2 / 12.0 * ((nf + 1.0) - tie_term / (nf * (nf - 1.0)));
    if variance <= 0.0 {
        // All observations tied
        return (u1, 1.0);
    }

    // Continuity correction on the larger U
    let big_u = u1.max(u2);
    let z = (big_u - mean_u - 0.5) / variance.sqrt();
    let p = (2.0 * normal_sf(z)).clamp(0.0, 1.0);

    (u1, p)
}
