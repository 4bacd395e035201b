//! Pairwise Significance Testing
//!
//! Compares the value distributions of a target metric between every pair
//! of configuration groups present in a results frame.

use crate::mannwhitney::mann_whitney_u;
use crate::welch::welch_t_test;
use crate::{StatsError, ALPHA_MAX, ALPHA_MIN, DEFAULT_ALPHA};
use serde::{Deserialize, Serialize};
use trialscope_frame::{Key, ResultsFrame};

/// Which two-sample test to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestKind {
    /// Welch's independent two-sample t-test (unequal variances)
    #[default]
    Ttest,
    /// Two-sided Mann-Whitney U test (non-parametric)
    Mannwhitney,
}

impl std::str::FromStr for TestKind {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ttest" | "t-test" | "welch" => Ok(TestKind::Ttest),
            "mannwhitney" | "mann-whitney" | "u" => Ok(TestKind::Mannwhitney),
            other => Err(StatsError::UnknownTest(other.to_string())),
        }
    }
}

impl std::fmt::Display for TestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestKind::Ttest => write!(f, "ttest"),
            TestKind::Mannwhitney => write!(f, "mannwhitney"),
        }
    }
}

/// Configuration for pairwise testing
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PairwiseConfig {
    /// Test to run for each pair
    pub test: TestKind,
    /// Significance level; a pair is significant iff p < alpha (strict)
    pub alpha: f64,
}

impl Default for PairwiseConfig {
    fn default() -> Self {
        Self {
            test: TestKind::default(),
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl PairwiseConfig {
    /// Validate the significance level against the accepted bounds
    pub fn validate(&self) -> Result<(), StatsError> {
        if !(ALPHA_MIN..=ALPHA_MAX).contains(&self.alpha) {
            return Err(StatsError::AlphaOutOfRange(self.alpha));
        }
        Ok(())
    }
}

/// One pairwise comparison between two configuration groups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairwiseComparison {
    /// First group of the pair
    pub config_a: Key,
    /// Second group of the pair
    pub config_b: Key,
    /// Valid observations in the first group
    pub n_a: usize,
    /// Valid observations in the second group
    pub n_b: usize,
    /// Test statistic (t or U depending on the configured test)
    pub statistic: f64,
    /// Two-sided p-value
    pub p_value: f64,
    /// Whether p_value < alpha
    pub significant: bool,
}

/// Run the configured two-sample test between every unordered pair of
/// groups of `group_col` over the target column.
///
/// The target column is coerced to numeric first; missing and non-finite
/// entries drop out before grouping. Pairs where either group has zero
/// valid observations are skipped, not reported. Output order follows
/// the first-appearance enumeration of group keys: ascending by first
/// index, then second.
pub fn run_pairwise_tests(
    frame: &ResultsFrame,
    result_col: &str,
    group_col: &str,
    config: &PairwiseConfig,
) -> Result<Vec<PairwiseComparison>, StatsError> {
    config.validate()?;

    let groups = frame.grouped_numeric(group_col, result_col)?;

    let mut results = Vec::new();
    for i in 0..groups.len() {
        for j in (i + 1)..groups.len() {
            let (key_a, data_a) = &groups[i];
            let (key_b, data_b) = &groups[j];

            if data_a.is_empty() || data_b.is_empty() {
                continue;
            }

            let (statistic, p_value) = match config.test {
                TestKind::Ttest => welch_t_test(data_a, data_b),
                TestKind::Mannwhitney => mann_whitney_u(data_a, data_b),
            };

            results.push(PairwiseComparison {
                config_a: key_a.clone(),
                config_b: key_b.clone(),
                n_a: data_a.len(),
                n_b: data_b.len(),
                statistic,
                p_value,
                // NaN p-values (degenerate samples) compare false here
                significant: p_value < config.alpha,
            });
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trialscope_frame::Column;

    /// Three groups over result.latency; group 3 has no valid rows
    fn frame_with_empty_group() -> ResultsFrame {
        let mut f = ResultsFrame::new();
        f.push_column(
            "tunable_config_id",
            Column::Int(vec![Some(1), Some(1), Some(1), Some(2), Some(2), Some(2), Some(3), Some(3)]),
        )
        .unwrap();
        f.push_column(
            "result.latency",
            Column::Float(vec![
                Some(10.0),
                Some(11.0),
                Some(12.0),
                Some(20.0),
                Some(21.0),
                Some(22.0),
                None,
                Some(f64::NAN),
            ]),
        )
        .unwrap();
        f
    }

    #[test]
    fn test_empty_group_pairs_skipped() {
        let f = frame_with_empty_group();
        let results =
            run_pairwise_tests(&f, "result.latency", "tunable_config_id", &PairwiseConfig::default())
                .unwrap();

        // Groups {1,2,3}, group 3 empty: only the (1,2) pair is reported
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].config_a, Key::Int(1));
        assert_eq!(results[0].config_b, Key::Int(2));
    }

    #[test]
    fn test_sample_counts_match_valid_observations() {
        let f = frame_with_empty_group();
        let results =
            run_pairwise_tests(&f, "result.latency", "tunable_config_id", &PairwiseConfig::default())
                .unwrap();
        assert_eq!(results[0].n_a, 3);
        assert_eq!(results[0].n_b, 3);
    }

    #[test]
    fn test_pair_count_is_choose_two_of_nonempty() {
        let mut f = ResultsFrame::new();
        f.push_column(
            "tunable_config_id",
            Column::Int(vec![Some(1), Some(2), Some(3), Some(4)]),
        )
        .unwrap();
        f.push_column(
            "result.score",
            Column::Float(vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]),
        )
        .unwrap();
        let results =
            run_pairwise_tests(&f, "result.score", "tunable_config_id", &PairwiseConfig::default())
                .unwrap();
        // C(4, 2) = 6
        assert_eq!(results.len(), 6);
    }

    #[test]
    fn test_test_kind_changes_only_statistic() {
        let f = frame_with_empty_group();
        let ttest = run_pairwise_tests(
            &f,
            "result.latency",
            "tunable_config_id",
            &PairwiseConfig {
                test: TestKind::Ttest,
                ..Default::default()
            },
        )
        .unwrap();
        let mw = run_pairwise_tests(
            &f,
            "result.latency",
            "tunable_config_id",
            &PairwiseConfig {
                test: TestKind::Mannwhitney,
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(ttest.len(), mw.len());
        for (t, m) in ttest.iter().zip(&mw) {
            assert_eq!(t.config_a, m.config_a);
            assert_eq!(t.config_b, m.config_b);
            assert_eq!(t.n_a, m.n_a);
            assert_eq!(t.n_b, m.n_b);
        }
    }

    #[test]
    fn test_significance_flips_strictly_at_alpha() {
        // Two groups of 5 with fully separated values give a Mann-Whitney
        // p-value inside the accepted alpha range
        let mut f = ResultsFrame::new();
        f.push_column(
            "tunable_config_id",
            Column::Int((0..10).map(|i| Some(i / 5 + 1)).collect()),
        )
        .unwrap();
        f.push_column(
            "result.latency",
            Column::Float(
                (0..10)
                    .map(|i| Some((i / 5) as f64 * 10.0 + (i % 5) as f64 * 0.5))
                    .collect(),
            ),
        )
        .unwrap();

        let run = |alpha: f64| {
            let config = PairwiseConfig {
                test: TestKind::Mannwhitney,
                alpha,
            };
            run_pairwise_tests(&f, "result.latency", "tunable_config_id", &config).unwrap()[0]
                .clone()
        };

        let p = run(DEFAULT_ALPHA).p_value;
        assert!(p > ALPHA_MIN && p < ALPHA_MAX, "p = {p}");

        // significant iff p < alpha, strictly: alpha == p is not enough
        assert!(!run(p).significant);
        assert!(!run(p - 1e-12).significant);
        assert!(run(p + 1e-12).significant);
    }

    #[test]
    fn test_identical_distributions_not_significant() {
        let mut f = ResultsFrame::new();
        let values: Vec<Option<f64>> = (0..16)
            .map(|i| Some(100.0 + (i % 8) as f64 * 0.1))
            .collect();
        f.push_column(
            "tunable_config_id",
            Column::Int((0..16).map(|i| Some(i / 8 + 1)).collect()),
        )
        .unwrap();
        f.push_column("result.score", Column::Float(values)).unwrap();

        let results =
            run_pairwise_tests(&f, "result.score", "tunable_config_id", &PairwiseConfig::default())
                .unwrap();
        assert_eq!(results.len(), 1);
        assert!(!results[0].significant, "p = {}", results[0].p_value);
    }

    #[test]
    fn test_alpha_out_of_range_rejected() {
        let f = frame_with_empty_group();
        let config = PairwiseConfig {
            alpha: 0.5,
            ..Default::default()
        };
        let err = run_pairwise_tests(&f, "result.latency", "tunable_config_id", &config);
        assert!(matches!(err, Err(StatsError::AlphaOutOfRange(_))));
    }

    #[test]
    fn test_missing_column_reported() {
        let f = frame_with_empty_group();
        let err = run_pairwise_tests(&f, "result.nope", "tunable_config_id", &PairwiseConfig::default());
        assert!(matches!(err, Err(StatsError::Frame(_))));
    }

    #[test]
    fn test_test_kind_parsing() {
        assert_eq!("ttest".parse::<TestKind>().unwrap(), TestKind::Ttest);
        assert_eq!("mannwhitney".parse::<TestKind>().unwrap(), TestKind::Mannwhitney);
        assert!("anova".parse::<TestKind>().is_err());
    }
}
