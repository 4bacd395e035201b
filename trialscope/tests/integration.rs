//! Integration tests for Trialscope
//!
//! These tests verify the end-to-end flow: seed a SQLite store, load a
//! frame, run the statistics, and render the dashboard outputs.

use regex::Regex;
use trialscope::{
    build_dashboard, generate_html_report, generate_json_report, run_pairwise_tests,
    well_known, DashboardReport, ExperimentSource, Key, PairwiseConfig, PanelBody,
    ReportOptions, ResultsStore, TestKind,
};

/// Two configurations with clearly separated latencies, one flaky
/// configuration without valid data.
fn seeded_store() -> ResultsStore {
    let mut store = ResultsStore::open_in_memory().unwrap();
    store
        .insert_experiment("cache-tuning", Some("cache size sweep"))
        .unwrap();

    let mut trial_id = 0i64;
    for (config_id, base) in [(1i64, 10.0f64), (2, 20.0)] {
        for i in 0..5 {
            trial_id += 1;
            let latency = format!("{}", base + i as f64 * 0.5);
            store
                .insert_trial(
                    "cache-tuning",
                    trial_id,
                    config_id,
                    "SUCCEEDED",
                    &[
                        ("config.cache_mb", if config_id == 1 { "64" } else { "128" }),
                        ("result.latency", latency.as_str()),
                    ],
                )
                .unwrap();
        }
    }
    // Config 3 only ever fails; no metric values recorded
    for _ in 0..3 {
        trial_id += 1;
        store
            .insert_trial("cache-tuning", trial_id, 3, "FAILED", &[])
            .unwrap();
    }
    store
}

fn report_options() -> ReportOptions {
    ReportOptions {
        metric: Regex::new("latency").unwrap(),
        top_n: 5,
        configs: Some((Key::Int(1), Key::Int(2))),
        pairwise: PairwiseConfig::default(),
        group_col: well_known::TUNABLE_CONFIG_ID.to_string(),
    }
}

#[test]
fn test_store_roundtrip_to_frame() {
    let store = seeded_store();
    assert_eq!(store.experiment_ids().unwrap(), vec!["cache-tuning"]);

    let frame = store.results_frame("cache-tuning").unwrap();
    assert_eq!(frame.rows(), 13);
    assert_eq!(frame.result_columns(), vec!["result.latency"]);
    assert_eq!(
        frame.group_keys(well_known::TUNABLE_CONFIG_ID).unwrap(),
        vec![Key::Int(1), Key::Int(2), Key::Int(3)]
    );
}

#[test]
fn test_pairwise_over_stored_experiment() {
    let store = seeded_store();
    let frame = store.results_frame("cache-tuning").unwrap();

    let results = run_pairwise_tests(
        &frame,
        "result.latency",
        well_known::TUNABLE_CONFIG_ID,
        &PairwiseConfig::default(),
    )
    .unwrap();

    // Config 3 has no valid observations: only the (1, 2) pair reports
    assert_eq!(results.len(), 1);
    let r = &results[0];
    assert_eq!((r.config_a.clone(), r.config_b.clone()), (Key::Int(1), Key::Int(2)));
    assert_eq!((r.n_a, r.n_b), (5, 5));
    assert!(r.significant, "p = {}", r.p_value);
    assert!(r.p_value < 0.001);
}

#[test]
fn test_test_kind_switch_preserves_pairs() {
    let store = seeded_store();
    let frame = store.results_frame("cache-tuning").unwrap();

    let mw = run_pairwise_tests(
        &frame,
        "result.latency",
        well_known::TUNABLE_CONFIG_ID,
        &PairwiseConfig {
            test: TestKind::Mannwhitney,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(mw.len(), 1);
    // Every config 1 trial beats every config 2 trial, so U1 is 0
    assert_eq!(mw[0].statistic, 0.0);
    assert!(mw[0].significant, "p = {}", mw[0].p_value);
}

#[test]
fn test_dashboard_end_to_end() {
    let store = seeded_store();
    let frame = store.results_frame("cache-tuning").unwrap();

    let report = build_dashboard(&frame, "cache-tuning", &report_options());

    assert_eq!(report.summary.failed, 0);
    assert!(report.summary.rendered >= 12);
    assert_eq!(report.meta.experiment_id, "cache-tuning");
    assert_eq!(report.meta.target_column.as_deref(), Some("result.latency"));
}

#[test]
fn test_json_output_parses_back() {
    let store = seeded_store();
    let frame = store.results_frame("cache-tuning").unwrap();
    let report = build_dashboard(&frame, "cache-tuning", &report_options());

    let json = generate_json_report(&report).unwrap();
    let parsed: DashboardReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.panels.len(), report.panels.len());
    assert_eq!(parsed.summary.rendered, report.summary.rendered);
}

#[test]
fn test_html_output_embeds_panels() {
    let store = seeded_store();
    let frame = store.results_frame("cache-tuning").unwrap();
    let report = build_dashboard(&frame, "cache-tuning", &report_options());

    let html = generate_html_report(&report);
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("Experiment cache-tuning"));
    assert!(html.contains("Status Distribution"));
    // Chart data is embedded as JSON
    assert!(html.contains("application/json"));
}

#[test]
fn test_panel_degradation_is_independent() {
    // A frame without the status column: failure panels degrade, the
    // metric panels keep rendering
    let mut store = ResultsStore::open_in_memory().unwrap();
    store.insert_experiment("minimal", None).unwrap();
    store
        .insert_trial("minimal", 1, 1, "SUCCEEDED", &[("result.score", "1.0")])
        .unwrap();
    store
        .insert_trial("minimal", 2, 2, "SUCCEEDED", &[("result.score", "2.0")])
        .unwrap();
    let frame = store.results_frame("minimal").unwrap();

    let opts = ReportOptions {
        metric: Regex::new("score").unwrap(),
        top_n: 5,
        configs: Some((Key::Int(1), Key::Int(9))),
        pairwise: PairwiseConfig::default(),
        group_col: well_known::TUNABLE_CONFIG_ID.to_string(),
    };
    let report = build_dashboard(&frame, "minimal", &opts);

    // Config 9 does not exist: the head-to-head panels fail
    assert!(report.summary.failed >= 1);
    assert!(report.summary.rendered >= 6);
    let failed: Vec<_> = report
        .panels
        .iter()
        .filter(|p| matches!(p.body, PanelBody::Failed { .. }))
        .collect();
    assert!(!failed.is_empty());
    // Failure panels carry their message, not a panic
    for panel in failed {
        let PanelBody::Failed { message } = &panel.body else {
            unreachable!()
        };
        assert!(!message.is_empty());
    }
}
