//! JSON Output

use crate::report::DashboardReport;

/// Generate a prettified JSON report.
///
/// Serializes the dashboard report, chart specifications included, into
/// machine-readable JSON.
pub fn generate_json_report(report: &DashboardReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{PanelBody, ReportMeta};

    #[test]
    fn test_json_round_trips() {
        let mut report = DashboardReport::new(ReportMeta::now("exp-1", Some("result.score")));
        report.push_panel(
            "Notes",
            PanelBody::Text {
                content: "baseline run".to_string(),
            },
        );

        let json = generate_json_report(&report).unwrap();
        let parsed: DashboardReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.meta.experiment_id, "exp-1");
        assert_eq!(parsed.panels.len(), 1);
    }
}
