//! HTML Output
//!
//! Single-file HTML dashboard. Chart specifications are embedded as
//! JSON inside the page so it can be archived and opened without a
//! server; failed panels render inline with their error message.

use crate::report::{DashboardReport, PanelBody};

/// Generate a self-contained HTML dashboard.
pub fn generate_html_report(report: &DashboardReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html><head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>Experiment {} Dashboard</title>\n",
        escape(&report.meta.experiment_id)
    ));
    html.push_str("<style>\n");
    html.push_str("body { font-family: system-ui, sans-serif; max-width: 1100px; margin: 2rem auto; padding: 0 1rem; }\n");
    html.push_str(".panel { padding: 0.75rem; margin: 0.5rem 0; border: 1px solid #ddd; border-radius: 4px; }\n");
    html.push_str(".failed { background: #f8d7da; }\n");
    html.push_str("table { border-collapse: collapse; }\n");
    html.push_str("th, td { border: 1px solid #ccc; padding: 0.25rem 0.6rem; text-align: left; }\n");
    html.push_str("pre { background: #f4f4f4; padding: 0.5rem; overflow-x: auto; }\n");
    html.push_str("</style>\n</head><body>\n");

    html.push_str(&format!(
        "<h1>Experiment {}</h1>\n",
        escape(&report.meta.experiment_id)
    ));
    if let Some(ref target) = report.meta.target_column {
        html.push_str(&format!(
            "<p><strong>Target:</strong> <code>{}</code></p>\n",
            escape(target)
        ));
    }
    html.push_str(&format!(
        "<p><strong>Generated:</strong> {} | <strong>Panels:</strong> {} ({} rendered, {} failed)</p>\n",
        report.meta.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        report.summary.total_panels,
        report.summary.rendered,
        report.summary.failed,
    ));

    for (idx, panel) in report.panels.iter().enumerate() {
        match &panel.body {
            PanelBody::Chart(spec) => {
                html.push_str("<div class=\"panel\">\n");
                html.push_str(&format!("  <h2>{}</h2>\n", escape(&panel.title)));
                let payload = serde_json::to_string(spec)
                    .unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e));
                html.push_str(&format!(
                    "  <div class=\"chart\" id=\"chart-{idx}\"></div>\n  <script type=\"application/json\" data-chart=\"chart-{idx}\">{}</script>\n",
                    escape_json_script(&payload)
                ));
                html.push_str("</div>\n");
            }
            PanelBody::Table(table) => {
                html.push_str("<div class=\"panel\">\n");
                html.push_str(&format!("  <h2>{}</h2>\n", escape(&panel.title)));
                html.push_str("  <table>\n    <tr>");
                for col in &table.columns {
                    html.push_str(&format!("<th>{}</th>", escape(col)));
                }
                html.push_str("</tr>\n");
                for row in &table.rows {
                    html.push_str("    <tr>");
                    for cell in row {
                        html.push_str(&format!("<td>{}</td>", escape(cell)));
                    }
                    html.push_str("</tr>\n");
                }
                html.push_str("  </table>\n</div>\n");
            }
            PanelBody::Text { content } => {
                html.push_str("<div class=\"panel\">\n");
                html.push_str(&format!("  <h2>{}</h2>\n", escape(&panel.title)));
                html.push_str(&format!("  <pre>{}</pre>\n", escape(content)));
                html.push_str("</div>\n");
            }
            PanelBody::Failed { message } => {
                html.push_str("<div class=\"panel failed\">\n");
                html.push_str(&format!("  <h2>{}</h2>\n", escape(&panel.title)));
                html.push_str(&format!(
                    "  <p>Panel could not be rendered: {}</p>\n",
                    escape(message)
                ));
                html.push_str("</div>\n");
            }
        }
    }

    html.push_str("</body></html>");
    html
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// JSON inside <script type="application/json"> only needs the closing
// tag neutralized.
fn escape_json_script(s: &str) -> String {
    s.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{DashboardReport, ReportMeta, TableSpec};
    use crate::spec::{ChartSpec, PieChart};

    #[test]
    fn test_failed_panel_rendered_inline() {
        let mut report = DashboardReport::new(ReportMeta::now("exp-9", None));
        report.push_panel(
            "Correlations",
            PanelBody::Failed {
                message: "no numeric data for result.score".to_string(),
            },
        );

        let html = generate_html_report(&report);
        assert!(html.contains("class=\"panel failed\""));
        assert!(html.contains("no numeric data for result.score"));
    }

    #[test]
    fn test_chart_json_embedded() {
        let mut report = DashboardReport::new(ReportMeta::now("exp-9", None));
        report.push_panel(
            "Status",
            PanelBody::Chart(ChartSpec::Pie(PieChart {
                title: "Status".to_string(),
                labels: vec!["SUCCEEDED".to_string()],
                values: vec![4.0],
            })),
        );

        let html = generate_html_report(&report);
        assert!(html.contains("application/json"));
        assert!(html.contains("\"kind\":\"pie\""));
    }

    #[test]
    fn test_table_cells_escaped() {
        let mut report = DashboardReport::new(ReportMeta::now("exp-9", None));
        report.push_panel(
            "Configs",
            PanelBody::Table(TableSpec {
                columns: vec!["flag".to_string()],
                rows: vec![vec!["<on>".to_string()]],
            }),
        );

        let html = generate_html_report(&report);
        assert!(html.contains("&lt;on&gt;"));
        assert!(!html.contains("<on>"));
    }
}
