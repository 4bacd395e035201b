//! Human-Readable Output

use trialscope_charts::{ChartSpec, DashboardReport, PanelBody, TableSpec};

/// Format the dashboard for terminal display.
///
/// Charts are listed by title and kind (the data lives in the JSON and
/// HTML outputs); tables and failures are rendered in full.
pub fn format_human_output(report: &DashboardReport) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str(&format!(
        "Trialscope Dashboard - Experiment {}\n",
        report.meta.experiment_id
    ));
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    if let Some(target) = &report.meta.target_column {
        output.push_str(&format!("Target metric: {}\n", target));
    }
    output.push_str(&format!(
        "Generated: {}\n\n",
        report.meta.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    for panel in &report.panels {
        match &panel.body {
            PanelBody::Chart(spec) => {
                output.push_str(&format!("  ✓ {} [{} chart]\n", panel.title, kind_name(spec)));
            }
            PanelBody::Table(table) => {
                output.push_str(&format!("  ✓ {}\n", panel.title));
                output.push_str(&format_table(table, 6));
            }
            PanelBody::Text { content } => {
                output.push_str(&format!("  ✓ {}\n", panel.title));
                for line in content.lines() {
                    output.push_str(&format!("      {}\n", line));
                }
            }
            PanelBody::Failed { message } => {
                output.push_str(&format!("  ✗ {}: {}\n", panel.title, message));
            }
        }
    }

    output.push('\n');
    output.push_str(&format!(
        "{} panels: {} rendered, {} failed\n",
        report.summary.total_panels, report.summary.rendered, report.summary.failed
    ));

    output
}

fn kind_name(spec: &ChartSpec) -> &'static str {
    match spec {
        ChartSpec::Pie(_) => "pie",
        ChartSpec::Bar(_) => "bar",
        ChartSpec::Box(b) if b.violin => "violin",
        ChartSpec::Box(_) => "box",
        ChartSpec::Xy(_) => "xy",
        ChartSpec::Heatmap(_) => "heatmap",
        ChartSpec::Parallel(_) => "parallel",
    }
}

/// Render a table with columns padded to their widest cell.
pub fn format_table(table: &TableSpec, indent: usize) -> String {
    let mut widths: Vec<usize> = table.columns.iter().map(String::len).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let pad = " ".repeat(indent);
    let mut out = String::new();

    out.push_str(&pad);
    for (i, col) in table.columns.iter().enumerate() {
        out.push_str(&format!("{:<width$}  ", col, width = widths[i]));
    }
    out.push('\n');

    out.push_str(&pad);
    for width in &widths {
        out.push_str(&"-".repeat(*width));
        out.push_str("  ");
    }
    out.push('\n');

    for row in &table.rows {
        out.push_str(&pad);
        for (i, cell) in row.iter().enumerate() {
            let width = widths.get(i).copied().unwrap_or(cell.len());
            out.push_str(&format!("{:<width$}  ", cell, width = width));
        }
        out.push('\n');
    }

    out
}
