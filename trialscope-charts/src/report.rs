//! Dashboard Report Data Structures

use crate::spec::ChartSpec;
use crate::ChartError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Complete dashboard report for one experiment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    /// Report metadata
    pub meta: ReportMeta,
    /// Panels in display order
    pub panels: Vec<Panel>,
    /// Rendered/failed panel counts
    pub summary: ReportSummary,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Report schema version
    pub schema_version: u32,
    /// Toolkit version that produced the report
    pub version: String,
    /// Generation time
    pub timestamp: DateTime<Utc>,
    /// Experiment the report covers
    pub experiment_id: String,
    /// Selected target metric, if one matched
    pub target_column: Option<String>,
}

/// One dashboard panel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Panel {
    /// Panel heading
    pub title: String,
    /// Rendered content, or the failure that replaced it
    pub body: PanelBody,
}

/// Content of a panel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PanelBody {
    /// An embedded chart specification
    Chart(ChartSpec),
    /// A tabular result
    Table(TableSpec),
    /// Free-form text (explanations, notes)
    Text {
        /// Text content
        content: String,
    },
    /// The panel's builder failed; the rest of the report is unaffected
    Failed {
        /// Error message shown in place of the content
        message: String,
    },
}

/// Tabular panel content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSpec {
    /// Column headers
    pub columns: Vec<String>,
    /// Rows of preformatted cells, aligned with headers
    pub rows: Vec<Vec<String>>,
}

/// Report summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Panels in the report
    pub total_panels: usize,
    /// Panels that rendered content
    pub rendered: usize,
    /// Panels replaced by a failure message
    pub failed: usize,
}

/// Current report schema version
pub const SCHEMA_VERSION: u32 = 1;

impl ReportMeta {
    /// Metadata stamped with the current time and crate version.
    pub fn now(experiment_id: &str, target_column: Option<&str>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            experiment_id: experiment_id.to_string(),
            target_column: target_column.map(str::to_string),
        }
    }
}

impl DashboardReport {
    /// Empty report for the given metadata.
    pub fn new(meta: ReportMeta) -> Self {
        Self {
            meta,
            panels: Vec::new(),
            summary: ReportSummary::default(),
        }
    }

    /// Append a panel and update the summary counts.
    pub fn push_panel(&mut self, title: impl Into<String>, body: PanelBody) {
        self.summary.total_panels += 1;
        match body {
            PanelBody::Failed { .. } => self.summary.failed += 1,
            _ => self.summary.rendered += 1,
        }
        self.panels.push(Panel {
            title: title.into(),
            body,
        });
    }

    /// Append a chart panel, degrading to a failed panel if the builder
    /// errored. Each panel fails independently.
    pub fn push_chart(&mut self, title: impl Into<String>, chart: Result<ChartSpec, ChartError>) {
        let body = match chart {
            Ok(spec) => PanelBody::Chart(spec),
            Err(e) => PanelBody::Failed {
                message: e.to_string(),
            },
        };
        self.push_panel(title, body);
    }

    /// Append every chart from a multi-chart builder, or one failed
    /// panel if the whole builder errored.
    pub fn push_charts(
        &mut self,
        title: impl Into<String>,
        charts: Result<Vec<ChartSpec>, ChartError>,
    ) {
        let title = title.into();
        match charts {
            Ok(specs) => {
                for spec in specs {
                    let panel_title = spec.title().to_string();
                    self.push_panel(panel_title, PanelBody::Chart(spec));
                }
            }
            Err(e) => self.push_panel(
                title,
                PanelBody::Failed {
                    message: e.to_string(),
                },
            ),
        }
    }
}

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON with full schema
    Json,
    /// Single-file HTML dashboard
    Html,
    /// Human-readable terminal output
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::PieChart;

    fn chart() -> ChartSpec {
        ChartSpec::Pie(PieChart {
            title: "Status".to_string(),
            labels: vec!["SUCCEEDED".to_string()],
            values: vec![3.0],
        })
    }

    #[test]
    fn test_failed_panel_counts_separately() {
        let mut report = DashboardReport::new(ReportMeta::now("exp-1", Some("result.score")));
        report.push_chart("Status", Ok(chart()));
        report.push_chart(
            "Correlation",
            Err(ChartError::NoNumericData {
                what: "result.score".to_string(),
            }),
        );

        assert_eq!(report.summary.total_panels, 2);
        assert_eq!(report.summary.rendered, 1);
        assert_eq!(report.summary.failed, 1);
        assert!(matches!(report.panels[1].body, PanelBody::Failed { .. }));
    }

    #[test]
    fn test_push_charts_expands_each_spec() {
        let mut report = DashboardReport::new(ReportMeta::now("exp-1", None));
        report.push_charts("Comparison", Ok(vec![chart(), chart()]));
        assert_eq!(report.summary.total_panels, 2);
        assert_eq!(report.panels[0].title, "Status");
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("HTML".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Human);
        assert!("csv".parse::<OutputFormat>().is_err());
    }
}
