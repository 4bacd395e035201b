//! Chart Specifications
//!
//! Serializable descriptions of each chart the dashboard can show.
//! A spec carries data and labels only; styling belongs to whatever
//! frontend consumes the JSON.

use serde::{Deserialize, Serialize};
use trialscope_stats::SummaryStatistics;

/// Any chart the dashboard can embed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    /// Share-of-total pie
    Pie(PieChart),
    /// Grouped or stacked bars over categories
    Bar(BarChart),
    /// Box/whisker or violin groups with raw samples
    Box(BoxPlot),
    /// Scatter/line traces over numeric axes
    Xy(XyChart),
    /// Matrix of values over row/column labels
    Heatmap(Heatmap),
    /// Multi-dimensional parallel coordinates
    Parallel(ParallelPlot),
}

/// Pie chart of category shares
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PieChart {
    /// Chart title
    pub title: String,
    /// Slice labels
    pub labels: Vec<String>,
    /// Slice values, aligned with labels
    pub values: Vec<f64>,
}

/// One bar series across the shared categories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarSeries {
    /// Series name (legend entry)
    pub name: String,
    /// One value per category
    pub values: Vec<f64>,
}

/// Bar chart over categorical x values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarChart {
    /// Chart title
    pub title: String,
    /// X axis label
    pub x_label: String,
    /// Y axis label
    pub y_label: String,
    /// Category labels
    pub categories: Vec<String>,
    /// Bar series; more than one stacks or groups
    pub series: Vec<BarSeries>,
    /// Whether multiple series stack
    pub stacked: bool,
}

/// One group of a box/violin plot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxGroup {
    /// Group label (configuration or experiment id)
    pub label: String,
    /// Raw samples for point overlays
    pub samples: Vec<f64>,
    /// Precomputed five-number summary
    pub summary: SummaryStatistics,
}

/// Box/whisker (or violin) plot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxPlot {
    /// Chart title
    pub title: String,
    /// X axis label
    pub x_label: String,
    /// Y axis label
    pub y_label: String,
    /// Groups in display order
    pub groups: Vec<BoxGroup>,
    /// Render as violin (smoothed) instead of box
    pub violin: bool,
}

/// Trace style of an [`XyChart`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XyKind {
    /// Markers only
    Scatter,
    /// Connected line
    Line,
    /// Line with markers
    LineMarkers,
}

/// One named numeric trace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XySeries {
    /// Series name (legend entry)
    pub name: String,
    /// X values
    pub x: Vec<f64>,
    /// Y values, aligned with x
    pub y: Vec<f64>,
}

/// Scatter/line chart over numeric axes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XyChart {
    /// Chart title
    pub title: String,
    /// X axis label
    pub x_label: String,
    /// Y axis label
    pub y_label: String,
    /// Trace style
    pub mode: XyKind,
    /// Traces in display order
    pub series: Vec<XySeries>,
}

/// Heatmap over labeled rows and columns
///
/// `values[row][col]`; `None` marks a cell with no computable value
/// (e.g. a constant column in a correlation matrix).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heatmap {
    /// Chart title
    pub title: String,
    /// X axis label
    pub x_label: String,
    /// Y axis label
    pub y_label: String,
    /// Row labels
    pub rows: Vec<String>,
    /// Column labels
    pub columns: Vec<String>,
    /// Cell values by row then column
    pub values: Vec<Vec<Option<f64>>>,
}

/// One dimension of a parallel-coordinates plot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dimension {
    /// Column name
    pub name: String,
    /// One value per trial; `None` for missing cells
    pub values: Vec<Option<f64>>,
}

/// Parallel-coordinates plot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallelPlot {
    /// Chart title
    pub title: String,
    /// Dimensions in display order
    pub dimensions: Vec<Dimension>,
    /// Metric used to color the lines
    pub color_metric: String,
    /// Color values aligned with trials
    pub color_values: Vec<Option<f64>>,
}

impl ChartSpec {
    /// Title of the wrapped chart
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Pie(c) => &c.title,
            ChartSpec::Bar(c) => &c.title,
            ChartSpec::Box(c) => &c.title,
            ChartSpec::Xy(c) => &c.title,
            ChartSpec::Heatmap(c) => &c.title,
            ChartSpec::Parallel(c) => &c.title,
        }
    }
}
