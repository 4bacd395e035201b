#![warn(missing_docs)]
//! Trialscope CLI Library
//!
//! The dashboard surface: subcommands for listing experiments,
//! rendering the full dashboard, pairwise significance tables,
//! multi-experiment comparison, and backend explanations.
//! `trialscope_cli::run()` is the binary's entire main function.

mod config;
mod formatting;
mod panels;

pub use config::*;
pub use formatting::{format_human_output, format_table};
pub use panels::{
    build_dashboard, pairwise_table, parse_key, select_metric, summary_table, ReportOptions,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use regex::Regex;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use trialscope_charts::{
    compare_experiments, generate_html_report, generate_json_report, DashboardReport,
    OutputFormat, PanelBody, ReportMeta,
};
use trialscope_frame::ResultsFrame;
use trialscope_stats::{PairwiseConfig, TestKind};
use trialscope_storage::{BackendClient, ExperimentSource, ResultsStore};

/// Trialscope CLI arguments
#[derive(Parser, Debug)]
#[command(name = "trialscope")]
#[command(author, version, about = "Trialscope - experiment results dashboard")]
pub struct Cli {
    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, html, human
    #[arg(long, default_value = "human")]
    pub format: String,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file (default: discovered trialscope.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List experiment ids from the configured source
    List,
    /// Render the full dashboard for one experiment
    Report {
        /// Experiment id
        experiment: String,
        /// Regex selecting the target metric among result columns
        #[arg(long, default_value = ".*")]
        metric: String,
        /// Group count in top/bottom ranked charts
        #[arg(long)]
        top_n: Option<usize>,
        /// Two configuration ids for head-to-head panels, e.g. "3,7"
        #[arg(long, value_delimiter = ',')]
        configs: Option<Vec<String>>,
    },
    /// Pairwise significance table for one experiment
    Stats {
        /// Experiment id
        experiment: String,
        /// Regex selecting the target metric among result columns
        #[arg(long, default_value = ".*")]
        metric: String,
        /// Two-sample test: ttest or mannwhitney
        #[arg(long)]
        test: Option<String>,
        /// Significance level (0.001 to 0.1)
        #[arg(long)]
        alpha: Option<f64>,
        /// Grouping column
        #[arg(long)]
        group_col: Option<String>,
    },
    /// Compare a metric across several experiments
    Compare {
        /// Experiment ids
        #[arg(required = true, num_args = 1..)]
        experiments: Vec<String>,
        /// Target result column, shared by all experiments
        #[arg(long)]
        metric: String,
    },
    /// Fetch a generated explanation from the analysis backend
    Explain {
        /// Experiment id
        experiment: String,
    },
    /// Print a default trialscope.toml
    InitConfig,
}

/// Run the Trialscope CLI.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the Trialscope CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("trialscope=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("trialscope=info")
            .init();
    }

    // Discover trialscope.toml configuration (CLI flags override)
    let config = match &cli.config {
        Some(path) => TrialscopeConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => TrialscopeConfig::discover().unwrap_or_default(),
    };

    // Parse output format
    let format: OutputFormat = cli.format.parse().unwrap_or(OutputFormat::Human);

    match &cli.command {
        Commands::List => {
            let source = open_source(&config)?;
            for id in source.experiment_ids()? {
                println!("{id}");
            }
            Ok(())
        }
        Commands::Report {
            experiment,
            metric,
            top_n,
            configs,
        } => {
            let source = open_source(&config)?;
            let frame = source.results_frame(experiment)?;
            let opts = resolve_report_options(&config, metric, *top_n, configs.as_deref())?;
            let report = build_dashboard(&frame, experiment, &opts);
            info!(
                %experiment,
                rendered = report.summary.rendered,
                failed = report.summary.failed,
                "dashboard assembled"
            );
            emit_report(&report, format, cli.output.as_deref())
        }
        Commands::Stats {
            experiment,
            metric,
            test,
            alpha,
            group_col,
        } => {
            let source = open_source(&config)?;
            let frame = source.results_frame(experiment)?;
            let report = stats_report(&config, &frame, experiment, metric, test.as_deref(), *alpha, group_col.as_deref())?;
            emit_report(&report, format, cli.output.as_deref())
        }
        Commands::Compare {
            experiments,
            metric,
        } => {
            let source = open_source(&config)?;
            let mut frames: Vec<(String, ResultsFrame)> = Vec::new();
            for id in experiments {
                frames.push((id.clone(), source.results_frame(id)?));
            }
            let borrowed: Vec<(String, &ResultsFrame)> = frames
                .iter()
                .map(|(id, frame)| (id.clone(), frame))
                .collect();

            let mut report =
                DashboardReport::new(ReportMeta::now(&experiments.join(", "), Some(metric)));
            report.push_charts(
                "Experiment Comparison",
                compare_experiments(&borrowed, metric),
            );
            emit_report(&report, format, cli.output.as_deref())
        }
        Commands::Explain { experiment } => {
            let client = BackendClient::new(&config.backend.url);
            let explanation = client.explain_experiment(experiment)?;
            let mut report = DashboardReport::new(ReportMeta::now(experiment, None));
            report.push_panel(
                "Experiment Explanation",
                PanelBody::Text {
                    content: explanation,
                },
            );
            emit_report(&report, format, cli.output.as_deref())
        }
        Commands::InitConfig => {
            println!("{}", TrialscopeConfig::default_toml());
            Ok(())
        }
    }
}

fn open_source(config: &TrialscopeConfig) -> anyhow::Result<Box<dyn ExperimentSource>> {
    match config.source.kind {
        SourceKind::Sqlite => {
            let store = ResultsStore::open(Path::new(&config.storage.path))?;
            Ok(Box::new(store))
        }
        SourceKind::Http => Ok(Box::new(BackendClient::new(&config.backend.url))),
    }
}

fn resolve_report_options(
    config: &TrialscopeConfig,
    metric: &str,
    top_n: Option<usize>,
    configs: Option<&[String]>,
) -> anyhow::Result<ReportOptions> {
    let pairwise = resolve_pairwise(config, None, None)?;
    let configs = match configs {
        Some([a, b]) => Some((parse_key(a), parse_key(b))),
        Some(other) => anyhow::bail!("--configs takes exactly two ids, got {}", other.len()),
        None => None,
    };
    Ok(ReportOptions {
        metric: Regex::new(metric).with_context(|| format!("invalid metric regex '{metric}'"))?,
        top_n: top_n.unwrap_or(config.analysis.top_n),
        configs,
        pairwise,
        group_col: config.analysis.group_col.clone(),
    })
}

fn resolve_pairwise(
    config: &TrialscopeConfig,
    test: Option<&str>,
    alpha: Option<f64>,
) -> anyhow::Result<PairwiseConfig> {
    let test: TestKind = test.unwrap_or(&config.analysis.test).parse()?;
    let pairwise = PairwiseConfig {
        test,
        alpha: alpha.unwrap_or(config.analysis.alpha),
    };
    pairwise.validate()?;
    Ok(pairwise)
}

#[allow(clippy::too_many_arguments)]
fn stats_report(
    config: &TrialscopeConfig,
    frame: &ResultsFrame,
    experiment: &str,
    metric: &str,
    test: Option<&str>,
    alpha: Option<f64>,
    group_col: Option<&str>,
) -> anyhow::Result<DashboardReport> {
    let pairwise = resolve_pairwise(config, test, alpha)?;
    let selector =
        Regex::new(metric).with_context(|| format!("invalid metric regex '{metric}'"))?;
    let metric = select_metric(frame, &selector)
        .with_context(|| format!("no result column matches metric selector '{selector}'"))?;
    let group_col = group_col.unwrap_or(&config.analysis.group_col);

    let comparisons =
        trialscope_stats::run_pairwise_tests(frame, &metric, group_col, &pairwise)?;

    let mut report = DashboardReport::new(ReportMeta::now(experiment, Some(&metric)));
    report.push_panel(
        format!("Pairwise Significance ({})", pairwise.test),
        PanelBody::Table(pairwise_table(&comparisons)),
    );
    Ok(report)
}

fn emit_report(
    report: &DashboardReport,
    format: OutputFormat,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let rendered = match format {
        OutputFormat::Json => generate_json_report(report)?,
        OutputFormat::Html => generate_html_report(report),
        OutputFormat::Human => format_human_output(report),
    };

    match output {
        Some(path) => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            file.write_all(rendered.as_bytes())?;
            info!(path = %path.display(), "report written");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trialscope_frame::{well_known, Column};

    fn sample_frame() -> ResultsFrame {
        let mut f = ResultsFrame::new();
        f.push_column(
            well_known::TRIAL_ID,
            Column::Int((1..=4).map(Some).collect()),
        )
        .unwrap();
        f.push_column(
            well_known::TUNABLE_CONFIG_ID,
            Column::Int(vec![Some(1), Some(1), Some(2), Some(2)]),
        )
        .unwrap();
        f.push_column(
            "result.latency",
            Column::Float(vec![Some(10.0), Some(11.0), Some(20.0), Some(21.0)]),
        )
        .unwrap();
        f
    }

    #[test]
    fn test_cli_parses_report_with_configs() {
        let cli = Cli::parse_from([
            "trialscope",
            "--format",
            "json",
            "report",
            "exp-1",
            "--metric",
            "latency",
            "--configs",
            "3,7",
        ]);
        match cli.command {
            Commands::Report { configs, .. } => {
                assert_eq!(configs.unwrap(), vec!["3", "7"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_pairwise_rejects_bad_alpha() {
        let config = TrialscopeConfig::default();
        assert!(resolve_pairwise(&config, None, Some(0.5)).is_err());
        assert!(resolve_pairwise(&config, None, Some(0.01)).is_ok());
    }

    #[test]
    fn test_resolve_pairwise_cli_overrides_config() {
        let mut config = TrialscopeConfig::default();
        config.analysis.test = "mannwhitney".to_string();
        let from_config = resolve_pairwise(&config, None, None).unwrap();
        assert_eq!(from_config.test, TestKind::Mannwhitney);
        let overridden = resolve_pairwise(&config, Some("ttest"), None).unwrap();
        assert_eq!(overridden.test, TestKind::Ttest);
    }

    #[test]
    fn test_stats_report_builds_table() {
        let config = TrialscopeConfig::default();
        let frame = sample_frame();
        let report =
            stats_report(&config, &frame, "exp-1", "latency", None, None, None).unwrap();
        assert_eq!(report.summary.total_panels, 1);
        assert_eq!(report.meta.target_column.as_deref(), Some("result.latency"));
    }

    #[test]
    fn test_stats_report_unknown_metric() {
        let config = TrialscopeConfig::default();
        let frame = sample_frame();
        assert!(
            stats_report(&config, &frame, "exp-1", "throughput", None, None, None).is_err()
        );
    }
}
