//! Configuration loading from trialscope.toml
//!
//! Configuration can be specified in a `trialscope.toml` file in the
//! project root. The file is discovered by walking up from the current
//! directory; CLI flags override whatever it says.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Trialscope configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrialscopeConfig {
    /// Result source selection
    #[serde(default)]
    pub source: SourceConfig,
    /// Local SQLite store
    #[serde(default)]
    pub storage: StorageConfig,
    /// Remote analysis backend
    #[serde(default)]
    pub backend: BackendConfig,
    /// Statistical defaults
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Which adapter serves experiment results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// Local SQLite database (default)
    #[default]
    Sqlite,
    /// Remote HTTP backend
    Http,
}

/// Result source selection
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SourceConfig {
    /// "sqlite" or "http"
    #[serde(default)]
    pub kind: SourceKind,
}

/// Local SQLite store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the results database
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> String {
    "trialscope.db".to_string()
}

/// Remote analysis backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend
    #[serde(default = "default_backend_url")]
    pub url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
        }
    }
}

fn default_backend_url() -> String {
    "http://localhost:8000".to_string()
}

/// Statistical defaults, overridable per invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Significance level for pairwise tests
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Default test: "ttest" or "mannwhitney"
    #[serde(default = "default_test")]
    pub test: String,
    /// Top/bottom group count in ranked charts
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Grouping column for pairwise tests
    #[serde(default = "default_group_col")]
    pub group_col: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            test: default_test(),
            top_n: default_top_n(),
            group_col: default_group_col(),
        }
    }
}

fn default_alpha() -> f64 {
    trialscope_stats::DEFAULT_ALPHA
}
fn default_test() -> String {
    "ttest".to_string()
}
fn default_top_n() -> usize {
    5
}
fn default_group_col() -> String {
    trialscope_frame::well_known::TUNABLE_CONFIG_ID.to_string()
}

impl TrialscopeConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("trialscope.toml");
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# Trialscope Configuration

[source]
# Where experiment results come from: "sqlite" or "http"
kind = "sqlite"

[storage]
# Path to the local results database
path = "trialscope.db"

[backend]
# Base URL of the analysis backend (results + explanations)
url = "http://localhost:8000"

[analysis]
# Significance level for pairwise tests (0.001 to 0.1)
alpha = 0.05
# Default two-sample test: "ttest" or "mannwhitney"
test = "ttest"
# Top/bottom group count in ranked charts
top_n = 5
# Grouping column for pairwise tests
group_col = "tunable_config_id"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrialscopeConfig::default();
        assert_eq!(config.source.kind, SourceKind::Sqlite);
        assert_eq!(config.storage.path, "trialscope.db");
        assert!((config.analysis.alpha - 0.05).abs() < f64::EPSILON);
        assert_eq!(config.analysis.group_col, "tunable_config_id");
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [source]
            kind = "http"

            [backend]
            url = "http://analysis.internal:9000"

            [analysis]
            alpha = 0.01
        "#;

        let config: TrialscopeConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.source.kind, SourceKind::Http);
        assert_eq!(config.backend.url, "http://analysis.internal:9000");
        assert!((config.analysis.alpha - 0.01).abs() < f64::EPSILON);
        // Defaults should still apply
        assert_eq!(config.analysis.test, "ttest");
        assert_eq!(config.analysis.top_n, 5);
    }

    #[test]
    fn test_default_toml_parses() {
        let default_toml = TrialscopeConfig::default_toml();
        let config: TrialscopeConfig = toml::from_str(&default_toml).unwrap();
        assert_eq!(config.backend.url, "http://localhost:8000");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trialscope.toml");
        std::fs::write(
            &path,
            "[storage]\npath = \"results/tuning.db\"\n\n[analysis]\ntest = \"mannwhitney\"\n",
        )
        .unwrap();

        let config = TrialscopeConfig::load(&path).unwrap();
        assert_eq!(config.storage.path, "results/tuning.db");
        assert_eq!(config.analysis.test, "mannwhitney");
        assert_eq!(config.source.kind, SourceKind::Sqlite);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(TrialscopeConfig::load(dir.path().join("trialscope.toml")).is_err());
    }
}
