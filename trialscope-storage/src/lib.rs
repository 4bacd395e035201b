#![warn(missing_docs)]
//! Trialscope Storage - Experiment Result Adapters
//!
//! Two ways to load trial results into a [`ResultsFrame`]:
//! - [`ResultsStore`]: local SQLite database of experiments, trials, and
//!   per-trial values
//! - [`BackendClient`]: remote HTTP backend serving tabular JSON and
//!   experiment explanations
//!
//! Both implement [`ExperimentSource`] so the dashboard can be pointed
//! at either without caring which.

mod http;
mod sqlite;

pub use http::BackendClient;
pub use sqlite::ResultsStore;

use trialscope_frame::ResultsFrame;

/// Errors from storage adapters
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// SQLite layer failure
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// HTTP transport failure
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("backend returned status {status} for {endpoint}")]
    BackendStatus {
        /// HTTP status code
        status: u16,
        /// Endpoint that was hit
        endpoint: String,
    },

    /// Response body could not be decoded
    #[error("malformed response from {endpoint}: {source}")]
    MalformedResponse {
        /// Endpoint that produced the body
        endpoint: String,
        /// Decode failure
        #[source]
        source: serde_json::Error,
    },

    /// No such experiment in the store
    #[error("unknown experiment: {0}")]
    UnknownExperiment(String),

    /// Loaded rows could not be assembled into a frame
    #[error(transparent)]
    Frame(#[from] trialscope_frame::FrameError),
}

/// A provider of experiment ids and their result frames.
///
/// The dashboard is written against this trait; the config decides
/// whether a [`ResultsStore`] or a [`BackendClient`] backs it.
pub trait ExperimentSource {
    /// Ids of all known experiments
    fn experiment_ids(&self) -> Result<Vec<String>, StorageError>;

    /// All trial results of one experiment as a frame
    fn results_frame(&self, experiment_id: &str) -> Result<ResultsFrame, StorageError>;
}
