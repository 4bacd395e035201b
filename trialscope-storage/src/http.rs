//! HTTP Backend Client
//!
//! Thin blocking client for the analysis backend:
//! - `GET /experiments`: known experiment ids
//! - `GET /experiment_results/{id}`: one JSON object per trial
//! - `POST /get_experiment_explanation`: generated explanation text
//!
//! The explanation endpoint is treated as a black box; whatever text
//! the backend produces is shown verbatim.

use crate::{ExperimentSource, StorageError};
use serde::{Deserialize, Serialize};
use tracing::debug;
use trialscope_frame::ResultsFrame;

/// Client for the experiment analysis backend.
pub struct BackendClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

#[derive(Serialize)]
struct ExplainRequest<'a> {
    experiment_id: &'a str,
}

#[derive(Deserialize)]
struct ExplainResponse {
    explanation: String,
}

impl BackendClient {
    /// Client for the backend at `base_url` (no trailing slash needed).
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn get_json(&self, endpoint: &str) -> Result<serde_json::Value, StorageError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, "fetching from backend");
        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::BackendStatus {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }
        let body = response.text()?;
        serde_json::from_str(&body).map_err(|source| StorageError::MalformedResponse {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    /// Ids of all experiments the backend knows about.
    pub fn experiments(&self) -> Result<Vec<String>, StorageError> {
        let value = self.get_json("experiments")?;
        serde_json::from_value(value).map_err(|source| StorageError::MalformedResponse {
            endpoint: "experiments".to_string(),
            source,
        })
    }

    /// All trial results of one experiment as a frame.
    pub fn experiment_results(&self, experiment_id: &str) -> Result<ResultsFrame, StorageError> {
        let endpoint = format!("experiment_results/{experiment_id}");
        let value = self.get_json(&endpoint)?;
        let records: Vec<serde_json::Value> =
            serde_json::from_value(value).map_err(|source| StorageError::MalformedResponse {
                endpoint,
                source,
            })?;
        Ok(ResultsFrame::from_json_records(&records)?)
    }

    /// Ask the backend for a natural-language explanation of an experiment.
    pub fn explain_experiment(&self, experiment_id: &str) -> Result<String, StorageError> {
        let endpoint = "get_experiment_explanation";
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, experiment_id, "requesting explanation");
        let response = self
            .client
            .post(&url)
            .json(&ExplainRequest { experiment_id })
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::BackendStatus {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }
        let body = response.text()?;
        let parsed: ExplainResponse =
            serde_json::from_str(&body).map_err(|source| StorageError::MalformedResponse {
                endpoint: endpoint.to_string(),
                source,
            })?;
        Ok(parsed.explanation)
    }
}

impl ExperimentSource for BackendClient {
    fn experiment_ids(&self) -> Result<Vec<String>, StorageError> {
        self.experiments()
    }

    fn results_frame(&self, experiment_id: &str) -> Result<ResultsFrame, StorageError> {
        self.experiment_results(experiment_id)
    }
}
