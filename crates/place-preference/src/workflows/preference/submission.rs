use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use super::payload::SubmissionPayload;

/// Path of the sheet-backed submission endpoint.
pub const SUBMISSION_PATH: &str = "/api/submit-to-sheets";

/// Message surfaced when the endpoint fails without explaining why.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to submit data to Google Sheets";

/// Outbound collaborator receiving finished payloads.
pub trait SubmissionGateway: Send + Sync {
    fn submit(
        &self,
        payload: &SubmissionPayload,
    ) -> impl Future<Output = Result<(), SubmissionError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("submission transport failed: {0}")]
    Transport(String),
    #[error("submission client misconfigured: {0}")]
    Client(String),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// JSON POST client for the sheet endpoint.
#[derive(Debug, Clone)]
pub struct HttpSubmissionClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSubmissionClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SubmissionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| SubmissionError::Client(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl SubmissionGateway for HttpSubmissionClient {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<(), SubmissionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|err| SubmissionError::Transport(format!("{}: {err}", self.endpoint)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|parsed| parsed.message)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());

        warn!(endpoint = %self.endpoint, %status, %message, "submission rejected");
        Err(SubmissionError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
