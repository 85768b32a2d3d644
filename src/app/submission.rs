use serde_json::Value;
use tracing::{info, warn};

use crate::io::RunPayload;

use super::navigation::NavigationTarget;

/// Creates runs on the receiving system.
#[async_trait::async_trait]
pub trait RunClient: Send + Sync {
    async fn create_run(&self, payload: &RunPayload) -> Result<(), CreateRunError>;
}

/// Failure reported by a [`RunClient`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreateRunError {
    #[error("create request rejected with status {status}")]
    Rejected { status: u16, body: Option<String> },
    #[error("create request failed: {0}")]
    Transport(String),
}

impl CreateRunError {
    /// Text shown in the submit error banner.
    ///
    /// A rejection reads `"{message} (error code {status})"`, taking the
    /// `message` field of a JSON body when there is one, the raw body
    /// otherwise, and just `"error code {status}"` when the body is empty.
    pub fn display_message(&self) -> String {
        match self {
            CreateRunError::Rejected { status, body } => {
                match body.as_deref().and_then(extract_message) {
                    Some(message) => format!("{message} (error code {status})"),
                    None => format!("error code {status}"),
                }
            }
            CreateRunError::Transport(message) => message.clone(),
        }
    }
}

fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed)
        && let Some(Value::String(message)) = map.get("message")
        && !message.is_empty()
    {
        return Some(message.clone());
    }
    Some(trimmed.to_string())
}

/// Result of one submission: leave the form, or stay and show an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Navigate(NavigationTarget),
    Failed(String),
}

/// Why a submission never reached the network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitBlocked {
    #[error("a run is already being created")]
    InFlight,
    #[error("the form has {issues} invalid field(s)")]
    Invalid { issues: usize },
}

/// Issue the create request and log how it went.
pub async fn send_payload(
    client: &dyn RunClient,
    payload: &RunPayload,
) -> Result<(), CreateRunError> {
    info!(
        pipeline = %payload.pipeline_name,
        namespace = %payload.namespace,
        "creating run"
    );
    let result = client.create_run(payload).await;
    if let Err(err) = &result {
        warn!(error = %err, "run creation failed");
    }
    result
}
