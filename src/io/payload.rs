use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::form::FormState;

/// Whether the run should be created in a pending (not yet started) state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingStatus {
    #[default]
    #[serde(rename = "")]
    Start,
    #[serde(rename = "PipelineRunPending")]
    Pending,
}

impl PendingStatus {
    pub fn from_flag(pending: bool) -> Self {
        if pending {
            PendingStatus::Pending
        } else {
            PendingStatus::Start
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PendingStatus::Start => "",
            PendingStatus::Pending => "PipelineRunPending",
        }
    }
}

/// The request body for creating a run.
///
/// `pipeline_run_name` of `None` asks the receiving system to generate a
/// name. `node_selector` of `None` means "no selector", which is not the
/// same as an empty selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunPayload {
    pub namespace: String,
    pub pipeline_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_run_name: Option<String>,
    pub params: IndexMap<String, String>,
    pub resources: IndexMap<String, String>,
    pub labels: IndexMap<String, String>,
    pub node_selector: Option<IndexMap<String, String>>,
    pub pipeline_pending_status: PendingStatus,
    pub service_account: String,
    pub timeouts_pipeline: String,
    pub timeouts_tasks: String,
    pub timeouts_finally: String,
}

pub fn build_payload(state: &FormState) -> RunPayload {
    let node_selector = if state.node_selector.is_empty() {
        None
    } else {
        Some(state.node_selector.to_map())
    };
    let pipeline_run_name = if state.pipeline_run_name.is_empty() {
        None
    } else {
        Some(state.pipeline_run_name.clone())
    };
    RunPayload {
        namespace: state.namespace.clone(),
        pipeline_name: state.pipeline_ref.clone(),
        pipeline_run_name,
        params: state.params.clone(),
        resources: state.resources.clone(),
        labels: state.labels.to_map(),
        node_selector,
        pipeline_pending_status: PendingStatus::from_flag(state.pipeline_pending_status),
        service_account: state.service_account.clone(),
        timeouts_pipeline: state.timeouts.pipeline.clone(),
        timeouts_tasks: state.timeouts.tasks.clone(),
        timeouts_finally: state.timeouts.finally.clone(),
    }
}
