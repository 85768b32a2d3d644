use serde_json::{Map, Value, json};

use crate::form::FormState;

use super::payload::{PendingStatus, RunPayload, build_payload};

pub const DEFAULT_API_VERSION: &str = "tekton.dev/v1beta1";
pub const RUN_KIND: &str = "PipelineRun";

/// Structural preview of what submitting `state` would send: the
/// serialized [`RunPayload`] itself.
pub fn to_document(state: &FormState) -> Value {
    json!(build_payload(state))
}

/// Render a payload as the declarative run manifest the cluster receives.
pub fn render_manifest(payload: &RunPayload, api_version: &str) -> Value {
    let mut metadata = Map::new();
    match &payload.pipeline_run_name {
        Some(name) => {
            metadata.insert("name".into(), json!(name));
        }
        None => {
            metadata.insert(
                "generateName".into(),
                json!(format!("{}-run-", payload.pipeline_name)),
            );
        }
    }
    metadata.insert("namespace".into(), json!(payload.namespace));
    if !payload.labels.is_empty() {
        metadata.insert("labels".into(), json!(payload.labels));
    }

    let mut spec = Map::new();
    spec.insert(
        "pipelineRef".into(),
        json!({ "name": payload.pipeline_name }),
    );
    if !payload.params.is_empty() {
        let params: Vec<Value> = payload
            .params
            .iter()
            .map(|(name, value)| json!({ "name": name, "value": value }))
            .collect();
        spec.insert("params".into(), Value::Array(params));
    }
    if !payload.resources.is_empty() {
        let resources: Vec<Value> = payload
            .resources
            .iter()
            .map(|(name, reference)| json!({ "name": name, "resourceRef": { "name": reference } }))
            .collect();
        spec.insert("resources".into(), Value::Array(resources));
    }
    if !payload.service_account.is_empty() {
        spec.insert("serviceAccountName".into(), json!(payload.service_account));
    }
    if let Some(selector) = &payload.node_selector {
        spec.insert("podTemplate".into(), json!({ "nodeSelector": selector }));
    }
    let timeouts: Map<String, Value> = [
        ("pipeline", &payload.timeouts_pipeline),
        ("tasks", &payload.timeouts_tasks),
        ("finally", &payload.timeouts_finally),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(key, value)| (key.to_string(), json!(value)))
    .collect();
    if !timeouts.is_empty() {
        spec.insert("timeouts".into(), Value::Object(timeouts));
    }
    if payload.pipeline_pending_status == PendingStatus::Pending {
        spec.insert("status".into(), json!(PendingStatus::Pending.as_str()));
    }

    json!({
        "apiVersion": api_version,
        "kind": RUN_KIND,
        "metadata": metadata,
        "spec": spec,
    })
}
