use tracing::{debug, info, warn};

use crate::{app::validate, io::build_payload};

use super::{
    actions::{FormCommand, FormEffect},
    labels::LabelSyntax,
    reset::{ResetPolicy, namespace_transition, pipeline_transition},
    schema_fields::{SchemaBinding, SchemaKey, bind_fields},
    state::{EditMode, FormState},
};

/// The snapshot that follows a command, plus the work it asks for.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: FormState,
    pub effects: Vec<FormEffect>,
}

/// Apply one command to an immutable snapshot, producing the next one.
pub fn reduce(prior: &FormState, command: FormCommand, syntax: &dyn LabelSyntax) -> Transition {
    let mut next = prior.clone();
    let mut effects = Vec::new();
    match command {
        FormCommand::SetNamespace(namespace) => {
            if namespace_transition(&prior.namespace, &namespace) == ResetPolicy::ClearPipeline {
                next.namespace = namespace;
                next.pipeline_ref.clear();
                next.reset_sub_form();
            }
        }
        FormCommand::SetPipelineRef(pipeline_ref) => {
            if pipeline_transition(&prior.pipeline_ref, &pipeline_ref) == ResetPolicy::ResetSubForm
            {
                next.pipeline_ref = pipeline_ref;
                next.reset_sub_form();
                if !next.pipeline_ref.is_empty() {
                    let key = SchemaKey::new(&next.pipeline_ref, &next.namespace);
                    next.schema = SchemaBinding::loading(key.clone());
                    effects.push(FormEffect::FetchSchema(key));
                }
            }
        }
        FormCommand::SetRunName(name) => next.pipeline_run_name = name,
        FormCommand::SetServiceAccount(account) => next.service_account = account,
        FormCommand::SetTimeout(kind, value) => next.timeouts.set(kind, value),
        FormCommand::SetPendingStatus(pending) => next.pipeline_pending_status = pending,
        FormCommand::SetParam { name, value } => match next.params.get_mut(&name) {
            Some(slot) => *slot = value,
            None => warn!(param = %name, "ignoring value for undeclared param"),
        },
        FormCommand::SetResource { name, value } => match next.resources.get_mut(&name) {
            Some(slot) => *slot = value,
            None => warn!(resource = %name, "ignoring value for undeclared resource"),
        },
        FormCommand::AddEntry(list) => {
            next.list_mut(list).add();
        }
        FormCommand::RemoveEntry(list, index) => {
            if next.list_mut(list).remove(index).is_none() {
                debug!(?list, index, "remove ignored, no entry at index");
            }
            next.sync_entry_flags(list);
        }
        FormCommand::ChangeEntry {
            list,
            index,
            field,
            value,
        } => {
            if !next.list_mut(list).change(index, field, value, syntax) {
                debug!(?list, index, "change ignored, no entry at index");
            }
            next.sync_entry_flags(list);
        }
        FormCommand::SwitchToDocument => next.mode = EditMode::Document,
        FormCommand::SchemaLoaded { key, schema } => {
            if next.schema.key() == Some(&key) {
                let fields = bind_fields(&schema);
                next.params = fields.params;
                next.resources = fields.resources;
                next.schema = SchemaBinding::bound(key, schema);
            } else {
                debug!(pipeline = %key.name, "schema for a superseded pipeline ignored");
            }
        }
        FormCommand::SchemaUnavailable { key, message } => {
            if next.schema.key() == Some(&key) {
                next.params.clear();
                next.resources.clear();
                next.schema = SchemaBinding::unavailable(key, message);
            }
        }
        FormCommand::Submit => submit(prior, &mut next, &mut effects, syntax),
        FormCommand::SubmitSucceeded => {
            next.creating = false;
            effects.push(FormEffect::RunCreated);
        }
        FormCommand::SubmitFailed(message) => {
            next.creating = false;
            next.submit_error = Some(message);
        }
        FormCommand::DismissSubmitError => next.submit_error = None,
    }
    Transition {
        state: next,
        effects,
    }
}

fn submit(
    prior: &FormState,
    next: &mut FormState,
    effects: &mut Vec<FormEffect>,
    syntax: &dyn LabelSyntax,
) {
    if prior.creating {
        debug!("submit ignored while a run is being created");
        return;
    }
    next.submit_error = None;
    next.submitted = true;

    let result = validate(next, next.schema.param_specs(), syntax);
    next.labels.replace_invalid(result.invalid_labels.clone());
    next.node_selector.replace_invalid(result.invalid_node_selector.clone());
    let valid = result.is_valid();
    let issues = result.issue_count();
    next.validation = result;
    if !valid {
        info!(issues, "run form failed validation");
        next.validation_failed = true;
        return;
    }

    next.validation_failed = false;
    next.creating = true;
    effects.push(FormEffect::CreateRun(build_payload(next)));
}
