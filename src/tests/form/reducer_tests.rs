use crate::{
    app::validate,
    domain::PipelineSchema,
    form::{
        EntryField, FormCommand, FormEffect, FormState, KubernetesLabels, ListKind, SchemaBinding,
        SchemaKey, TimeoutKind, reduce,
    },
    tests::support::{build_schema, deploy_schema},
};

fn apply(state: &FormState, command: FormCommand) -> FormState {
    reduce(state, command, &KubernetesLabels).state
}

fn bound(namespace: &str, pipeline: &str, schema: PipelineSchema) -> FormState {
    let state = FormState::new(namespace, "");
    let transition = reduce(
        &state,
        FormCommand::SetPipelineRef(pipeline.to_string()),
        &KubernetesLabels,
    );
    assert_eq!(
        transition.effects,
        vec![FormEffect::FetchSchema(SchemaKey::new(pipeline, namespace))]
    );
    apply(
        &transition.state,
        FormCommand::SchemaLoaded {
            key: SchemaKey::new(pipeline, namespace),
            schema,
        },
    )
}

fn valid_build_state() -> FormState {
    let state = bound("dev", "build", build_schema());
    let state = apply(
        &state,
        FormCommand::SetParam {
            name: "message".into(),
            value: "hello".into(),
        },
    );
    apply(
        &state,
        FormCommand::SetResource {
            name: "source".into(),
            value: "repo".into(),
        },
    )
}

#[test]
fn reduce_leaves_the_prior_snapshot_untouched() {
    let prior = FormState::new("dev", "");
    let transition = reduce(&prior, FormCommand::AddEntry(ListKind::Labels), &KubernetesLabels);
    assert!(prior.labels.is_empty());
    assert_eq!(transition.state.labels.len(), 1);
}

#[test]
fn schema_binding_replaces_field_sets() {
    let state = bound("dev", "build", build_schema());
    assert_eq!(
        state.params.keys().collect::<Vec<_>>(),
        vec!["revision", "message"]
    );
    assert_eq!(state.params["revision"], "main");
    assert_eq!(state.resources.keys().collect::<Vec<_>>(), vec!["source"]);

    let mut edited = apply(
        &state,
        FormCommand::SetParam {
            name: "message".into(),
            value: "hi".into(),
        },
    );
    edited = apply(&edited, FormCommand::AddEntry(ListKind::Labels));
    edited = apply(&edited, FormCommand::SetRunName("nightly".into()));
    edited = apply(
        &edited,
        FormCommand::SetTimeout(TimeoutKind::Tasks, "10m".into()),
    );
    edited = apply(&edited, FormCommand::SetServiceAccount("builder".into()));

    let switched = apply(&edited, FormCommand::SetPipelineRef("deploy".into()));
    assert!(switched.params.is_empty());
    assert!(switched.resources.is_empty());
    assert!(switched.labels.is_empty());
    assert!(switched.pipeline_run_name.is_empty());
    assert!(switched.service_account.is_empty());
    assert!(switched.timeouts.tasks.is_empty());
    assert_eq!(switched.namespace, "dev");

    let rebound = apply(
        &switched,
        FormCommand::SchemaLoaded {
            key: SchemaKey::new("deploy", "dev"),
            schema: deploy_schema(),
        },
    );
    assert_eq!(rebound.params.keys().collect::<Vec<_>>(), vec!["target"]);
    assert!(rebound.resources.is_empty());
}

#[test]
fn clearing_the_pipeline_resets_but_keeps_namespace() {
    let mut state = valid_build_state();
    state = apply(&state, FormCommand::SetPendingStatus(true));
    let cleared = apply(&state, FormCommand::SetPipelineRef(String::new()));
    assert_eq!(cleared.namespace, "dev");
    assert!(cleared.pipeline_ref.is_empty());
    assert!(cleared.params.is_empty());
    assert!(!cleared.pipeline_pending_status);
    assert_eq!(cleared.schema, SchemaBinding::default());
}

#[test]
fn namespace_change_clears_pipeline() {
    let state = valid_build_state();
    let moved = apply(&state, FormCommand::SetNamespace("prod".into()));
    assert_eq!(moved.namespace, "prod");
    assert!(moved.pipeline_ref.is_empty());
    assert!(moved.params.is_empty());

    let same = apply(&state, FormCommand::SetNamespace("dev".into()));
    assert_eq!(same, state);
}

#[test]
fn schema_for_another_pipeline_is_ignored() {
    let state = apply(
        &FormState::new("dev", ""),
        FormCommand::SetPipelineRef("deploy".into()),
    );
    let after = apply(
        &state,
        FormCommand::SchemaLoaded {
            key: SchemaKey::new("build", "dev"),
            schema: build_schema(),
        },
    );
    assert!(after.params.is_empty());
    assert!(after.schema.is_loading());
}

#[test]
fn unavailable_schema_leaves_the_form_usable() {
    let state = apply(
        &FormState::new("dev", ""),
        FormCommand::SetPipelineRef("ghost".into()),
    );
    let state = apply(
        &state,
        FormCommand::SchemaUnavailable {
            key: SchemaKey::new("ghost", "dev"),
            message: "Pipeline ghost not found".into(),
        },
    );
    assert_eq!(state.schema.unavailable_reason(), Some("Pipeline ghost not found"));
    let state = apply(&state, FormCommand::AddEntry(ListKind::Labels));
    assert_eq!(state.labels.len(), 1);
}

#[test]
fn undeclared_params_are_not_added() {
    let state = bound("dev", "build", build_schema());
    let after = apply(
        &state,
        FormCommand::SetParam {
            name: "unknown".into(),
            value: "x".into(),
        },
    );
    assert!(!after.params.contains_key("unknown"));
    assert_eq!(after.params, state.params);
}

#[test]
fn submit_without_pipeline_is_a_noop() {
    let state = FormState::new("dev", "");
    let transition = reduce(&state, FormCommand::Submit, &KubernetesLabels);
    assert!(transition.effects.is_empty());
    let next = transition.state;
    assert!(next.validation.valid_namespace);
    assert!(!next.validation.valid_pipeline_ref);
    assert!(!next.validation.is_valid());
    assert!(next.validation_failed);
    assert!(!next.creating);
}

#[test]
fn valid_submit_requests_creation() {
    let state = valid_build_state();
    let transition = reduce(&state, FormCommand::Submit, &KubernetesLabels);
    let next = transition.state;
    assert!(next.creating);
    assert!(!next.validation_failed);
    match transition.effects.as_slice() {
        [FormEffect::CreateRun(payload)] => {
            assert_eq!(payload.pipeline_name, "build");
            assert_eq!(payload.params["message"], "hello");
            assert_eq!(payload.node_selector, None);
        }
        other => panic!("unexpected effects {other:?}"),
    }

    let again = reduce(&next, FormCommand::Submit, &KubernetesLabels);
    assert!(again.effects.is_empty());
    assert_eq!(again.state, next);
}

#[test]
fn submit_error_survives_edits_until_dismissed_or_resubmitted() {
    let mut state = valid_build_state();
    state.creating = true;
    let failed = apply(
        &state,
        FormCommand::SubmitFailed("already exists (error code 409)".into()),
    );
    assert!(!failed.creating);
    assert_eq!(failed.params, state.params);

    let edited = apply(&failed, FormCommand::SetRunName("retry".into()));
    assert!(edited.submit_error.is_some());

    let dismissed = apply(&edited, FormCommand::DismissSubmitError);
    assert_eq!(dismissed.submit_error, None);

    let retried = apply(&edited, FormCommand::Submit);
    assert_eq!(retried.submit_error, None);
    assert!(retried.creating);
}

#[test]
fn resubmitting_clears_fixed_entries() {
    let state = valid_build_state();
    let state = apply(&state, FormCommand::AddEntry(ListKind::NodeSelector));
    let id = state.node_selector.entries()[0].id.clone();
    let state = apply(
        &state,
        FormCommand::ChangeEntry {
            list: ListKind::NodeSelector,
            index: 0,
            field: EntryField::Key,
            value: "disk".into(),
        },
    );
    let failed = apply(&state, FormCommand::Submit);
    assert!(failed.validation_failed);
    assert!(failed.node_selector.is_invalid(&id, EntryField::Value));
    assert!(!failed.node_selector.is_invalid(&id, EntryField::Key));
    assert!(failed.labels.invalid().is_empty());

    let fixed = apply(
        &failed,
        FormCommand::ChangeEntry {
            list: ListKind::NodeSelector,
            index: 0,
            field: EntryField::Value,
            value: "ssd".into(),
        },
    );
    let resubmitted = apply(&fixed, FormCommand::Submit);
    assert!(!resubmitted.validation_failed);
    assert!(resubmitted.node_selector.invalid().is_empty());
    assert!(resubmitted.creating);
}

#[test]
fn removed_entries_never_reappear_in_validation() {
    let state = valid_build_state();
    let state = apply(&state, FormCommand::AddEntry(ListKind::Labels));
    let state = apply(&state, FormCommand::AddEntry(ListKind::Labels));
    let removed_id = state.labels.entries()[0].id.clone();
    let state = apply(
        &state,
        FormCommand::ChangeEntry {
            list: ListKind::Labels,
            index: 0,
            field: EntryField::Key,
            value: "bad key!".into(),
        },
    );
    let state = apply(&state, FormCommand::RemoveEntry(ListKind::Labels, 0));
    assert!(state.labels.invalid().is_empty());

    let result = validate(&state, state.schema.param_specs(), &KubernetesLabels);
    assert!(
        result
            .invalid_labels
            .keys()
            .all(|flag| !flag.starts_with(&format!("{removed_id}-")))
    );
}

#[test]
fn lists_do_not_affect_each_other() {
    let state = FormState::new("dev", "build");
    let state = apply(&state, FormCommand::AddEntry(ListKind::Labels));
    let state = apply(&state, FormCommand::AddEntry(ListKind::NodeSelector));
    let state = apply(
        &state,
        FormCommand::ChangeEntry {
            list: ListKind::Labels,
            index: 0,
            field: EntryField::Key,
            value: "bad key!".into(),
        },
    );
    assert_eq!(state.labels.invalid().len(), 1);
    assert!(state.node_selector.invalid().is_empty());
    let state = apply(&state, FormCommand::RemoveEntry(ListKind::NodeSelector, 0));
    assert_eq!(state.labels.invalid().len(), 1);
    assert!(state.node_selector.is_empty());
}

#[test]
fn entry_ids_survive_a_pipeline_reset() {
    let state = FormState::new("dev", "");
    let state = apply(&state, FormCommand::AddEntry(ListKind::Labels));
    let first = state.labels.entries()[0].id.clone();
    let state = apply(&state, FormCommand::SetPipelineRef("build".into()));
    let state = apply(&state, FormCommand::AddEntry(ListKind::Labels));
    assert_ne!(state.labels.entries()[0].id, first);
}

#[test]
fn entry_edits_after_a_failed_submit_refresh_the_stored_result() {
    let state = valid_build_state();
    let state = apply(&state, FormCommand::AddEntry(ListKind::Labels));
    let state = apply(
        &state,
        FormCommand::ChangeEntry {
            list: ListKind::Labels,
            index: 0,
            field: EntryField::Key,
            value: "bad key!".into(),
        },
    );
    let failed = apply(&state, FormCommand::Submit);
    assert!(failed.validation_failed);
    assert_eq!(failed.validation.invalid_labels.len(), 2);

    let removed = apply(&failed, FormCommand::RemoveEntry(ListKind::Labels, 0));
    assert!(removed.labels.invalid().is_empty());
    assert!(removed.validation.invalid_labels.is_empty());
    assert!(!removed.validation_failed);

    let fixed = apply(
        &failed,
        FormCommand::ChangeEntry {
            list: ListKind::Labels,
            index: 0,
            field: EntryField::Key,
            value: "team".into(),
        },
    );
    assert_eq!(
        fixed.validation.invalid_labels.keys().collect::<Vec<_>>(),
        fixed.labels.invalid().keys().collect::<Vec<_>>()
    );
    assert!(fixed.validation_failed, "empty value is still flagged");
}
