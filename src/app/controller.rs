use std::mem;

use anyhow::Result;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    domain::PipelineSchema,
    form::{
        FormCommand, FormEffect, FormState, KubernetesLabels, LabelSyntax, Transition, reduce,
    },
    io::{
        QueryParams, RunPayload, build_payload, decode, encode, render_manifest, serialize_value,
        to_document,
    },
};

use super::{
    lookup::{LookupError, PipelineLookup, SchemaRequest},
    navigation::{NavigationTarget, listing_target},
    options::ControllerOptions,
    status::StatusLine,
    submission::{CreateRunError, RunClient, SubmissionOutcome, SubmitBlocked, send_payload},
};

/// Work the host performs on the controller's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Rewrite the current URL's query string (no leading `?`) without reloading.
    ReplaceUrl(String),
    FetchSchema(SchemaRequest),
    CreateRun(RunPayload),
    Navigate(NavigationTarget),
}

/// One "create run" session: owns the form and its URL mirror.
#[derive(Debug)]
pub struct CreateRunController<S = KubernetesLabels> {
    state: FormState,
    query: QueryParams,
    options: ControllerOptions,
    syntax: S,
    schema_generation: u64,
    pending_schema: Option<SchemaRequest>,
}

impl CreateRunController<KubernetesLabels> {
    /// Start a session from the current query string.
    pub fn mount(query: &str, options: ControllerOptions) -> (Self, Vec<Effect>) {
        Self::mount_with_syntax(query, options, KubernetesLabels)
    }
}

impl<S: LabelSyntax> CreateRunController<S> {
    pub fn mount_with_syntax(
        query: &str,
        options: ControllerOptions,
        syntax: S,
    ) -> (Self, Vec<Effect>) {
        let query = QueryParams::parse(query);
        let seed = decode(&query);
        let namespace = seed
            .namespace
            .unwrap_or_else(|| options.initial_namespace());
        let mut state = FormState::new(namespace, "");
        state.mode = seed.mode;

        let mut controller = Self {
            state,
            query,
            options,
            syntax,
            schema_generation: 0,
            pending_schema: None,
        };
        let effects = match seed.pipeline_ref {
            Some(pipeline_ref) => controller.dispatch(FormCommand::SetPipelineRef(pipeline_ref)),
            None => Vec::new(),
        };
        debug!(
            namespace = %controller.state.namespace,
            pipeline = %controller.state.pipeline_ref,
            "create run form mounted"
        );
        (controller, effects)
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    /// Current query string, without a leading `?`.
    pub fn location(&self) -> String {
        self.query.to_query_string()
    }

    pub fn status(&self) -> StatusLine {
        StatusLine::from_state(&self.state)
    }

    pub fn pending_schema(&self) -> Option<&SchemaRequest> {
        self.pending_schema.as_ref()
    }

    /// Apply one command and translate its consequences into host effects.
    pub fn dispatch(&mut self, command: FormCommand) -> Vec<Effect> {
        let Transition {
            state,
            effects: form_effects,
        } = reduce(&self.state, command, &self.syntax);
        let prior = mem::replace(&mut self.state, state);

        let mut effects = Vec::new();
        if (prior.pipeline_ref != self.state.pipeline_ref
            || prior.namespace != self.state.namespace
            || prior.mode != self.state.mode)
            && let Some(query) = self.sync_query()
        {
            effects.push(Effect::ReplaceUrl(query));
        }
        if prior.schema.key() != self.state.schema.key() {
            self.pending_schema = None;
        }

        for effect in form_effects {
            match effect {
                FormEffect::FetchSchema(key) => {
                    self.schema_generation += 1;
                    let request = SchemaRequest {
                        generation: self.schema_generation,
                        key,
                    };
                    debug!(
                        pipeline = %request.key.name,
                        namespace = %request.key.namespace,
                        generation = request.generation,
                        "requesting pipeline schema"
                    );
                    self.pending_schema = Some(request.clone());
                    effects.push(Effect::FetchSchema(request));
                }
                FormEffect::CreateRun(payload) => effects.push(Effect::CreateRun(payload)),
                FormEffect::RunCreated => effects.push(Effect::Navigate(self.success_target())),
            }
        }
        effects
    }

    /// Bind the result of a schema lookup, unless a newer lookup superseded it.
    pub fn apply_schema(
        &mut self,
        request: &SchemaRequest,
        result: Result<PipelineSchema, LookupError>,
    ) -> Vec<Effect> {
        if self.pending_schema.as_ref() != Some(request) {
            debug!(
                pipeline = %request.key.name,
                generation = request.generation,
                "discarding stale pipeline schema response"
            );
            return Vec::new();
        }
        self.pending_schema = None;
        let key = request.key.clone();
        let command = match result {
            Ok(schema) => {
                info!(
                    pipeline = %key.name,
                    params = schema.params.len(),
                    resources = schema.resources.len(),
                    "pipeline schema bound"
                );
                FormCommand::SchemaLoaded { key, schema }
            }
            Err(err) => {
                warn!(pipeline = %key.name, error = %err, "pipeline schema unavailable");
                FormCommand::SchemaUnavailable {
                    key,
                    message: err.to_string(),
                }
            }
        };
        self.dispatch(command)
    }

    /// Perform a schema lookup and bind its result.
    pub async fn load_schema(
        &mut self,
        request: SchemaRequest,
        lookup: &dyn PipelineLookup,
    ) -> Vec<Effect> {
        let result = lookup
            .get_pipeline(&request.key.name, &request.key.namespace)
            .await;
        self.apply_schema(&request, result)
    }

    /// Validate and, when the form is valid, mark it as creating.
    ///
    /// Returns the payload to send; the caller reports back through
    /// [`finish_submit`](Self::finish_submit).
    pub fn begin_submit(&mut self) -> Result<RunPayload, SubmitBlocked> {
        if self.state.creating {
            return Err(SubmitBlocked::InFlight);
        }
        self.dispatch(FormCommand::Submit)
            .into_iter()
            .find_map(|effect| match effect {
                Effect::CreateRun(payload) => Some(payload),
                _ => None,
            })
            .ok_or(SubmitBlocked::Invalid {
                issues: self.state.validation.issue_count(),
            })
    }

    pub fn finish_submit(&mut self, result: Result<(), CreateRunError>) -> SubmissionOutcome {
        match result {
            Ok(()) => {
                let target = self
                    .dispatch(FormCommand::SubmitSucceeded)
                    .into_iter()
                    .find_map(|effect| match effect {
                        Effect::Navigate(target) => Some(target),
                        _ => None,
                    })
                    .unwrap_or_else(|| self.success_target());
                info!(destination = %target, "run created");
                SubmissionOutcome::Navigate(target)
            }
            Err(err) => {
                let message = err.display_message();
                self.dispatch(FormCommand::SubmitFailed(message.clone()));
                SubmissionOutcome::Failed(message)
            }
        }
    }

    /// Run the whole submission against `client`.
    pub async fn submit(
        &mut self,
        client: &dyn RunClient,
    ) -> Result<SubmissionOutcome, SubmitBlocked> {
        let payload = self.begin_submit()?;
        let result = send_payload(client, &payload).await;
        Ok(self.finish_submit(result))
    }

    /// Where "cancel" leads. Refused while a run is being created.
    pub fn cancel(&self) -> Option<NavigationTarget> {
        if self.state.creating {
            return None;
        }
        Some(listing_target(
            &self.state.pipeline_ref,
            &self.state.namespace,
            &self.options.all_namespaces,
        ))
    }

    /// Structural preview of the submission payload.
    pub fn document(&self) -> Value {
        to_document(&self.state)
    }

    /// The run manifest rendered in the configured document format.
    pub fn document_text(&self) -> Result<String> {
        let manifest = render_manifest(&build_payload(&self.state), &self.options.api_version);
        serialize_value(&manifest, self.options.document_format, true)
    }

    fn success_target(&self) -> NavigationTarget {
        NavigationTarget::RunsByNamespace {
            namespace: self.state.namespace.clone(),
        }
    }

    fn sync_query(&mut self) -> Option<String> {
        let before = self.query.to_query_string();
        encode(&self.state, &mut self.query);
        let after = self.query.to_query_string();
        (before != after).then_some(after)
    }
}
