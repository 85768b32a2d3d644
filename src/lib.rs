#![deny(rust_2018_idioms)]
//! Form-state controller for assembling and submitting pipeline runs.
//!
//! A [`CreateRunController`] owns one editing session. Hosts feed it
//! [`FormCommand`]s and perform the [`Effect`]s it returns: URL rewrites,
//! schema lookups, create requests and navigation.

mod app;
mod domain;
mod form;
mod io;

#[cfg(test)]
mod tests;

pub use app::{
    ALL_NAMESPACES, Banner, BannerKind, CREATING_STATUS, ControllerOptions, CreateRunController,
    CreateRunError, Effect, LOADING_STATUS, LookupError, NavigationTarget, PipelineLookup,
    RunClient, SchemaRequest, StatusLine, SubmissionOutcome, SubmitBlocked, VALIDATION_BANNER,
    ValidationResult, is_valid_run_name, listing_target, send_payload, validate,
};
pub use domain::{
    ParamSpec, ParamType, PipelineSchema, ResourceRef, ResourceSpec, parse_pipeline_schema,
    pipeline_schema_from_value,
};
pub use form::{
    BoundFields, EditMode, Entry, EntryField, FormCommand, FormEffect, FormState, InvalidEntries,
    KeyValueList, KubernetesLabels, LabelSyntax, ListKind, ResetPolicy, SchemaBinding, SchemaKey,
    SchemaStatus, TimeoutKind, Timeouts, Transition, bind_fields, entry_flag_key,
    namespace_transition, pipeline_transition, reduce,
};
pub use io::{
    DEFAULT_API_VERSION, DOCUMENT_MODE_VALUE, DocumentFormat, MODE_PARAM, NAMESPACE_PARAM,
    OutputDestination, OutputOptions, PIPELINE_NAME_PARAM, PendingStatus, QueryParams, QuerySeed,
    RUN_KIND, RunPayload, build_payload, decode as decode_query, emit, encode as encode_query,
    parse_document_str, render_manifest, serialize_value, to_document,
};

pub mod prelude {
    pub use super::{
        ControllerOptions, CreateRunController, Effect, EntryField, FormCommand, ListKind,
        SubmissionOutcome,
    };
}
