use crate::domain::PipelineSchema;
use crate::io::RunPayload;

use super::{
    key_value::ListKind, labels::EntryField, schema_fields::SchemaKey, state::TimeoutKind,
};

/// One named user or network event applied to the form.
#[derive(Debug, Clone)]
pub enum FormCommand {
    SetNamespace(String),
    SetPipelineRef(String),
    SetRunName(String),
    SetServiceAccount(String),
    SetTimeout(TimeoutKind, String),
    SetPendingStatus(bool),
    SetParam {
        name: String,
        value: String,
    },
    SetResource {
        name: String,
        value: String,
    },
    AddEntry(ListKind),
    RemoveEntry(ListKind, usize),
    ChangeEntry {
        list: ListKind,
        index: usize,
        field: EntryField,
        value: String,
    },
    SwitchToDocument,
    SchemaLoaded {
        key: SchemaKey,
        schema: PipelineSchema,
    },
    SchemaUnavailable {
        key: SchemaKey,
        message: String,
    },
    Submit,
    SubmitSucceeded,
    SubmitFailed(String),
    DismissSubmitError,
}

/// Follow-up work a transition asks the owner to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEffect {
    FetchSchema(SchemaKey),
    CreateRun(RunPayload),
    RunCreated,
}
