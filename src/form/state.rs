use indexmap::IndexMap;

use crate::app::ValidationResult;

use super::{
    key_value::{KeyValueList, ListKind},
    schema_fields::SchemaBinding,
};

/// Which view of the form is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    Form,
    Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutKind {
    Pipeline,
    Tasks,
    Finally,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeouts {
    pub pipeline: String,
    pub tasks: String,
    pub finally: String,
}

impl Timeouts {
    pub fn get(&self, kind: TimeoutKind) -> &str {
        match kind {
            TimeoutKind::Pipeline => &self.pipeline,
            TimeoutKind::Tasks => &self.tasks,
            TimeoutKind::Finally => &self.finally,
        }
    }

    pub fn set(&mut self, kind: TimeoutKind, value: String) {
        match kind {
            TimeoutKind::Pipeline => self.pipeline = value,
            TimeoutKind::Tasks => self.tasks = value,
            TimeoutKind::Finally => self.finally = value,
        }
    }
}

/// Everything one "create run" session edits.
///
/// `params` and `resources` only ever hold names declared by the schema
/// bound in `schema`; they are rebuilt wholesale when that binding changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub namespace: String,
    pub pipeline_ref: String,
    pub pipeline_run_name: String,
    pub service_account: String,
    pub timeouts: Timeouts,
    pub pipeline_pending_status: bool,
    pub labels: KeyValueList,
    pub node_selector: KeyValueList,
    pub params: IndexMap<String, String>,
    pub resources: IndexMap<String, String>,
    pub schema: SchemaBinding,
    pub mode: EditMode,
    pub submitted: bool,
    pub creating: bool,
    pub submit_error: Option<String>,
    pub validation_failed: bool,
    pub validation: ValidationResult,
}

impl FormState {
    pub fn new(namespace: impl Into<String>, pipeline_ref: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            pipeline_ref: pipeline_ref.into(),
            ..Self::default()
        }
    }

    pub fn list(&self, kind: ListKind) -> &KeyValueList {
        match kind {
            ListKind::Labels => &self.labels,
            ListKind::NodeSelector => &self.node_selector,
        }
    }

    pub fn list_mut(&mut self, kind: ListKind) -> &mut KeyValueList {
        match kind {
            ListKind::Labels => &mut self.labels,
            ListKind::NodeSelector => &mut self.node_selector,
        }
    }

    /// Copy the entry flags of `kind` into the stored validation result.
    ///
    /// A failed submission stops counting as failed once no check remains
    /// invalid.
    pub(crate) fn sync_entry_flags(&mut self, kind: ListKind) {
        let flags = self.list(kind).invalid().clone();
        match kind {
            ListKind::Labels => self.validation.invalid_labels = flags,
            ListKind::NodeSelector => self.validation.invalid_node_selector = flags,
        }
        if self.validation_failed {
            self.validation_failed = !self.validation.is_valid();
        }
    }

    pub fn is_document_mode(&self) -> bool {
        self.mode == EditMode::Document
    }

    /// Clear the pipeline-dependent sub-form. Namespace, pipeline reference,
    /// edit mode and any pending submit error are left alone; list id
    /// counters keep counting.
    pub fn reset_sub_form(&mut self) {
        self.labels.clear();
        self.node_selector.clear();
        self.params.clear();
        self.resources.clear();
        self.schema = SchemaBinding::default();
        self.pipeline_run_name.clear();
        self.service_account.clear();
        self.timeouts = Timeouts::default();
        self.pipeline_pending_status = false;
        self.submitted = false;
        self.validation_failed = false;
        self.validation = ValidationResult::default();
    }
}
