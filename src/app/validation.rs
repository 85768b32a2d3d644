use std::sync::LazyLock;

use regex::Regex;

use crate::{
    domain::ParamSpec,
    form::{FormState, InvalidEntries, LabelSyntax},
};

const MAX_RUN_NAME_LEN: usize = 64;

static RUN_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9.]*[a-z0-9])?$").expect("run name pattern")
});

/// Outcome of a whole-form validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid_namespace: bool,
    pub valid_pipeline_ref: bool,
    pub valid_resources: bool,
    pub valid_params: bool,
    pub valid_pipeline_run_name: bool,
    pub invalid_labels: InvalidEntries,
    pub invalid_node_selector: InvalidEntries,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self {
            valid_namespace: true,
            valid_pipeline_ref: true,
            valid_resources: true,
            valid_params: true,
            valid_pipeline_run_name: true,
            invalid_labels: InvalidEntries::new(),
            invalid_node_selector: InvalidEntries::new(),
        }
    }
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.valid_namespace
            && self.valid_pipeline_ref
            && self.valid_resources
            && self.valid_params
            && self.valid_pipeline_run_name
            && self.invalid_labels.is_empty()
            && self.invalid_node_selector.is_empty()
    }

    /// Failed field checks plus flagged entry sides.
    pub fn issue_count(&self) -> usize {
        [
            self.valid_namespace,
            self.valid_pipeline_ref,
            self.valid_resources,
            self.valid_params,
            self.valid_pipeline_run_name,
        ]
        .iter()
        .filter(|valid| !**valid)
        .count()
            + self.invalid_labels.len()
            + self.invalid_node_selector.len()
    }
}

/// Run every rule against `state`; nothing short-circuits, so every
/// offending entry is reported in one pass.
pub fn validate(
    state: &FormState,
    param_specs: &[ParamSpec],
    syntax: &dyn LabelSyntax,
) -> ValidationResult {
    let valid_params = state.params.iter().all(|(name, value)| {
        !value.is_empty()
            || param_specs
                .iter()
                .find(|spec| &spec.name == name)
                .is_some_and(ParamSpec::has_default)
    });
    ValidationResult {
        valid_namespace: !state.namespace.is_empty(),
        valid_pipeline_ref: !state.pipeline_ref.is_empty(),
        valid_resources: state.resources.values().all(|value| !value.is_empty()),
        valid_params,
        valid_pipeline_run_name: state.pipeline_run_name.is_empty()
            || is_valid_run_name(&state.pipeline_run_name),
        invalid_labels: state.labels.check(syntax),
        invalid_node_selector: state.node_selector.check(syntax),
    }
}

/// DNS-subdomain style: lowercase alphanumerics, `-` and `.`, alphanumeric
/// at both ends, shorter than 64 characters.
pub fn is_valid_run_name(name: &str) -> bool {
    name.len() < MAX_RUN_NAME_LEN && RUN_NAME.is_match(name)
}
