/// What survives a change of pipeline reference or namespace.
///
/// | transition                               | policy          |
/// |------------------------------------------|-----------------|
/// | pipeline unchanged                       | `Keep`          |
/// | pipeline -> different non-empty pipeline | `ResetSubForm`  |
/// | pipeline -> empty                        | `ResetSubForm`  |
/// | namespace unchanged                      | `Keep`          |
/// | namespace -> different namespace         | `ClearPipeline` |
///
/// `ResetSubForm` keeps namespace, the new pipeline reference and the edit
/// mode; labels, node selector, params, resources, run name, service
/// account, timeouts, the pending flag and validation flags are cleared.
/// `ClearPipeline` does the same and also empties the pipeline reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetPolicy {
    Keep,
    ResetSubForm,
    ClearPipeline,
}

pub fn pipeline_transition(current: &str, next: &str) -> ResetPolicy {
    if current == next {
        ResetPolicy::Keep
    } else {
        ResetPolicy::ResetSubForm
    }
}

pub fn namespace_transition(current: &str, next: &str) -> ResetPolicy {
    if current == next {
        ResetPolicy::Keep
    } else {
        ResetPolicy::ClearPipeline
    }
}
