mod actions;
mod key_value;
mod labels;
mod reducers;
mod reset;
mod schema_fields;
mod state;

pub use actions::{FormCommand, FormEffect};
pub use key_value::{Entry, InvalidEntries, KeyValueList, ListKind, entry_flag_key};
pub use labels::{EntryField, KubernetesLabels, LabelSyntax};
pub use reducers::{Transition, reduce};
pub use reset::{ResetPolicy, namespace_transition, pipeline_transition};
pub use schema_fields::{BoundFields, SchemaBinding, SchemaKey, SchemaStatus, bind_fields};
pub use state::{EditMode, FormState, TimeoutKind, Timeouts};
