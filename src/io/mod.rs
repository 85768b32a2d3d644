mod document;
mod format;
mod input;
mod output;
mod payload;
mod query;

pub use document::{DEFAULT_API_VERSION, RUN_KIND, render_manifest, to_document};
pub use format::DocumentFormat;
pub use input::parse_document_str;
pub use output::{OutputDestination, OutputOptions, emit, serialize_value};
pub use payload::{PendingStatus, RunPayload, build_payload};
pub use query::{
    DOCUMENT_MODE_VALUE, MODE_PARAM, NAMESPACE_PARAM, PIPELINE_NAME_PARAM, QueryParams,
    QuerySeed, decode, encode,
};
