mod parser;
mod schema;

pub use parser::{parse_pipeline_schema, pipeline_schema_from_value};
pub use schema::{ParamSpec, ParamType, PipelineSchema, ResourceRef, ResourceSpec};
