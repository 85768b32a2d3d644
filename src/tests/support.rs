use std::collections::HashMap;
use std::sync::Mutex;

use crate::{
    app::{CreateRunError, LookupError, PipelineLookup, RunClient},
    domain::{ParamSpec, PipelineSchema, ResourceSpec},
    io::RunPayload,
};

pub fn build_schema() -> PipelineSchema {
    PipelineSchema::new(
        vec![
            ParamSpec::new("revision").with_default("main"),
            ParamSpec::new("message"),
        ],
        vec![ResourceSpec::new("source").with_kind("git")],
    )
}

pub fn deploy_schema() -> PipelineSchema {
    PipelineSchema::new(vec![ParamSpec::new("target").with_default("staging")], Vec::new())
}

#[derive(Default)]
pub struct FakeLookup {
    schemas: HashMap<(String, String), PipelineSchema>,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl FakeLookup {
    pub fn with(mut self, name: &str, namespace: &str, schema: PipelineSchema) -> Self {
        self.schemas
            .insert((name.to_string(), namespace.to_string()), schema);
        self
    }
}

#[async_trait::async_trait]
impl PipelineLookup for FakeLookup {
    async fn get_pipeline(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<PipelineSchema, LookupError> {
        self.calls
            .lock()
            .unwrap()
            .push((name.to_string(), namespace.to_string()));
        self.schemas
            .get(&(name.to_string(), namespace.to_string()))
            .cloned()
            .ok_or_else(|| LookupError::NotFound {
                name: name.to_string(),
                namespace: namespace.to_string(),
            })
    }
}

pub struct FakeRunClient {
    response: Result<(), CreateRunError>,
    pub sent: Mutex<Vec<RunPayload>>,
}

impl FakeRunClient {
    pub fn accepting() -> Self {
        Self {
            response: Ok(()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting(status: u16, body: &str) -> Self {
        Self {
            response: Err(CreateRunError::Rejected {
                status,
                body: Some(body.to_string()),
            }),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl RunClient for FakeRunClient {
    async fn create_run(&self, payload: &RunPayload) -> Result<(), CreateRunError> {
        self.sent.lock().unwrap().push(payload.clone());
        self.response.clone()
    }
}
