use indexmap::IndexMap;

use crate::domain::{ParamSpec, PipelineSchema, ResourceRef};

/// Identity of a schema lookup: a pipeline is looked up by name within a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaKey {
    pub name: String,
    pub namespace: String,
}

impl SchemaKey {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SchemaStatus {
    #[default]
    Unbound,
    Loading,
    Bound,
    Unavailable(String),
}

/// The schema snapshot the form's params/resources are bound to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaBinding {
    key: Option<SchemaKey>,
    snapshot: PipelineSchema,
    status: SchemaStatus,
}

/// Fresh field maps derived from one schema snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundFields {
    pub params: IndexMap<String, String>,
    pub resources: IndexMap<String, String>,
}

/// Params start at their declared default (or empty); resources start unselected.
pub fn bind_fields(schema: &PipelineSchema) -> BoundFields {
    let params = schema
        .params
        .iter()
        .map(|spec| (spec.name.clone(), spec.default_text()))
        .collect();
    let resources = schema
        .resources
        .iter()
        .map(|spec| (spec.name.clone(), String::new()))
        .collect();
    BoundFields { params, resources }
}

impl SchemaBinding {
    pub fn loading(key: SchemaKey) -> Self {
        Self {
            key: Some(key),
            snapshot: PipelineSchema::default(),
            status: SchemaStatus::Loading,
        }
    }

    pub fn bound(key: SchemaKey, snapshot: PipelineSchema) -> Self {
        Self {
            key: Some(key),
            snapshot,
            status: SchemaStatus::Bound,
        }
    }

    pub fn unavailable(key: SchemaKey, message: impl Into<String>) -> Self {
        Self {
            key: Some(key),
            snapshot: PipelineSchema::default(),
            status: SchemaStatus::Unavailable(message.into()),
        }
    }

    pub fn key(&self) -> Option<&SchemaKey> {
        self.key.as_ref()
    }

    pub fn status(&self) -> &SchemaStatus {
        &self.status
    }

    pub fn snapshot(&self) -> &PipelineSchema {
        &self.snapshot
    }

    pub fn param_specs(&self) -> &[ParamSpec] {
        &self.snapshot.params
    }

    pub fn is_loading(&self) -> bool {
        self.status == SchemaStatus::Loading
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.status {
            SchemaStatus::Unavailable(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn declares_param(&self, name: &str) -> bool {
        self.snapshot.param(name).is_some()
    }

    pub fn declares_resource(&self, name: &str) -> bool {
        self.snapshot.resource(name).is_some()
    }

    /// Available resources whose type matches the declared resource type.
    ///
    /// A resource declared without a type accepts every candidate; an
    /// undeclared name accepts none.
    pub fn resource_choices<'a>(
        &self,
        name: &str,
        available: &'a [ResourceRef],
    ) -> Vec<&'a ResourceRef> {
        let Some(spec) = self.snapshot.resource(name) else {
            return Vec::new();
        };
        available
            .iter()
            .filter(|candidate| {
                spec.kind
                    .as_deref()
                    .is_none_or(|kind| kind == candidate.kind)
            })
            .collect()
    }
}
