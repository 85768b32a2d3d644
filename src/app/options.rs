use crate::io::{DEFAULT_API_VERSION, DocumentFormat};

use super::navigation::ALL_NAMESPACES;

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// Namespace used when the URL does not carry one.
    pub default_namespace: Option<String>,
    /// Token meaning "every namespace"; never used as a submission target.
    pub all_namespaces: String,
    pub document_format: DocumentFormat,
    pub api_version: String,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            default_namespace: None,
            all_namespaces: ALL_NAMESPACES.to_string(),
            document_format: DocumentFormat::default(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl ControllerOptions {
    pub fn with_default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = Some(namespace.into());
        self
    }

    pub fn with_all_namespaces(mut self, token: impl Into<String>) -> Self {
        self.all_namespaces = token.into();
        self
    }

    pub fn with_document_format(mut self, format: DocumentFormat) -> Self {
        self.document_format = format;
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// The namespace a fresh form starts in when the URL names none.
    pub(crate) fn initial_namespace(&self) -> String {
        self.default_namespace
            .as_deref()
            .filter(|namespace| *namespace != self.all_namespaces)
            .unwrap_or_default()
            .to_string()
    }
}
