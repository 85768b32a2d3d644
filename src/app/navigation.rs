use std::fmt;

pub const ALL_NAMESPACES: &str = "*";

/// Run listings the form can hand control back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    RunsByPipeline { namespace: String, pipeline: String },
    RunsByNamespace { namespace: String },
    AllRuns,
}

impl NavigationTarget {
    pub fn path(&self) -> String {
        match self {
            NavigationTarget::RunsByPipeline {
                namespace,
                pipeline,
            } => format!("/namespaces/{namespace}/pipelines/{pipeline}/pipelineruns"),
            NavigationTarget::RunsByNamespace { namespace } => {
                format!("/namespaces/{namespace}/pipelineruns")
            }
            NavigationTarget::AllRuns => "/pipelineruns".to_string(),
        }
    }
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Pick the most specific listing the known context allows.
///
/// `all_namespaces` is the wildcard token that does not name a concrete
/// namespace.
pub fn listing_target(pipeline: &str, namespace: &str, all_namespaces: &str) -> NavigationTarget {
    let concrete_namespace = !namespace.is_empty() && namespace != all_namespaces;
    match (concrete_namespace, pipeline.is_empty()) {
        (true, false) => NavigationTarget::RunsByPipeline {
            namespace: namespace.to_string(),
            pipeline: pipeline.to_string(),
        },
        (true, true) => NavigationTarget::RunsByNamespace {
            namespace: namespace.to_string(),
        },
        (false, _) => NavigationTarget::AllRuns,
    }
}
