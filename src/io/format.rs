use std::fmt;
use std::str::FromStr;

use anyhow::bail;

/// Supported data formats for input/output layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    #[cfg(feature = "yaml")]
    Yaml,
}

impl Default for DocumentFormat {
    #[cfg(feature = "yaml")]
    fn default() -> Self {
        DocumentFormat::Yaml
    }

    #[cfg(not(feature = "yaml"))]
    fn default() -> Self {
        DocumentFormat::Json
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Json => write!(f, "json"),
            #[cfg(feature = "yaml")]
            DocumentFormat::Yaml => write!(f, "yaml"),
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "json" => Ok(DocumentFormat::Json),
            #[cfg(feature = "yaml")]
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            other => bail!("unsupported document format '{other}'"),
        }
    }
}
