use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_json::Value;

use super::DocumentFormat;

/// Where a rendered run document is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDestination {
    Stdout,
    File(PathBuf),
}

impl OutputDestination {
    pub fn file(path: impl AsRef<Path>) -> Self {
        OutputDestination::File(path.as_ref().to_path_buf())
    }

    /// `"-"` means stdout, anything else names a file.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim() {
            "" => bail!("output destination cannot be empty"),
            "-" => Ok(OutputDestination::Stdout),
            path => Ok(OutputDestination::file(path)),
        }
    }

    /// Format implied by a file extension, if any.
    pub fn implied_format(&self) -> Option<DocumentFormat> {
        match self {
            OutputDestination::Stdout => None,
            OutputDestination::File(path) => path.extension()?.to_str()?.parse().ok(),
        }
    }
}

/// How a run document is serialized and where it goes.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format: DocumentFormat,
    pub pretty: bool,
    pub overwrite: bool,
    pub destinations: Vec<OutputDestination>,
}

impl OutputOptions {
    pub fn new(format: DocumentFormat) -> Self {
        Self {
            format,
            pretty: true,
            overwrite: false,
            destinations: vec![OutputDestination::Stdout],
        }
    }

    /// Pick the format from the first file destination with a known
    /// extension, falling back to `fallback`.
    pub fn inferred(destinations: Vec<OutputDestination>, fallback: DocumentFormat) -> Self {
        let format = destinations
            .iter()
            .find_map(OutputDestination::implied_format)
            .unwrap_or(fallback);
        Self::new(format).with_destinations(destinations)
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// An empty list keeps stdout as the only destination.
    pub fn with_destinations(mut self, destinations: Vec<OutputDestination>) -> Self {
        if !destinations.is_empty() {
            self.destinations = destinations;
        }
        self
    }
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self::new(DocumentFormat::default())
    }
}

/// Render `value` once and write it to every destination.
pub fn emit(value: &Value, options: &OutputOptions) -> Result<()> {
    let text = serialize_value(value, options.format, options.pretty)?;
    for destination in &options.destinations {
        match destination {
            OutputDestination::Stdout => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{}", text.trim_end()).context("failed to write to stdout")?;
            }
            OutputDestination::File(path) => write_file(path, &text, options.overwrite)
                .with_context(|| format!("failed to write run document to {}", path.display()))?,
        }
    }
    Ok(())
}

fn write_file(path: &Path, text: &str, overwrite: bool) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .create_new(!overwrite)
        .truncate(overwrite)
        .open(path)?;
    writeln!(file, "{}", text.trim_end())
}

pub fn serialize_value(value: &Value, format: DocumentFormat, pretty: bool) -> Result<String> {
    match format {
        DocumentFormat::Json if pretty => {
            serde_json::to_string_pretty(value).context("failed to serialize JSON")
        }
        DocumentFormat::Json => serde_json::to_string(value).context("failed to serialize JSON"),
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => serde_yaml::to_string(value).context("failed to serialize YAML"),
    }
}
