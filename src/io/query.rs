use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::form::{EditMode, FormState};

pub const PIPELINE_NAME_PARAM: &str = "pipelineName";
pub const NAMESPACE_PARAM: &str = "namespace";
pub const MODE_PARAM: &str = "mode";
pub const DOCUMENT_MODE_VALUE: &str = "yaml";

const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Ordered query-string parameters. Parameters this crate does not own
/// pass through a decode/encode cycle untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

/// Form fields recovered from a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySeed {
    pub pipeline_ref: Option<String>,
    pub namespace: Option<String>,
    pub mode: EditMode,
}

impl QueryParams {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let pairs = raw
            .split('&')
            .filter(|segment| !segment.is_empty())
            .map(|segment| match segment.split_once('=') {
                Some((key, value)) => (decode_component(key), decode_component(value)),
                None => (decode_component(segment), String::new()),
            })
            .collect();
        Self { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value.as_str())
    }

    /// Set `key`, keeping the position of its first occurrence.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter().position(|(candidate, _)| candidate == key) {
            Some(index) => {
                self.pairs[index].1 = value;
                let mut seen = 0usize;
                self.pairs.retain(|(candidate, _)| {
                    if candidate != key {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(candidate, _)| candidate != key);
    }

    /// Set when `value` is non-empty, otherwise delete.
    pub fn set_or_remove(&mut self, key: &str, value: &str) {
        if value.is_empty() {
            self.remove(key);
        } else {
            self.set(key, value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encoded form without a leading `?`.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(key, QUERY_COMPONENT),
                    utf8_percent_encode(value, QUERY_COMPONENT)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

pub fn decode(params: &QueryParams) -> QuerySeed {
    let non_empty = |key: &str| {
        params
            .get(key)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };
    let mode = if params.get(MODE_PARAM) == Some(DOCUMENT_MODE_VALUE) {
        EditMode::Document
    } else {
        EditMode::Form
    };
    QuerySeed {
        pipeline_ref: non_empty(PIPELINE_NAME_PARAM),
        namespace: non_empty(NAMESPACE_PARAM),
        mode,
    }
}

/// Mirror the URL-owned fields of `state` into `params`.
///
/// Document mode is only ever written, never cleared: leaving it is a
/// navigation the host performs.
pub fn encode(state: &FormState, params: &mut QueryParams) {
    params.set_or_remove(PIPELINE_NAME_PARAM, &state.pipeline_ref);
    params.set_or_remove(NAMESPACE_PARAM, &state.namespace);
    if state.mode == EditMode::Document {
        params.set(MODE_PARAM, DOCUMENT_MODE_VALUE);
    }
}

fn decode_component(raw: &str) -> String {
    let spaced: Cow<'_, str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
