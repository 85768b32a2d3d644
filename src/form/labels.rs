use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Which half of a key/value entry is being addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryField {
    Key,
    Value,
}

impl EntryField {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryField::Key => "key",
            EntryField::Value => "value",
        }
    }
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Predicate deciding whether a label key or value is well formed.
///
/// The form only records the pass/fail outcome; the grammar lives here.
pub trait LabelSyntax {
    fn is_valid_label(&self, field: EntryField, text: &str) -> bool;
}

impl<F> LabelSyntax for F
where
    F: Fn(EntryField, &str) -> bool,
{
    fn is_valid_label(&self, field: EntryField, text: &str) -> bool {
        self(field, text)
    }
}

const MAX_NAME_LEN: usize = 63;
const MAX_PREFIX_LEN: usize = 253;

static NAME_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]([-A-Za-z0-9_.]*[A-Za-z0-9])?$").expect("label name pattern")
});

static DOMAIN_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
        .expect("label prefix pattern")
});

/// Kubernetes label grammar: `[prefix/]name` keys, bounded alphanumeric values.
#[derive(Debug, Clone, Copy, Default)]
pub struct KubernetesLabels;

impl LabelSyntax for KubernetesLabels {
    fn is_valid_label(&self, field: EntryField, text: &str) -> bool {
        match field {
            EntryField::Key => valid_key(text),
            EntryField::Value => valid_name_segment(text),
        }
    }
}

fn valid_key(text: &str) -> bool {
    match text.split_once('/') {
        Some((prefix, name)) => {
            prefix.len() <= MAX_PREFIX_LEN
                && DOMAIN_PREFIX.is_match(prefix)
                && valid_name_segment(name)
        }
        None => valid_name_segment(text),
    }
}

fn valid_name_segment(text: &str) -> bool {
    text.len() <= MAX_NAME_LEN && NAME_SEGMENT.is_match(text)
}
