use std::collections::BTreeMap;

use indexmap::IndexMap;

use super::labels::{EntryField, LabelSyntax};

/// The two dynamic key/value lists a run form carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Labels,
    NodeSelector,
}

/// Invalid flags keyed by `"{entry id}-{key|value}"`.
pub type InvalidEntries = BTreeMap<String, bool>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: String,
    pub key: String,
    pub value: String,
    pub key_placeholder: String,
    pub value_placeholder: String,
}

impl Entry {
    pub fn field(&self, field: EntryField) -> &str {
        match field {
            EntryField::Key => &self.key,
            EntryField::Value => &self.value,
        }
    }
}

/// Ordered list of editable key/value pairs with per-entry validity flags.
///
/// Ids come from a counter that only ever grows, so an id is never handed
/// out twice within a session even after removals or a form reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValueList {
    entries: Vec<Entry>,
    invalid: InvalidEntries,
    counter: u64,
}

pub fn entry_flag_key(id: &str, field: EntryField) -> String {
    format!("{id}-{}", field.as_str())
}

impl KeyValueList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn invalid(&self) -> &InvalidEntries {
        &self.invalid
    }

    pub fn is_invalid(&self, id: &str, field: EntryField) -> bool {
        self.invalid
            .get(&entry_flag_key(id, field))
            .copied()
            .unwrap_or(false)
    }

    pub fn add(&mut self) -> &Entry {
        let id = self.next_id();
        self.entries.push(Entry {
            id,
            key: String::new(),
            value: String::new(),
            key_placeholder: "key".to_string(),
            value_placeholder: "value".to_string(),
        });
        let last = self.entries.len() - 1;
        &self.entries[last]
    }

    /// Add an entry pre-filled with a key and value.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) -> &Entry {
        let id = self.next_id();
        self.entries.push(Entry {
            id,
            key: key.into(),
            value: value.into(),
            key_placeholder: "key".to_string(),
            value_placeholder: "value".to_string(),
        });
        let last = self.entries.len() - 1;
        &self.entries[last]
    }

    /// Remove the entry at `index`, dropping any invalid flags it had.
    pub fn remove(&mut self, index: usize) -> Option<Entry> {
        if index >= self.entries.len() {
            return None;
        }
        let entry = self.entries.remove(index);
        self.invalid.remove(&entry_flag_key(&entry.id, EntryField::Key));
        self.invalid.remove(&entry_flag_key(&entry.id, EntryField::Value));
        Some(entry)
    }

    /// Update one side of an entry and re-check only that side.
    ///
    /// Returns `false` when `index` does not address an entry.
    pub fn change(
        &mut self,
        index: usize,
        field: EntryField,
        value: impl Into<String>,
        syntax: &dyn LabelSyntax,
    ) -> bool {
        let Some(entry) = self.entries.get_mut(index) else {
            return false;
        };
        let value = value.into();
        let valid = syntax.is_valid_label(field, &value);
        match field {
            EntryField::Key => entry.key = value,
            EntryField::Value => entry.value = value,
        }
        let flag = entry_flag_key(&entry.id, field);
        if valid {
            self.invalid.remove(&flag);
        } else {
            self.invalid.insert(flag, true);
        }
        true
    }

    /// Check every entry without touching the list.
    pub fn check(&self, syntax: &dyn LabelSyntax) -> InvalidEntries {
        let mut invalid = InvalidEntries::new();
        for entry in &self.entries {
            for field in [EntryField::Key, EntryField::Value] {
                if !syntax.is_valid_label(field, entry.field(field)) {
                    invalid.insert(entry_flag_key(&entry.id, field), true);
                }
            }
        }
        invalid
    }

    pub fn replace_invalid(&mut self, invalid: InvalidEntries) {
        self.invalid = invalid;
    }

    /// Drop all entries and flags. The id counter survives.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.invalid.clear();
    }

    /// Collapse into a mapping; a later duplicate key overwrites an earlier one.
    pub fn to_map(&self) -> IndexMap<String, String> {
        let mut map = IndexMap::new();
        for entry in &self.entries {
            map.insert(entry.key.clone(), entry.value.clone());
        }
        map
    }

    fn next_id(&mut self) -> String {
        loop {
            self.counter = self.counter.saturating_add(1);
            let candidate = format!("label{}-{}", self.entries.len(), self.counter);
            if !self.entries.iter().any(|entry| entry.id == candidate) {
                return candidate;
            }
        }
    }
}
