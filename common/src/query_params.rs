//! Filter parameters attached to a dynamic select, keyed by form field name.

use std::fmt::Display;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::declarations::DeclarationError;

/// A single primitive value sent for a query parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl QueryValue {
    /// Strings the server uses to mean "nothing selected".
    pub fn is_empty_marker(&self) -> bool {
        match self {
            Self::Text(s) => matches!(s.as_str(), "" | "null" | "undefined"),
            _ => false,
        }
    }
}

impl Display for QueryValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterEntry {
    /// Wire-level key, may differ from the field name.
    pub query_param: String,
    pub query_value: Vec<QueryValue>,
    /// Send `<key>=null` instead of dropping the key when `query_value` is empty.
    pub include_null: bool,
}

impl ParameterEntry {
    pub fn new(query_param: impl Into<String>, query_value: Vec<QueryValue>) -> Self {
        Self { query_param: query_param.into(), query_value, include_null: false }
    }

    pub fn with_include_null(mut self, include_null: bool) -> Self {
        self.include_null = include_null;
        self
    }
}

/// Ordered field name -> [`ParameterEntry`] map.
///
/// Iteration follows first-insertion order, and updating a value never moves an
/// entry, so URLs composed from the same set are stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    entries: IndexMap<String, ParameterEntry>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field_name: &str) -> Option<&ParameterEntry> {
        self.entries.get(field_name)
    }

    /// Wire key for a tracked field.
    pub fn query_param(&self, field_name: &str) -> Option<&str> {
        self.entries.get(field_name).map(|e| e.query_param.as_str())
    }

    /// Current values for a field, empty if the field is not tracked.
    pub fn query_value(&self, field_name: &str) -> &[QueryValue] {
        match self.entries.get(field_name) {
            Some(entry) => &entry.query_value,
            None => &[],
        }
    }

    /// Overwrite the values of an already tracked field.
    ///
    /// Returns `false` (and changes nothing) for unknown fields, so a typo in a
    /// field name can never introduce an untracked parameter.
    pub fn update_value(&mut self, field_name: &str, query_value: Vec<QueryValue>) -> bool {
        match self.entries.get_mut(field_name) {
            Some(entry) => {
                entry.query_value = query_value;
                true
            }
            None => false,
        }
    }

    /// Insert or replace the entry for `field_name`.
    ///
    /// Fails if a different field already sends the same query parameter.
    pub fn insert(&mut self, field_name: impl Into<String>, entry: ParameterEntry) -> Result<Option<ParameterEntry>, DeclarationError> {
        let field_name = field_name.into();
        if let Some(existing_field) = self.field_for_query_param(&entry.query_param) {
            if existing_field != field_name {
                return Err(DeclarationError::DuplicateQueryParam {
                    query_param: entry.query_param,
                    field_name,
                    existing_field: existing_field.to_string(),
                });
            }
        }
        Ok(self.entries.insert(field_name, entry))
    }

    /// Insert `entry`, taking over the position of whichever entry currently
    /// sends the same query parameter.
    ///
    /// Used to layer user-driven filters over server-declared static ones. An
    /// adopting entry without values keeps the displaced entry's values.
    pub fn adopt(&mut self, field_name: impl Into<String>, mut entry: ParameterEntry) {
        let field_name = field_name.into();
        let slot = self.entries.iter().position(|(name, e)| e.query_param == entry.query_param && *name != field_name);
        match slot {
            Some(mut index) => {
                if let Some((_, displaced)) = self.entries.shift_remove_index(index) {
                    if entry.query_value.is_empty() {
                        entry.query_value = displaced.query_value;
                    }
                }
                if let Some(own) = self.entries.get_index_of(&field_name) {
                    self.entries.shift_remove_index(own);
                    if own < index {
                        index -= 1;
                    }
                }
                self.entries.shift_insert(index, field_name, entry);
            }
            None => {
                self.entries.insert(field_name, entry);
            }
        }
    }

    /// Copy every entry of `other` into this set, keeping `other`'s order.
    pub fn merge_from(&mut self, other: &ParameterSet) {
        for (field_name, entry) in other.iter() {
            self.adopt(field_name, entry.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn field_for_query_param(&self, query_param: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, e)| e.query_param == query_param)
            .map(|(k, _)| k.as_str())
    }
}
