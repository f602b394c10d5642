//! Synonym table: which input column names feed which canonical field.
//!
//! Declaration order is significant. When a column name contains
//! fragments of several canonical fields, the first declared field wins,
//! so the table is kept as an ordered list rather than a hash map.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One canonical field and the column-name fragments that map onto it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynonymEntry {
    pub field: String,
    /// Lower-cased, non-empty fragments.
    pub synonyms: Vec<String>,
}

impl SynonymEntry {
    pub fn new(field: &str, synonyms: &[&str]) -> Self {
        Self {
            field: field.to_string(),
            synonyms: clean_synonyms(field, synonyms.iter().map(|s| s.to_string())),
        }
    }

    /// True if the field name or any synonym occurs in the column name,
    /// ignoring case. `column_lower` must already be lower-cased.
    pub fn matches(&self, column_lower: &str) -> bool {
        self.synonyms.iter().any(|s| column_lower.contains(s.as_str()))
            || column_lower.contains(&self.field.to_lowercase())
    }
}

/// Ordered synonym table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "IndexMap<String, Vec<String>>", into = "IndexMap<String, Vec<String>>")]
pub struct SynonymTable {
    entries: Vec<SynonymEntry>,
}

impl SynonymTable {
    pub fn new(entries: Vec<SynonymEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[SynonymEntry] {
        &self.entries
    }

    /// Canonical field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.field.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.entries.iter().any(|e| e.field == field)
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

impl From<IndexMap<String, Vec<String>>> for SynonymTable {
    fn from(map: IndexMap<String, Vec<String>>) -> Self {
        let entries = map
            .into_iter()
            .map(|(field, synonyms)| SynonymEntry {
                synonyms: clean_synonyms(&field, synonyms.into_iter()),
                field,
            })
            .collect();
        Self { entries }
    }
}

impl From<SynonymTable> for IndexMap<String, Vec<String>> {
    fn from(table: SynonymTable) -> Self {
        table.entries.into_iter().map(|e| (e.field, e.synonyms)).collect()
    }
}

// An empty fragment is a substring of every column name and would claim
// every column for this field. Padding is kept: " id" must not match "Provider".
fn clean_synonyms(field: &str, raw: impl Iterator<Item = String>) -> Vec<String> {
    raw.filter_map(|s| {
        if s.is_empty() {
            tracing::warn!(field = %field, "Ignoring empty synonym");
            return None;
        }
        if s.trim().is_empty() {
            tracing::warn!(field = %field, "Whitespace-only synonym matches any multi-word column");
        }
        Some(s.to_lowercase())
    })
    .collect()
}
