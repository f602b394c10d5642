//! Display table: canonical field → unit label.
//!
//! The pipeline never reads this table; it is carried in `Settings` so the
//! renderer can list a place's attributes with their units in a fixed order.

use indexmap::IndexMap;
use placemark_common::{CanonicalPlace, FieldValue};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayTable(IndexMap<String, String>);

/// One attribute row for a place's description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayField {
    pub field: String,
    pub value: FieldValue,
    pub unit: String,
}

impl DisplayTable {
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    pub fn unit_for(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Rows for every displayed field the place actually has a value for,
    /// in table order.
    pub fn display_fields(&self, place: &CanonicalPlace) -> Vec<DisplayField> {
        self.0
            .iter()
            .filter_map(|(field, unit)| {
                let value = place.get(field)?;
                if value.is_empty() {
                    return None;
                }
                Some(DisplayField {
                    field: field.clone(),
                    value: value.clone(),
                    unit: unit.clone(),
                })
            })
            .collect()
    }
}
