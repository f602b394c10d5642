//! Record types flowing through the pipeline.
//!
//! A `RawRecord` is one input row keyed by its source column names.
//! A `CanonicalPlace` is the same row after schema normalisation: every
//! canonical field is present, and later stages attach the resolved
//! location, the geocoded address and the category.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Canonical field holding the place's display name.
pub const NAME_FIELD: &str = "name";
/// Canonical field matched against category identifiers.
pub const TYPE_FIELD: &str = "type";
/// Canonical field holding the raw location (address or "lat, lon").
pub const LOCATION_FIELD: &str = "location";
/// Canonical field holding the capacity used for icon scaling.
pub const SIZE_FIELD: &str = "size";

/// Canonical fields every synonym table must declare.
pub const REQUIRED_FIELDS: [&str; 4] = [NAME_FIELD, TYPE_FIELD, LOCATION_FIELD, SIZE_FIELD];

/// Category assigned when no rule matches.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// One input row: source column name → cell text, in source column order.
pub type RawRecord = IndexMap<String, String>;

// ── Field values ──────────────────────────────────────────────────────────────

/// A canonical field value. Numeric cells are stored as numbers,
/// everything else as (title-cased) text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// The value an unmatched canonical field holds.
    pub fn empty() -> Self {
        FieldValue::Text(String::new())
    }

    /// True for empty text. Numbers (including zero) are never empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.is_empty())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Number(_) => None,
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self { Self::empty() }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{n}"),
        }
    }
}

// ── Coordinates ───────────────────────────────────────────────────────────────

/// A WGS84 point. Both components are finite and within range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Returns `None` for non-finite or out-of-range components.
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);
        valid.then_some(Self { lat, lon })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

/// Resolution state of a place's location.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// The resolver has not touched this place (missing or trivial location text).
    #[default]
    Pending,
    /// Parsed or geocoded coordinates.
    Coordinates(Coordinates),
    /// Geocoding failed or the coordinate text was malformed.
    Unresolved,
}

impl Location {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            Location::Coordinates(c) => Some(*c),
            _ => None,
        }
    }
}

// ── Canonical place ───────────────────────────────────────────────────────────

/// A record expressed in the canonical schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalPlace {
    /// Every canonical field, in synonym-table order.
    pub fields: IndexMap<String, FieldValue>,
    pub location: Location,
    /// Original address text; set only when a geocoding lookup was attempted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub category: String,
}

impl CanonicalPlace {
    /// Build a place with every named field set to empty text.
    pub fn with_fields<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            fields: names
                .into_iter()
                .map(|n| (n.to_string(), FieldValue::empty()))
                .collect(),
            location: Location::Pending,
            address: None,
            category: UNKNOWN_CATEGORY.to_string(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn set(&mut self, field: &str, value: FieldValue) {
        self.fields.insert(field.to_string(), value);
    }

    /// Text form of a field, empty when the field is absent.
    pub fn text(&self, field: &str) -> String {
        self.get(field).map(|v| v.to_string()).unwrap_or_default()
    }

    pub fn name(&self) -> String {
        self.text(NAME_FIELD)
    }

    pub fn place_type(&self) -> String {
        self.text(TYPE_FIELD)
    }

    /// Only places with coordinates survive the pipeline's location filter.
    pub fn is_resolved(&self) -> bool {
        matches!(self.location, Location::Coordinates(_))
    }

    /// Render the canonical fields back into a raw row keyed by canonical name.
    pub fn to_raw_record(&self) -> RawRecord {
        self.fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
