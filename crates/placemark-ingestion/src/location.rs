//! Location resolution.
//!
//! The `location` field holds either "lat, lon" text or a free-text
//! address. After removing hemisphere letters (N E S W), minus signs,
//! commas, dots and whitespace, text made only of digits is treated as
//! coordinates; anything else is an address and goes to the geocoder.

use lazy_static::lazy_static;
use placemark_common::place::LOCATION_FIELD;
use placemark_common::{CanonicalPlace, Coordinates, Location};
use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::sources::Geocoder;

/// Location text this short or shorter is left untouched.
pub const MIN_LOCATION_LEN: usize = 3;

lazy_static! {
    static ref COORDINATE_NOISE: Regex = Regex::new(r"[NESW\-,.\s]").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationKind {
    Coordinates,
    Address,
}

/// Outcome of a successful `resolve`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Location missing or too short; the place is left as it was.
    Skipped,
    /// Coordinates read directly from the text.
    Parsed(Coordinates),
    /// Coordinates returned by the geocoder.
    Geocoded(Coordinates),
}

/// Record-scoped resolution failures. The place's location is set to
/// `Location::Unresolved` before any of these is returned.
#[derive(Debug, Error, PartialEq)]
pub enum LocationError {
    #[error("expected 2 comma-separated coordinates in '{text}', found {found}")]
    ComponentCount { text: String, found: usize },

    #[error("invalid coordinate component '{component}' in '{text}'")]
    InvalidComponent { text: String, component: String },

    #[error("coordinates out of range in '{text}'")]
    OutOfRange { text: String },

    #[error("geocoding failed for '{address}': {reason}")]
    Geocoding { address: String, reason: String },
}

pub fn classify_location(text: &str) -> LocationKind {
    let stripped = COORDINATE_NOISE.replace_all(text, "");
    if stripped.chars().all(|c| c.is_ascii_digit()) {
        LocationKind::Coordinates
    } else {
        LocationKind::Address
    }
}

/// Parse "lat, lon". Exactly two components are required; each may carry
/// a hemisphere letter before or after the number ("18.46N", "W 64.52"),
/// where S and W negate.
pub fn parse_coordinates(text: &str) -> Result<Coordinates, LocationError> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() != 2 {
        return Err(LocationError::ComponentCount { text: text.to_string(), found: parts.len() });
    }

    let lat = parse_component(parts[0], ['N', 'S']);
    let lon = parse_component(parts[1], ['E', 'W']);
    let (lat, lon) = match (lat, lon) {
        (Some(lat), Some(lon)) => (lat, lon),
        (None, _) => return Err(invalid_component(text, parts[0])),
        (_, None) => return Err(invalid_component(text, parts[1])),
    };

    Coordinates::new(lat, lon).ok_or_else(|| LocationError::OutOfRange { text: text.to_string() })
}

fn invalid_component(text: &str, component: &str) -> LocationError {
    LocationError::InvalidComponent { text: text.to_string(), component: component.to_string() }
}

fn parse_component(part: &str, hemispheres: [char; 2]) -> Option<f64> {
    let (sign, number) = if let Some(rest) = part.strip_prefix(hemispheres).or_else(|| part.strip_suffix(hemispheres)) {
        let letter = if part.starts_with(hemispheres) { part.chars().next() } else { part.chars().last() };
        let sign = if matches!(letter, Some('S') | Some('W')) { -1.0 } else { 1.0 };
        (sign, rest.trim())
    } else {
        (1.0, part)
    };
    number.parse::<f64>().ok().map(|n| sign * n)
}

/// Resolve `place.location` from its `location` field.
///
/// Addresses are copied into `place.address` and sent to the geocoder.
/// Malformed coordinate text is rejected rather than guessed at.
pub async fn resolve(place: &mut CanonicalPlace, geocoder: &dyn Geocoder) -> Result<Resolution, LocationError> {
    let Some(value) = place.get(LOCATION_FIELD) else {
        return Ok(Resolution::Skipped);
    };
    let text = value.to_string();
    if text.chars().count() <= MIN_LOCATION_LEN {
        return Ok(Resolution::Skipped);
    }

    match classify_location(&text) {
        LocationKind::Address => {
            debug!(address = %text, "Location is an address, geocoding");
            place.address = Some(text.clone());
            match geocoder.geocode(&text).await {
                Ok(coords) => {
                    debug!(address = %text, coords = %coords, "Geocoded");
                    place.location = Location::Coordinates(coords);
                    Ok(Resolution::Geocoded(coords))
                }
                Err(e) => {
                    warn!(address = %text, error = %e, "Geocoding failed");
                    place.location = Location::Unresolved;
                    Err(LocationError::Geocoding { address: text, reason: format!("{e:#}") })
                }
            }
        }
        LocationKind::Coordinates => match parse_coordinates(&text) {
            Ok(coords) => {
                place.location = Location::Coordinates(coords);
                Ok(Resolution::Parsed(coords))
            }
            Err(e) => {
                warn!(location = %text, error = %e, "Rejecting malformed coordinates");
                place.location = Location::Unresolved;
                Err(e)
            }
        },
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
