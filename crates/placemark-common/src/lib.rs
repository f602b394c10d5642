//! placemark-common — Shared types, errors, and the HTTP client used across all Placemark crates.

pub mod error;
pub mod http;
pub mod number;
pub mod place;
pub mod style;

// Re-export commonly used types
pub use error::{PlacemarkError, Result};
pub use number::parse_number;
pub use place::{CanonicalPlace, Coordinates, FieldValue, Location, RawRecord, UNKNOWN_CATEGORY};
pub use style::{StyleOverride, StyleSpec};
