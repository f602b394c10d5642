//! placemark-style — Category assignment and icon style resolution.

pub mod categorizer;
pub mod scale;

pub use categorizer::{classify, Categorizer};
pub use scale::{apply_capacity, capacity_multiplier, clamp_capacity};
