//! placemark-config — Pipeline settings.
//!
//! Everything the pipeline reads is loaded once into a `Settings` value
//! and handed to each stage by reference:
//! - `SynonymTable`: canonical field → column-name fragments
//! - `DisplayTable`: canonical field → unit label, for the renderer
//! - `CategoryTable`: wildcard style plus simple and compound rules
//! - `GeocoderConfig`: provider, credentials and HTTP limits

pub mod error;
pub mod synonyms;
pub mod categories;
pub mod display;
pub mod settings;

pub use error::ConfigError;
pub use synonyms::{SynonymEntry, SynonymTable};
pub use categories::{CategoryRule, CategoryTable, RuleKind, COMBINATOR, WILDCARD};
pub use display::{DisplayField, DisplayTable};
pub use settings::{GeocoderConfig, GeocoderProvider, Settings};
