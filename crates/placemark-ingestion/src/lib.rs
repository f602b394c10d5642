//! placemark-ingestion — Survey records to styled map places.
//! - Schema normalisation (source columns → canonical fields)
//! - Location resolution (coordinate parsing, geocoding)
//! - Geocoder clients (Google, static, LRU cache)
//! - CSV record reading
//! - Pipeline orchestration

pub mod location;
pub mod models;
pub mod normalise;
pub mod pipeline;
pub mod reader;
pub mod sources;

pub use location::{classify_location, parse_coordinates, resolve, LocationError, LocationKind, Resolution};
pub use models::ClassifiedPlace;
pub use normalise::{normalise, SchemaNormaliser};
pub use pipeline::{run_pipeline, PipelineProgress, PipelineResult};
pub use reader::{read_csv_file, read_csv_files, read_records};
pub use sources::{build_geocoder, CachedGeocoder, DisabledGeocoder, Geocoder, GoogleGeocoder, StaticGeocoder};
