//! Record normalisation.
//!
//! - `SchemaNormaliser`: maps source column names → canonical fields
//! - `cell_value` / `title_case`: per-cell value typing

pub mod schema;

pub use schema::{cell_value, normalise, title_case, SchemaNormaliser};
