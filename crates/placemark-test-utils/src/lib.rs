//! Shared fixtures for Placemark tests.

pub mod fixtures;

pub use pretty_assertions;
