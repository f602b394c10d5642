//! Geocoders that never touch the network.

use std::collections::HashMap;

use anyhow::anyhow;
use async_trait::async_trait;
use placemark_common::Coordinates;

use super::Geocoder;

/// Fails every lookup. Selected by `provider = "disabled"` or `--no-geocode`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledGeocoder;

#[async_trait]
impl Geocoder for DisabledGeocoder {
    async fn geocode(&self, address: &str) -> anyhow::Result<Coordinates> {
        Err(anyhow!("geocoding is disabled (address '{address}')"))
    }
}

/// Answers from a fixed address table; unknown addresses fail.
#[derive(Debug, Default, Clone)]
pub struct StaticGeocoder {
    known: HashMap<String, Coordinates>,
}

impl StaticGeocoder {
    /// Entries with out-of-range coordinates are skipped.
    pub fn new<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, (f64, f64))>,
    {
        let known = entries
            .into_iter()
            .filter_map(|(addr, (lat, lon))| Some((addr.to_string(), Coordinates::new(lat, lon)?)))
            .collect();
        Self { known }
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn geocode(&self, address: &str) -> anyhow::Result<Coordinates> {
        self.known
            .get(address)
            .copied()
            .ok_or_else(|| anyhow!("no result for '{address}'"))
    }
}
