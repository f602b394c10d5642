//! LRU memoisation of successful geocoding lookups.
//!
//! Survey sheets repeat addresses (one row per service at the same site),
//! so a run only pays for each distinct address once. Failures are not
//! cached.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lru::LruCache;
use placemark_common::Coordinates;
use tracing::debug;

use super::Geocoder;

pub struct CachedGeocoder {
    inner: Arc<dyn Geocoder>,
    cache: Mutex<LruCache<String, Coordinates>>,
}

impl CachedGeocoder {
    /// `None` when `capacity` is zero.
    pub fn new(inner: Arc<dyn Geocoder>, capacity: usize) -> Option<Self> {
        let capacity = NonZeroUsize::new(capacity)?;
        Some(Self { inner, cache: Mutex::new(LruCache::new(capacity)) })
    }

    fn lookup(&self, address: &str) -> Option<Coordinates> {
        self.cache.lock().ok()?.get(address).copied()
    }

    fn remember(&self, address: &str, coords: Coordinates) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(address.to_string(), coords);
        }
    }
}

#[async_trait]
impl Geocoder for CachedGeocoder {
    async fn geocode(&self, address: &str) -> anyhow::Result<Coordinates> {
        if let Some(hit) = self.lookup(address) {
            debug!(address = %address, "Geocode cache hit");
            return Ok(hit);
        }
        let coords = self.inner.geocode(address).await?;
        self.remember(address, coords);
        Ok(coords)
    }
}
