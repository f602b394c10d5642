//! Geocoding clients.

pub mod cache;
pub mod fixed;
pub mod google;

use std::sync::Arc;

use async_trait::async_trait;
use placemark_common::Coordinates;
use placemark_config::{GeocoderProvider, Settings};
use tracing::info;

pub use cache::CachedGeocoder;
pub use fixed::{DisabledGeocoder, StaticGeocoder};
pub use google::GoogleGeocoder;

/// Common interface for all address → coordinates lookups.
///
/// A lookup either succeeds or fails; callers treat any error as
/// "this record cannot be placed".
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> anyhow::Result<Coordinates>;
}

/// Build the geocoder described by `settings.geocoder`, wrapped in an LRU
/// cache when `cache_size > 0`.
pub fn build_geocoder(settings: &Settings) -> anyhow::Result<Arc<dyn Geocoder>> {
    let cfg = &settings.geocoder;
    let inner: Arc<dyn Geocoder> = match cfg.provider {
        GeocoderProvider::Google => Arc::new(GoogleGeocoder::from_settings(settings)?),
        GeocoderProvider::Disabled => {
            info!("Geocoding disabled; address rows will be dropped");
            return Ok(Arc::new(DisabledGeocoder));
        }
    };

    match CachedGeocoder::new(inner.clone(), cfg.cache_size) {
        Some(cached) => Ok(Arc::new(cached)),
        None => Ok(inner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use placemark_test_utils::fixtures;

    #[tokio::test]
    async fn test_disabled_provider_fails_every_lookup() {
        let settings = Settings::from_json_str(fixtures::SHELTER_SETTINGS_JSON).unwrap();
        let geocoder = build_geocoder(&settings).unwrap();
        assert!(geocoder.geocode("1 Red Cross Way").await.is_err());
    }

    #[test]
    fn test_google_provider_builds_with_key() {
        let mut settings = fixtures::shelter_settings();
        settings.geocoder.provider = GeocoderProvider::Google;
        settings.geocoder.api_key = Some("test-key".to_string().into());
        assert!(build_geocoder(&settings).is_ok());
    }
}
