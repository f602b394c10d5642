//! Google Geocoding API client.
//!
//! API: https://maps.googleapis.com/maps/api/geocode/json?address=...&key=...
//! A lookup succeeds only when `status` is "OK" and the first result
//! carries `geometry.location.{lat,lng}`.

use std::time::Duration;

use anyhow::{bail, Context};
use async_trait::async_trait;
use placemark_common::http::HostAllowlistClient as Client;
use placemark_common::Coordinates;
use placemark_config::Settings;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use super::Geocoder;

pub struct GoogleGeocoder {
    client: Client,
    endpoint: String,
    api_key: SecretString,
}

impl GoogleGeocoder {
    pub fn new(endpoint: impl Into<String>, api_key: SecretString, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::with_timeout(timeout)?;
        let endpoint = endpoint.into();
        if !client.permits(&endpoint) {
            bail!("geocoder endpoint {endpoint} is not in the allowed hosts");
        }
        Ok(Self { client, endpoint, api_key })
    }

    /// Build from `settings.geocoder`. Fails when no API key is configured.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let cfg = &settings.geocoder;
        let api_key = settings
            .maps_key()
            .context("google geocoder needs an API key (geocoder.api_key, mapskey, or PLACEMARK_MAPS_KEY)")?;

        let mut client = Client::with_timeout(Duration::from_secs(cfg.timeout_secs))?;
        for host in &cfg.allowed_hosts {
            client.allow_host(host);
        }
        if !client.permits(&cfg.endpoint) {
            bail!("geocoder endpoint {} is not in the allowed hosts", cfg.endpoint);
        }
        Ok(Self { client, endpoint: cfg.endpoint.clone(), api_key })
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> anyhow::Result<Coordinates> {
        let body = self
            .client
            .get(&self.endpoint)?
            .query(&[("address", address), ("key", self.api_key.expose_secret())])
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;

        let coords = response_to_coordinates(&body)?;
        debug!(coords = %coords, "Google geocode result");
        Ok(coords)
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────

fn response_to_coordinates(body: &serde_json::Value) -> anyhow::Result<Coordinates> {
    let status = body["status"].as_str().unwrap_or("MISSING_STATUS");
    if status != "OK" {
        match body["error_message"].as_str() {
            Some(msg) => bail!("geocoder status {status}: {msg}"),
            None => bail!("geocoder status {status}"),
        }
    }

    let location = body["results"]
        .as_array()
        .and_then(|r| r.first())
        .map(|r| &r["geometry"]["location"])
        .context("geocoder returned no results")?;

    let lat = location["lat"].as_f64().context("result has no latitude")?;
    let lng = location["lng"].as_f64().context("result has no longitude")?;
    Coordinates::new(lat, lng).with_context(|| format!("result out of range: {lat}, {lng}"))
}
