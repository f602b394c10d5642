//! Settings loading.
//!
//! Reads placemark.toml from the current directory or the path in the
//! PLACEMARK_CONFIG env var. JSON and YAML files are accepted too, which
//! keeps older `settings.json` files (with `description` / `mapskey` keys)
//! loadable unchanged.

use std::path::Path;

use placemark_common::place::REQUIRED_FIELDS;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::categories::CategoryTable;
use crate::display::DisplayTable;
use crate::error::ConfigError;
use crate::synonyms::SynonymTable;

/// Env var naming the settings file.
pub const CONFIG_PATH_ENV: &str = "PLACEMARK_CONFIG";
/// Env var consulted when no API key is set in the file.
pub const MAPS_KEY_ENV: &str = "PLACEMARK_MAPS_KEY";
const DEFAULT_CONFIG_PATH: &str = "placemark.toml";

/// Complete pipeline configuration. Loaded once, never mutated.
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Canonical field → column-name fragments
    #[serde(alias = "description")]
    pub synonyms: SynonymTable,

    /// Canonical field → unit label
    #[serde(default)]
    pub display: DisplayTable,

    /// Wildcard style and category rules
    #[serde(default)]
    pub categories: CategoryTable,

    #[serde(default)]
    pub geocoder: GeocoderConfig,

    /// Top-level key used by older settings files.
    #[serde(default, rename = "mapskey")]
    legacy_maps_key: Option<SecretString>,
}

// ── Geocoder ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeocoderProvider {
    #[default]
    Google,
    /// Every address lookup fails; only coordinate rows survive.
    Disabled,
}

#[derive(Debug, Deserialize)]
pub struct GeocoderConfig {
    #[serde(default)]
    pub provider: GeocoderProvider,

    #[serde(default)]
    pub api_key: Option<SecretString>,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Distinct addresses remembered per run; 0 disables the cache.
    #[serde(default = "default_cache_size")]
    pub cache_size: usize,

    /// Extra hosts the HTTP client may contact (e.g. a self-hosted geocoder).
    #[serde(default)]
    pub allowed_hosts: Vec<String>,
}

fn default_endpoint() -> String { "https://maps.googleapis.com/maps/api/geocode/json".to_string() }
fn default_timeout_secs() -> u64 { 30 }
fn default_cache_size() -> usize { 1024 }

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            provider: GeocoderProvider::default(),
            api_key: None,
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            cache_size: default_cache_size(),
            allowed_hosts: Vec::new(),
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl Settings {
    /// Load from `$PLACEMARK_CONFIG`, falling back to ./placemark.toml.
    /// A `.env` file, if present, is read first.
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        let path = std::env::var(CONFIG_PATH_ENV)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::from_path(&path)
    }

    /// Load from a file, choosing the format by extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        if !path.exists() {
            return Err(ConfigError::NotFound(display));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: display.clone(), source })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            _ => Err(ConfigError::UnsupportedFormat(display)),
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Build settings in code (tests, embedding).
    pub fn new(synonyms: SynonymTable, display: DisplayTable, categories: CategoryTable) -> Self {
        Self {
            synonyms,
            display,
            categories,
            geocoder: GeocoderConfig::default(),
            legacy_maps_key: None,
        }
    }

    /// Fails when a required canonical field is missing; otherwise returns
    /// warnings about rules that can never match.
    pub fn validate(&self) -> Result<Vec<String>, ConfigError> {
        for field in REQUIRED_FIELDS {
            if !self.synonyms.contains(field) {
                return Err(ConfigError::MissingField(field.to_string()));
            }
        }
        Ok(self.categories.warnings())
    }

    /// API key from `geocoder.api_key`, the legacy `mapskey`, or `$PLACEMARK_MAPS_KEY`.
    pub fn maps_key(&self) -> Option<SecretString> {
        self.geocoder
            .api_key
            .as_ref()
            .or(self.legacy_maps_key.as_ref())
            .map(|k| SecretString::from(k.expose_secret().to_owned()))
            .or_else(|| std::env::var(MAPS_KEY_ENV).ok().map(SecretString::from))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE_TOML: &str = r#"
[synonyms]
name = ["location name", "facility"]
type = ["facility type", "kind"]
location = ["address", "coordinates"]
size = ["capacity"]
phone = ["telephone"]

[display]
size = "people"
phone = ""

[categories."*"]
scale = 1.0
label_scale = 0.8
color = "ffffffff"
icon = "default.png"

[categories.shelter]
identifiers = ["shelter"]
color = "ff00ff00"

[geocoder]
api_key = "test-key"
cache_size = 16
"#;

    #[test]
    fn test_toml_sample() {
        let s = Settings::from_toml_str(SAMPLE_TOML).unwrap();
        let fields: Vec<&str> = s.synonyms.field_names().collect();
        assert_eq!(fields, vec!["name", "type", "location", "size", "phone"]);
        assert_eq!(s.display.unit_for("size"), Some("people"));
        assert_eq!(s.categories.rules().len(), 1);
        assert_eq!(s.geocoder.cache_size, 16);
        assert_eq!(s.geocoder.provider, GeocoderProvider::Google);
        assert_eq!(s.maps_key().unwrap().expose_secret(), "test-key");
        assert!(s.validate().unwrap().is_empty());
    }

    #[test]
    fn test_legacy_json_keys() {
        let json = r#"{
            "description": { "name": [], "type": [], "location": ["address"], "size": [] },
            "display": {},
            "categories": { "*": { "scale": 1.0 } },
            "mapskey": "legacy-key"
        }"#;
        let s = Settings::from_json_str(json).unwrap();
        assert_eq!(s.synonyms.len(), 4);
        assert_eq!(s.maps_key().unwrap().expose_secret(), "legacy-key");
    }

    #[test]
    fn test_yaml_defaults() {
        let yaml = "synonyms:\n  name: []\n  type: []\n  location: []\n  size: []\n";
        let s = Settings::from_yaml_str(yaml).unwrap();
        assert_eq!(s.geocoder.timeout_secs, 30);
        assert!(s.display.is_empty());
    }

    #[test]
    fn test_validate_requires_core_fields() {
        let s = Settings::from_json_str(r#"{ "synonyms": { "name": [], "type": [] } }"#).unwrap();
        match s.validate() {
            Err(ConfigError::MissingField(f)) => assert_eq!(f, "location"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_disabled_provider() {
        let s = Settings::from_toml_str(
            "[synonyms]\nname = []\n[geocoder]\nprovider = \"disabled\"\n",
        ).unwrap();
        assert_eq!(s.geocoder.provider, GeocoderProvider::Disabled);
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::from_path("/nonexistent/placemark.toml").unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
