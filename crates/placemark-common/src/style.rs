//! Visual style attributes attached to a classified place.

use serde::{Deserialize, Serialize};

/// Icon used when the category table does not name one.
pub const DEFAULT_ICON: &str = "http://maps.google.com/mapfiles/kml/paddle/wht-blank.png";
/// Colour used when the category table does not name one (aabbggrr).
pub const DEFAULT_COLOR: &str = "ffffffff";

/// Fully resolved style for one place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSpec {
    pub scale: f64,
    pub label_scale: f64,
    pub color: String,
    pub icon: String,
}

impl Default for StyleSpec {
    fn default() -> Self {
        Self {
            scale: 1.0,
            label_scale: 1.0,
            color: DEFAULT_COLOR.to_string(),
            icon: DEFAULT_ICON.to_string(),
        }
    }
}

/// Partial style carried by a category rule. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleOverride {
    #[serde(default)]
    pub scale: Option<f64>,
    #[serde(default)]
    pub label_scale: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl StyleOverride {
    pub fn is_empty(&self) -> bool {
        self.scale.is_none()
            && self.label_scale.is_none()
            && self.color.is_none()
            && self.icon.is_none()
    }
}

impl StyleSpec {
    /// Overwrite every attribute the override sets.
    pub fn merge(&mut self, over: &StyleOverride) {
        if let Some(s) = over.scale { self.scale = s; }
        if let Some(s) = over.label_scale { self.label_scale = s; }
        if let Some(ref c) = over.color { self.color = c.clone(); }
        if let Some(ref i) = over.icon { self.icon = i.clone(); }
    }

    /// Build a full style from an override, filling gaps from the defaults.
    pub fn from_override(over: &StyleOverride) -> Self {
        let mut spec = Self::default();
        spec.merge(over);
        spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overwrites_only_set_fields() {
        let mut spec = StyleSpec::default();
        spec.merge(&StyleOverride {
            color: Some("ff0000ff".into()),
            ..Default::default()
        });
        assert_eq!(spec.color, "ff0000ff");
        assert_eq!(spec.scale, 1.0);
        assert_eq!(spec.icon, DEFAULT_ICON);
    }

    #[test]
    fn test_empty_override() {
        assert!(StyleOverride::default().is_empty());
        assert!(!StyleOverride { scale: Some(2.0), ..Default::default() }.is_empty());
    }
}
