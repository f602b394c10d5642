//! Settings and record fixtures modelled on an emergency-shelter survey.

use placemark_common::{RawRecord, StyleOverride, StyleSpec};
use placemark_config::{CategoryRule, CategoryTable, DisplayTable, Settings, SynonymEntry, SynonymTable};

pub const DEFAULT_ICON: &str = "http://maps.google.com/mapfiles/kml/shapes/homegardenbusiness.png";
pub const HOSPITAL_ICON: &str = "http://maps.google.com/mapfiles/kml/shapes/hospitals.png";

/// Synonyms used by the end-to-end examples.
pub fn shelter_synonyms() -> SynonymTable {
    SynonymTable::new(vec![
        SynonymEntry::new("name", &["Location Name"]),
        SynonymEntry::new("location", &["Address", "Coordinates"]),
        SynonymEntry::new("type", &["Facility Type"]),
        SynonymEntry::new("size", &["Capacity"]),
        SynonymEntry::new("phone", &["Telephone"]),
    ])
}

/// `*`, `shelter`, `medical`, and the compound `shelter&medical`.
pub fn shelter_categories() -> CategoryTable {
    let wildcard = StyleSpec {
        scale: 1.2,
        label_scale: 0.8,
        color: "ffffffff".to_string(),
        icon: DEFAULT_ICON.to_string(),
    };
    CategoryTable::new(
        wildcard,
        vec![
            CategoryRule::simple(
                "shelter",
                &["shelter"],
                StyleOverride { color: Some("ff00ff00".into()), ..Default::default() },
            ),
            CategoryRule::simple(
                "medical",
                &["medical", "clinic", "hospital"],
                StyleOverride { color: Some("ff0000ff".into()), ..Default::default() },
            ),
            CategoryRule {
                name: "shelter&medical".to_string(),
                kind: placemark_config::RuleKind::Compound {
                    members: vec!["shelter".to_string(), "medical".to_string()],
                },
                style: StyleOverride { icon: Some(HOSPITAL_ICON.into()), ..Default::default() },
            },
        ],
    )
}

pub fn shelter_display() -> DisplayTable {
    DisplayTable::new([("type", ""), ("size", "people"), ("phone", "")])
}

pub fn shelter_settings() -> Settings {
    Settings::new(shelter_synonyms(), shelter_display(), shelter_categories())
}

/// A raw row from (column, value) pairs, in the given column order.
pub fn raw_record(cells: &[(&str, &str)]) -> RawRecord {
    cells
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// The canonical example row: an address that needs geocoding.
pub fn red_cross_row() -> RawRecord {
    raw_record(&[
        ("Location Name", "Red Cross Center"),
        ("Address", "1 Red Cross Way"),
        ("Facility Type", "Shelter"),
        ("Capacity", "150"),
    ])
}

/// `red_cross_row` as a CSV file.
pub const RED_CROSS_CSV: &str = "\
Location Name,Address,Facility Type,Capacity
Red Cross Center,1 Red Cross Way,Shelter,150
";

/// The same settings as `shelter_settings`, written as a legacy JSON file.
pub const SHELTER_SETTINGS_JSON: &str = r#"{
    "description": {
        "name": ["Location Name"],
        "location": ["Address", "Coordinates"],
        "type": ["Facility Type"],
        "size": ["Capacity"],
        "phone": ["Telephone"]
    },
    "display": { "type": "", "size": "people", "phone": "" },
    "categories": {
        "*": {
            "scale": 1.2,
            "label_scale": 0.8,
            "color": "ffffffff",
            "icon": "http://maps.google.com/mapfiles/kml/shapes/homegardenbusiness.png"
        },
        "shelter": { "identifiers": ["shelter"], "color": "ff00ff00" },
        "medical": { "identifiers": ["medical", "clinic", "hospital"], "color": "ff0000ff" },
        "shelter&medical": { "icon": "http://maps.google.com/mapfiles/kml/shapes/hospitals.png" }
    },
    "geocoder": { "provider": "disabled" }
}"#;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_json_fixture_matches_code_fixture() {
        let from_json = Settings::from_json_str(SHELTER_SETTINGS_JSON).unwrap();
        let built = shelter_settings();
        assert_eq!(from_json.synonyms, built.synonyms);
        assert_eq!(from_json.display, built.display);
        assert_eq!(from_json.categories, built.categories);
        assert!(from_json.validate().unwrap().is_empty());
    }
}
