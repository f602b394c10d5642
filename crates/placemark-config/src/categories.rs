//! Category table: the wildcard style plus simple and compound rules.
//!
//! ```toml
//! [categories."*"]
//! scale = 1.0
//! label_scale = 0.8
//! color = "ffffffff"
//! icon = "http://maps.google.com/mapfiles/kml/shapes/homegardenbusiness.png"
//!
//! [categories.shelter]
//! identifiers = ["shelter", "refuge"]
//! color = "ff00ff00"
//!
//! [categories."shelter&medical"]
//! icon = "http://maps.google.com/mapfiles/kml/shapes/hospitals.png"
//! ```

use indexmap::IndexMap;
use placemark_common::{StyleOverride, StyleSpec};
use serde::{Deserialize, Serialize};

/// Name of the entry supplying the default style.
pub const WILDCARD: &str = "*";
/// Separator between member rule names in a compound rule name.
pub const COMBINATOR: char = '&';

/// Entry as written in the config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryEntry {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifiers: Vec<String>,
    #[serde(flatten)]
    pub style: StyleOverride,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RuleKind {
    /// Matches when any identifier occurs in the place type.
    Simple { identifiers: Vec<String> },
    /// Matches when every referenced simple rule matches.
    Compound { members: Vec<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRule {
    pub name: String,
    pub kind: RuleKind,
    pub style: StyleOverride,
}

impl CategoryRule {
    pub fn simple(name: &str, identifiers: &[&str], style: StyleOverride) -> Self {
        Self {
            name: name.to_string(),
            kind: RuleKind::Simple { identifiers: clean_identifiers(name, identifiers.iter().map(|s| s.to_string())) },
            style,
        }
    }

    pub fn is_compound(&self) -> bool {
        matches!(self.kind, RuleKind::Compound { .. })
    }
}

/// Ordered rule table. Rules are evaluated in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "IndexMap<String, CategoryEntry>", into = "IndexMap<String, CategoryEntry>")]
pub struct CategoryTable {
    wildcard: StyleSpec,
    rules: Vec<CategoryRule>,
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self { wildcard: StyleSpec::default(), rules: Vec::new() }
    }
}

impl CategoryTable {
    pub fn new(wildcard: StyleSpec, rules: Vec<CategoryRule>) -> Self {
        Self { wildcard, rules }
    }

    pub fn wildcard(&self) -> &StyleSpec {
        &self.wildcard
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Identifiers of the simple rule with this name.
    pub fn simple_identifiers(&self, name: &str) -> Option<&[String]> {
        self.rules.iter().find_map(|r| match &r.kind {
            RuleKind::Simple { identifiers } if r.name == name => Some(identifiers.as_slice()),
            _ => None,
        })
    }

    /// Problems that don't prevent loading but make a rule useless.
    pub fn warnings(&self) -> Vec<String> {
        let mut out = Vec::new();
        for rule in &self.rules {
            match &rule.kind {
                RuleKind::Simple { identifiers } if identifiers.is_empty() => {
                    out.push(format!("Category '{}' has no identifiers and never matches", rule.name));
                }
                RuleKind::Compound { members } => {
                    let known: Vec<&String> = members
                        .iter()
                        .filter(|m| self.simple_identifiers(m).is_some())
                        .collect();
                    for m in members.iter().filter(|m| !known.contains(m)) {
                        out.push(format!("Compound category '{}' references unknown category '{}'", rule.name, m));
                    }
                    if known.is_empty() {
                        out.push(format!("Compound category '{}' has no known members and matches every place", rule.name));
                    }
                }
                _ => {}
            }
        }
        out
    }
}

impl From<IndexMap<String, CategoryEntry>> for CategoryTable {
    fn from(map: IndexMap<String, CategoryEntry>) -> Self {
        let mut wildcard = StyleSpec::default();
        let mut rules = Vec::with_capacity(map.len());

        for (name, entry) in map {
            if name == WILDCARD {
                wildcard = StyleSpec::from_override(&entry.style);
                continue;
            }
            let kind = if name.contains(COMBINATOR) {
                RuleKind::Compound {
                    members: name
                        .split(COMBINATOR)
                        .map(str::trim)
                        .filter(|m| !m.is_empty())
                        .map(String::from)
                        .collect(),
                }
            } else {
                RuleKind::Simple { identifiers: clean_identifiers(&name, entry.identifiers.into_iter()) }
            };
            rules.push(CategoryRule { name, kind, style: entry.style });
        }

        Self { wildcard, rules }
    }
}

impl From<CategoryTable> for IndexMap<String, CategoryEntry> {
    fn from(table: CategoryTable) -> Self {
        let wildcard = CategoryEntry {
            identifiers: Vec::new(),
            style: StyleOverride {
                scale: Some(table.wildcard.scale),
                label_scale: Some(table.wildcard.label_scale),
                color: Some(table.wildcard.color),
                icon: Some(table.wildcard.icon),
            },
        };
        std::iter::once((WILDCARD.to_string(), wildcard))
            .chain(table.rules.into_iter().map(|r| {
                let identifiers = match r.kind {
                    RuleKind::Simple { identifiers } => identifiers,
                    RuleKind::Compound { .. } => Vec::new(),
                };
                (r.name, CategoryEntry { identifiers, style: r.style })
            }))
            .collect()
    }
}

// Identifiers are matched against the lower-cased place type, padding included.
fn clean_identifiers(rule: &str, raw: impl Iterator<Item = String>) -> Vec<String> {
    raw.filter_map(|s| {
        if s.is_empty() {
            tracing::warn!(category = %rule, "Ignoring empty identifier");
            return None;
        }
        if s.trim().is_empty() {
            tracing::warn!(category = %rule, "Whitespace-only identifier matches any multi-word type");
        }
        Some(s.to_lowercase())
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> CategoryTable {
        let json = r#"{
            "*": { "scale": 1.0, "label_scale": 0.8, "color": "ffffffff", "icon": "default.png" },
            "shelter": { "identifiers": ["Shelter", "refuge"], "color": "ff00ff00" },
            "medical": { "identifiers": ["clinic", "medical"] },
            "shelter&medical": { "icon": "hospital.png" },
            "shelter&pets": {}
        }"#;
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_wildcard_separated_from_rules() {
        let t = sample();
        assert_eq!(t.wildcard().icon, "default.png");
        assert_eq!(t.wildcard().label_scale, 0.8);
        assert_eq!(t.rules().len(), 4);
        assert!(t.rules().iter().all(|r| r.name != WILDCARD));
    }

    #[test]
    fn test_compound_detected_by_combinator() {
        let t = sample();
        let names: Vec<(&str, bool)> = t.rules().iter().map(|r| (r.name.as_str(), r.is_compound())).collect();
        assert_eq!(names, vec![
            ("shelter", false),
            ("medical", false),
            ("shelter&medical", true),
            ("shelter&pets", true),
        ]);
        assert_eq!(t.rules()[2].kind, RuleKind::Compound {
            members: vec!["shelter".to_string(), "medical".to_string()],
        });
    }

    #[test]
    fn test_identifiers_lowercased() {
        let t = sample();
        assert_eq!(
            t.simple_identifiers("shelter").unwrap(),
            &["shelter".to_string(), "refuge".to_string()]
        );
        assert!(t.simple_identifiers("shelter&medical").is_none());
    }

    #[test]
    fn test_identifier_padding_kept() {
        let t: CategoryTable =
            serde_json::from_str(r#"{ "outpost": { "identifiers": [" post", "", "Depot "] } }"#).unwrap();
        assert_eq!(
            t.simple_identifiers("outpost").unwrap(),
            &[" post".to_string(), "depot ".to_string()]
        );
    }

    #[test]
    fn test_warns_on_dangling_member() {
        let w = sample().warnings();
        assert_eq!(w.len(), 1);
        assert!(w[0].contains("'pets'"));
    }

    #[test]
    fn test_warns_on_compound_without_known_members() {
        let t: CategoryTable = serde_json::from_str(r#"{ "ghost&phantom": { "color": "ff123456" } }"#).unwrap();
        let w = t.warnings();
        assert_eq!(w.len(), 3);
        assert!(w[2].contains("matches every place"));
    }

    #[test]
    fn test_missing_wildcard_uses_defaults() {
        let t: CategoryTable = serde_json::from_str(r#"{ "shelter": { "identifiers": ["shelter"] } }"#).unwrap();
        assert_eq!(t.wildcard(), &StyleSpec::default());
    }
}
