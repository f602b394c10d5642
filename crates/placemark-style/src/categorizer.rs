//! Category assignment and style resolution.
//!
//! Rules are evaluated in declaration order against the lower-cased place
//! type. Every matching rule overwrites the style attributes it sets, and
//! the last match names the category:
//! - simple rule: any identifier is a substring of the type
//! - compound rule (`a&b`): every referenced simple rule matches
//!
//! A place nothing matches keeps the wildcard style and `"unknown"`.

use placemark_common::{CanonicalPlace, StyleSpec, UNKNOWN_CATEGORY};
use placemark_config::{CategoryRule, CategoryTable, RuleKind};
use tracing::debug;

use crate::scale::apply_capacity;

pub struct Categorizer<'a> {
    table: &'a CategoryTable,
}

impl<'a> Categorizer<'a> {
    pub fn new(table: &'a CategoryTable) -> Self {
        Self { table }
    }

    /// Rules matching a place type, in declaration order.
    pub fn matching_rules(&self, place_type: &str) -> Vec<&'a CategoryRule> {
        let type_lower = place_type.to_lowercase();
        self.table
            .rules()
            .iter()
            .filter(|r| self.rule_matches(r, &type_lower))
            .collect()
    }

    /// Assign `place.category` and return its capacity-scaled style.
    pub fn classify(&self, place: &mut CanonicalPlace) -> StyleSpec {
        let mut style = self.table.wildcard().clone();
        let place_type = place.place_type();

        place.category = UNKNOWN_CATEGORY.to_string();
        for rule in self.matching_rules(&place_type) {
            debug!(place = %place.name(), place_type = %place_type, category = %rule.name, "Category matched");
            style.merge(&rule.style);
            place.category = rule.name.clone();
        }

        if let Some(m) = apply_capacity(&mut style, place) {
            debug!(place = %place.name(), multiplier = m, scale = style.scale, "Capacity scaling applied");
        }
        style
    }

    fn rule_matches(&self, rule: &CategoryRule, type_lower: &str) -> bool {
        match &rule.kind {
            RuleKind::Simple { identifiers } => any_identifier(identifiers, type_lower),
            RuleKind::Compound { members } => {
                // Members that don't name a simple rule are skipped, so a rule
                // with no known members matches every place.
                members
                    .iter()
                    .filter_map(|m| self.table.simple_identifiers(m))
                    .all(|g| any_identifier(g, type_lower))
            }
        }
    }
}

fn any_identifier(identifiers: &[String], type_lower: &str) -> bool {
    identifiers.iter().any(|id| type_lower.contains(id.as_str()))
}

/// Classify one place against a category table.
pub fn classify(place: &mut CanonicalPlace, table: &CategoryTable) -> StyleSpec {
    Categorizer::new(table).classify(place)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
