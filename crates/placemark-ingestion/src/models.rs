//! Pipeline output records.

use placemark_common::{CanonicalPlace, Coordinates, StyleSpec};
use serde::{Deserialize, Serialize};

/// A resolved place with its computed style, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedPlace {
    #[serde(flatten)]
    pub place: CanonicalPlace,
    pub style: StyleSpec,
}

impl ClassifiedPlace {
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.place.location.coordinates()
    }

    pub fn name(&self) -> String {
        self.place.name()
    }

    pub fn category(&self) -> &str {
        &self.place.category
    }
}
