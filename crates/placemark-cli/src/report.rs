//! JSON report written by the binary.

use chrono::{DateTime, Utc};
use placemark_config::{DisplayField, DisplayTable};
use placemark_ingestion::{ClassifiedPlace, PipelineResult};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct PlaceReport<'a> {
    #[serde(flatten)]
    pub place: &'a ClassifiedPlace,
    /// Attribute rows in display-table order, for the renderer's description.
    pub display: Vec<DisplayField>,
}

#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub records_in: usize,
    pub from_coordinates: usize,
    pub geocoded: usize,
    pub dropped: usize,
    pub duration_ms: u64,
    pub errors: &'a [String],
    pub places: Vec<PlaceReport<'a>>,
}

impl<'a> RunReport<'a> {
    pub fn new(result: &'a PipelineResult, display: &DisplayTable) -> Self {
        Self {
            run_id: result.run_id,
            started_at: result.started_at,
            records_in: result.records_in,
            from_coordinates: result.from_coordinates,
            geocoded: result.geocoded,
            dropped: result.dropped,
            duration_ms: result.duration_ms,
            errors: &result.errors,
            places: result
                .places
                .iter()
                .map(|place| PlaceReport { place, display: display.display_fields(&place.place) })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use placemark_ingestion::{run_pipeline, StaticGeocoder};
    use placemark_test_utils::fixtures;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_report_includes_display_rows() {
        let settings = fixtures::shelter_settings();
        let geocoder = StaticGeocoder::new([("1 Red Cross Way", (18.4286, -64.6185))]);
        let result = run_pipeline(&[fixtures::red_cross_row()], &settings, &geocoder, None).await;

        let json = serde_json::to_value(RunReport::new(&result, &settings.display)).unwrap();
        assert_eq!(json["records_in"], 1);
        let place = &json["places"][0];
        assert_eq!(place["category"], "shelter");
        // phone is empty, so only type and size are listed
        let fields: Vec<&str> = place["display"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["type", "size"]);
        assert_eq!(place["display"][1]["unit"], "people");
    }
}
