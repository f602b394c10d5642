//! End-to-end pipeline runs over CSV input with an in-memory geocoder.
//!
//! Run with:
//! ```bash
//! cargo test --package placemark-ingestion --test test_pipeline_e2e
//! ```

use placemark_common::{Coordinates, FieldValue, Location};
use placemark_config::Settings;
use placemark_ingestion::{read_records, run_pipeline, DisabledGeocoder, StaticGeocoder};
use placemark_test_utils::fixtures;
use pretty_assertions::assert_eq;

const SURVEY: &str = "\
Location Name,Address,Facility Type,Capacity,Telephone
Red Cross Center,1 Red Cross Way,Shelter,150,555-0100
Harbour Clinic,\"18.4607, -64.5253\",Medical Clinic,twenty,
Church Hall Shelter & Clinic,\"18.43N, 64.62W\",shelter and medical clinic,\"1,000\",
Lost Depot,Nowhere Road,Warehouse,40,
Bad Coordinates,18.4607 -64.5253,Shelter,10,
";

fn geocoder() -> StaticGeocoder {
    StaticGeocoder::new([("1 Red Cross Way", (18.4286, -64.6185))])
}

fn settings() -> Settings {
    Settings::from_json_str(fixtures::SHELTER_SETTINGS_JSON).unwrap()
}

#[tokio::test]
async fn test_red_cross_center_is_geocoded_and_styled() {
    let records = read_records(fixtures::RED_CROSS_CSV.as_bytes()).unwrap();
    let result = run_pipeline(&records, &settings(), &geocoder(), None).await;

    assert_eq!(result.places.len(), 1);
    let red_cross = &result.places[0];
    assert_eq!(red_cross.name(), "Red Cross Center");
    assert_eq!(red_cross.category(), "shelter");
    assert_eq!(red_cross.place.get("size"), Some(&FieldValue::Number(150.0)));
    assert_eq!(red_cross.place.address.as_deref(), Some("1 Red Cross Way"));
    assert_eq!(red_cross.coordinates(), Coordinates::new(18.4286, -64.6185));

    // Wildcard scale 1.2, shelter colour, capacity 150 → (150 / 20) ^ 0.25
    let m = 7.5_f64.powf(0.25);
    assert!((red_cross.style.scale - 1.2 * m).abs() < 1e-9);
    assert!((red_cross.style.label_scale - 0.8 * m).abs() < 1e-9);
    assert_eq!(red_cross.style.color, "ff00ff00");
    assert_eq!(red_cross.style.icon, fixtures::DEFAULT_ICON);
}

#[tokio::test]
async fn test_survey_order_drops_and_categories() {
    let records = read_records(SURVEY.as_bytes()).unwrap();
    let result = run_pipeline(&records, &settings(), &geocoder(), None).await;

    assert_eq!(result.records_in, 5);
    assert_eq!(result.from_coordinates, 2);
    assert_eq!(result.geocoded, 1);
    assert_eq!(result.dropped, 2);
    assert_eq!(result.errors.len(), 2);
    assert!(result.errors[0].contains("Lost Depot"));
    assert!(result.errors[1].contains("Bad Coordinates"));

    let summary: Vec<(String, &str)> = result.places.iter().map(|p| (p.name(), p.category())).collect();
    assert_eq!(
        summary,
        vec![
            ("Red Cross Center".to_string(), "shelter"),
            ("Harbour Clinic".to_string(), "medical"),
            ("Church Hall Shelter & Clinic".to_string(), "shelter&medical"),
        ]
    );

    let clinic = &result.places[1];
    assert_eq!(clinic.place.get("size"), Some(&FieldValue::Number(20.0)));
    assert_eq!(clinic.place.address, None);
    assert_eq!(clinic.style.color, "ff0000ff");
    assert!((clinic.style.scale - 1.2).abs() < 1e-9);

    let hall = &result.places[2];
    assert_eq!(hall.place.location, Location::Coordinates(Coordinates::new(18.43, -64.62).unwrap()));
    assert_eq!(hall.style.icon, fixtures::HOSPITAL_ICON);
    // medical is declared after shelter, so its colour wins
    assert_eq!(hall.style.color, "ff0000ff");
}

#[tokio::test]
async fn test_disabled_geocoder_keeps_only_coordinate_rows() {
    let records = read_records(SURVEY.as_bytes()).unwrap();
    let result = run_pipeline(&records, &settings(), &DisabledGeocoder, None).await;

    let names: Vec<String> = result.places.iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["Harbour Clinic", "Church Hall Shelter & Clinic"]);
    assert_eq!(result.geocoded, 0);
    assert_eq!(result.dropped, 3);
}

#[tokio::test]
async fn test_output_serialises_with_style() {
    let records = read_records(fixtures::RED_CROSS_CSV.as_bytes()).unwrap();
    let result = run_pipeline(&records, &settings(), &geocoder(), None).await;

    let json = serde_json::to_value(&result.places[0]).unwrap();
    assert_eq!(json["fields"]["name"], "Red Cross Center");
    assert_eq!(json["fields"]["size"], 150.0);
    assert_eq!(json["category"], "shelter");
    assert_eq!(json["location"]["coordinates"]["lat"], 18.4286);
    assert_eq!(json["style"]["color"], "ff00ff00");
}
