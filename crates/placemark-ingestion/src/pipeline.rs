//! End-to-end placemark pipeline.
//!
//! Orchestrates one run over a batch of raw records:
//!   1. Normalise every row onto the canonical schema
//!   2. Resolve each location (parse coordinates or geocode an address)
//!   3. Drop places without resolved coordinates
//!   4. Classify the survivors and compute their style
//!   5. Emit progress events via broadcast channel
//!
//! Records are processed one at a time, so output order equals input order.
//! A failure on one record is logged, recorded in `errors`, and the record
//! is dropped; the run itself never fails.

use std::time::Instant;

use chrono::{DateTime, Utc};
use placemark_common::{CanonicalPlace, Location, RawRecord};
use placemark_config::Settings;
use placemark_style::Categorizer;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::location::{resolve, Resolution};
use crate::models::ClassifiedPlace;
use crate::normalise::SchemaNormaliser;
use crate::sources::Geocoder;

// ── Progress events ───────────────────────────────────────────────────────────

/// Progress event emitted during a pipeline run (cloneable for broadcast).
#[derive(Debug, Clone, Serialize)]
pub struct PipelineProgress {
    pub run_id: Uuid,
    pub stage: String,
    pub message: String,
    pub records_done: usize,
    pub records_total: usize,
    pub error: Option<String>,
}

// ── Result summary ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub records_in: usize,
    pub normalised: usize,
    /// Places whose coordinates were read straight from the location text.
    pub from_coordinates: usize,
    pub geocoded: usize,
    pub dropped: usize,
    /// One entry per dropped record.
    pub errors: Vec<String>,
    pub duration_ms: u64,
    pub places: Vec<ClassifiedPlace>,
}

// ── Pipeline orchestrator ─────────────────────────────────────────────────────

/// Runs normalise → resolve → filter → classify over `records`.
///
/// Progress events are sent via `progress_tx` if provided.
#[instrument(skip_all, fields(records = records.len()))]
pub async fn run_pipeline(
    records: &[RawRecord],
    settings: &Settings,
    geocoder: &dyn Geocoder,
    progress_tx: Option<broadcast::Sender<PipelineProgress>>,
) -> PipelineResult {
    let run_id = Uuid::new_v4();
    let started_at = Utc::now();
    let t0 = Instant::now();
    let total = records.len();

    info!(run_id = %run_id, records = total, "Starting placemark pipeline");

    let emit = |stage: &str, message: String, records_done: usize, error: Option<String>| {
        if let Some(ref tx) = progress_tx {
            let _ = tx.send(PipelineProgress {
                run_id,
                stage: stage.to_string(),
                message,
                records_done,
                records_total: total,
                error,
            });
        }
    };

    let mut result = PipelineResult {
        run_id,
        started_at,
        records_in: total,
        normalised: 0,
        from_coordinates: 0,
        geocoded: 0,
        dropped: 0,
        errors: Vec::new(),
        duration_ms: 0,
        places: Vec::new(),
    };

    // ── 1. Normalise ──────────────────────────────────────────────────────────
    let normaliser = SchemaNormaliser::new(&settings.synonyms);
    let mut places: Vec<CanonicalPlace> = records.iter().map(|r| normaliser.normalise(r)).collect();
    result.normalised = places.len();
    emit("normalise", format!("Normalised {total} records"), total, None);

    // ── 2. Resolve locations ──────────────────────────────────────────────────
    for (idx, place) in places.iter_mut().enumerate() {
        match resolve(place, geocoder).await {
            Ok(Resolution::Parsed(_)) => result.from_coordinates += 1,
            Ok(Resolution::Geocoded(_)) => result.geocoded += 1,
            Ok(Resolution::Skipped) => {
                debug!(record = idx + 1, name = %place.name(), "No usable location");
            }
            Err(e) => {
                // resolve() has already logged the failure
                let msg = format!("record {} ('{}'): {e}", idx + 1, place.name());
                emit("resolve", format!("Dropping record {}", idx + 1), idx + 1, Some(msg.clone()));
                result.errors.push(msg);
            }
        }
    }
    emit(
        "resolve",
        format!("{} parsed, {} geocoded", result.from_coordinates, result.geocoded),
        total,
        None,
    );

    // ── 3. Filter ─────────────────────────────────────────────────────────────
    let mut kept = Vec::with_capacity(places.len());
    for (idx, place) in places.into_iter().enumerate() {
        match place.location {
            Location::Coordinates(_) => kept.push(place),
            Location::Pending => {
                result.errors.push(format!("record {} ('{}'): no usable location", idx + 1, place.name()));
            }
            Location::Unresolved => {}
        }
    }
    result.dropped = total - kept.len();
    emit("filter", format!("Kept {} of {total} records", kept.len()), total, None);

    // ── 4. Classify ───────────────────────────────────────────────────────────
    let categorizer = Categorizer::new(&settings.categories);
    result.places = kept
        .into_iter()
        .map(|mut place| {
            let style = categorizer.classify(&mut place);
            ClassifiedPlace { place, style }
        })
        .collect();

    result.duration_ms = t0.elapsed().as_millis() as u64;

    info!(
        run_id = %run_id,
        records_in = result.records_in,
        from_coordinates = result.from_coordinates,
        geocoded = result.geocoded,
        dropped = result.dropped,
        duration_ms = result.duration_ms,
        "Placemark pipeline complete"
    );

    emit(
        "complete",
        format!("Done. {} places emitted, {} dropped.", result.places.len(), result.dropped),
        total,
        None,
    );

    result
}
