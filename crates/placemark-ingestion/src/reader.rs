//! CSV record reader.
//!
//! The header row supplies column names; every following row becomes one
//! `RawRecord` in file order. Short rows yield fewer columns, extra cells
//! past the header are ignored.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use placemark_common::RawRecord;
use tracing::{debug, info};

/// Read every row of a CSV source.
pub fn read_records<R: Read>(source: R) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let headers = reader.headers()?.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    debug!(columns = ?headers, "CSV header");

    let mut records = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("malformed CSV row {}", row_idx + 1))?;
        let record: RawRecord = headers
            .iter()
            .zip(row.iter())
            .map(|(column, value)| (column.clone(), value.to_string()))
            .collect();
        records.push(record);
    }
    Ok(records)
}

/// Read one CSV file.
pub fn read_csv_file(path: &Path) -> Result<Vec<RawRecord>> {
    let file = std::fs::File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let records = read_records(file).with_context(|| format!("cannot read {}", path.display()))?;
    info!(path = %path.display(), n = records.len(), "CSV file loaded");
    Ok(records)
}

/// Read several CSV files and concatenate their rows in argument order.
pub fn read_csv_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<RawRecord>> {
    let mut all = Vec::new();
    for path in paths {
        all.extend(read_csv_file(path.as_ref())?);
    }
    Ok(all)
}
