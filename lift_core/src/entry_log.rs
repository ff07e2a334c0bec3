//! Read-only access to a workout's entry log.
//!
//! The app that records workouts appends to the log; Lift only reads it.
//! Two formats are understood:
//! - JSON Lines (one `Entry` per line), the default
//! - CSV with a header row, for files exported from spreadsheets
//!
//! Damaged records are logged and skipped rather than failing the whole
//! read, so a half-written last line never hides the rest of the workout.

use crate::{Entry, Error, Measurement, Result, Unit};
use fs2::FileExt;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// CSV row format for exported logs
#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    weight: Option<f64>,
    weight_unit: Option<String>,
    reps: Option<u32>,
    distance: Option<f64>,
    distance_unit: Option<String>,
    duration: Option<f64>,
    duration_unit: Option<String>,
    rest: Option<f64>,
    rest_unit: Option<String>,
    order: Option<u32>,
}

impl TryFrom<CsvRow> for Entry {
    type Error = Error;

    fn try_from(row: CsvRow) -> Result<Self> {
        Ok(Entry {
            name: row.name.into(),
            weight: measurement("weight", row.weight, row.weight_unit)?,
            reps: row.reps,
            distance: measurement("distance", row.distance, row.distance_unit)?,
            duration: measurement("duration", row.duration, row.duration_unit)?,
            rest: measurement("rest", row.rest, row.rest_unit)?,
            order: row.order,
        })
    }
}

/// Pair a CSV value column with its unit column
fn measurement<U: Unit>(
    column: &str,
    value: Option<f64>,
    unit: Option<String>,
) -> Result<Option<Measurement<U>>> {
    match (value, unit) {
        (None, _) => Ok(None),
        (Some(value), Some(symbol)) => U::from_symbol(&symbol)
            .map(|unit| Some(Measurement::new(value, unit)))
            .ok_or_else(|| Error::InvalidEntry(format!("unknown {} unit '{}'", column, symbol))),
        (Some(_), None) => Err(Error::InvalidEntry(format!("{} has no unit", column))),
    }
}

/// Load a log and return its entries in performance order
///
/// `.csv` files are read as CSV, anything else as JSON Lines. Entries
/// without reps, distance or duration are dropped with a warning. Entries
/// without an explicit `order` keep their position in the file.
pub fn load_entries(path: &Path) -> Result<Vec<Entry>> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let entries = if is_csv {
        read_csv(path)?
    } else {
        read_jsonl(path)?
    };

    let entries = into_performance_order(entries);
    tracing::info!("Loaded {} entries from {:?}", entries.len(), path);
    Ok(entries)
}

/// Read every parseable entry from a JSON Lines log, in file order
pub fn read_jsonl(path: &Path) -> Result<Vec<Entry>> {
    let file = File::open(path)?;
    // Acquire shared lock so a concurrent append is never half-read
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut entries = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<Entry>(&line) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::warn!("Failed to parse entry at line {}: {}", line_num + 1, e);
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} entries from JSONL log", entries.len());
    Ok(entries)
}

/// Read every valid row from a CSV log, in file order
pub fn read_csv(path: &Path) -> Result<Vec<Entry>> {
    let file = File::open(path)?;
    file.lock_shared()?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(&file);

    let mut entries = Vec::new();
    for (row_num, result) in reader.deserialize::<CsvRow>().enumerate() {
        match result.map_err(Error::from).and_then(Entry::try_from) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::warn!("Skipping CSV row {}: {}", row_num + 1, e);
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} entries from CSV log", entries.len());
    Ok(entries)
}

/// Drop entries that record nothing and sort the rest by `order`
fn into_performance_order(entries: Vec<Entry>) -> Vec<Entry> {
    let mut kept: Vec<Entry> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(position, mut entry)| {
            if !entry.has_measurement() {
                tracing::warn!(
                    "Dropping entry {} ({}): no reps, distance or duration",
                    position + 1,
                    entry.name
                );
                return None;
            }
            entry
                .order
                .get_or_insert(u32::try_from(position).unwrap_or(u32::MAX));
            Some(entry)
        })
        .collect();

    // Stable, so equal orders keep file order
    kept.sort_by_key(|entry| entry.order);
    kept
}
