//! CSV event-log ingestion.
//!
//! The log needs at least the columns `kerbsideid`, `status`, and
//! `status_timestamp`. A missing column is fatal; a row the CSV reader
//! cannot decode, or whose id or timestamp fails to parse, is dropped and
//! counted. Timestamps are accepted
//! as RFC 3339 or as naive `YYYY-MM-DD HH:MM:SS[.fff]` (assumed UTC).

use chrono::{DateTime, NaiveDateTime, Utc};
use kc_common::{BayId, Error, Result, SensorEvent};
use std::io::Read;
use tracing::{info, warn};

/// Required event-log columns.
pub const BAY_COLUMN: &str = "kerbsideid";
pub const STATUS_COLUMN: &str = "status";
pub const TIMESTAMP_COLUMN: &str = "status_timestamp";

/// Per-run ingestion counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub rows_read: u64,
    pub rows_kept: u64,
    pub bad_record: u64,
    pub bad_bay_id: u64,
    pub bad_timestamp: u64,
}

impl IngestStats {
    pub fn rows_dropped(&self) -> u64 {
        self.rows_read - self.rows_kept
    }
}

/// Read all events from a CSV source.
///
/// Events keep their zero-based row number as `seq`, the explicit tie-break
/// key for identical timestamps within a bay.
pub fn read_events<R: Read>(reader: R) -> Result<(Vec<SensorEvent>, IngestStats)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| Error::Ingest(format!("cannot read header: {}", e)))?
        .clone();
    let bay_idx = column_index(&headers, BAY_COLUMN)?;
    let status_idx = column_index(&headers, STATUS_COLUMN)?;
    let ts_idx = column_index(&headers, TIMESTAMP_COLUMN)?;

    let mut events = Vec::new();
    let mut stats = IngestStats::default();

    for (seq, record) in csv_reader.records().enumerate() {
        stats.rows_read += 1;
        let record = match record {
            Ok(record) => record,
            // A ragged or otherwise unreadable row is dropped like any
            // other malformed row, not treated as fatal.
            Err(e) => {
                warn!(row = seq + 1, error = %e, "Dropped unreadable event row");
                stats.bad_record += 1;
                continue;
            }
        };

        let Some(bay) = record.get(bay_idx).and_then(parse_bay_id) else {
            stats.bad_bay_id += 1;
            continue;
        };
        let Some(timestamp) = record.get(ts_idx).and_then(parse_timestamp) else {
            stats.bad_timestamp += 1;
            continue;
        };
        let status = record.get(status_idx).unwrap_or("").to_string();

        stats.rows_kept += 1;
        events.push(SensorEvent {
            bay,
            status,
            timestamp,
            seq: seq as u64,
        });
    }

    if stats.rows_dropped() > 0 {
        warn!(
            dropped = stats.rows_dropped(),
            bad_record = stats.bad_record,
            bad_bay_id = stats.bad_bay_id,
            bad_timestamp = stats.bad_timestamp,
            "Dropped malformed event rows"
        );
    }
    info!(rows = stats.rows_kept, "Ingested event log");
    Ok((events, stats))
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::MissingColumn(name.to_string()))
}

/// Parse a bay identifier. Accepts plain integers and the float spelling
/// (`"1001.0"`) some exports produce.
fn parse_bay_id(field: &str) -> Option<BayId> {
    if let Ok(id) = field.parse::<u32>() {
        return Some(BayId(id));
    }
    let value = field.parse::<f64>().ok()?;
    if value.fract() == 0.0 && value >= 0.0 && value <= u32::MAX as f64 {
        Some(BayId(value as u32))
    } else {
        None
    }
}

/// Parse an observation timestamp to a timezone-aware instant.
fn parse_timestamp(field: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(field) {
        return Some(ts.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(field, fmt) {
            return Some(naive.and_utc());
        }
    }
    None
}
