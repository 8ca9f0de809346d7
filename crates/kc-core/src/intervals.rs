//! State-interval reconstruction.
//!
//! Pairs each event with its immediate successor for the same bay to form
//! contiguous (start, end, status) spans. The final event per bay has no
//! known end and is dropped, never extrapolated. This table is a reporting
//! byproduct; the trainable pipeline consumes the raw events directly.

use kc_common::{Result, SensorEvent, StateInterval};
use std::io::Write;

/// Reconstruct state intervals from an unordered event batch.
///
/// Events are ordered by (bay, timestamp, seq); `seq` is the documented
/// tie-break for simultaneous observations. The output is grouped by
/// bay, ascending by start time within each bay.
pub fn reconstruct(events: &[SensorEvent]) -> Vec<StateInterval> {
    let mut ordered: Vec<&SensorEvent> = events.iter().collect();
    ordered.sort_by_key(|e| (e.bay, e.timestamp, e.seq));

    let mut intervals = Vec::new();
    for pair in ordered.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        if current.bay != next.bay {
            continue;
        }
        intervals.push(StateInterval {
            bay: current.bay,
            status: current.status.clone(),
            start: current.timestamp,
            end: next.timestamp,
        });
    }
    intervals
}

/// Write the interval table as CSV, RFC 3339 timestamps, duration in minutes.
pub fn write_csv<W: Write>(intervals: &[StateInterval], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["kerbsideid", "status", "start_time", "end_time", "duration_minutes"])
        .map_err(csv_error)?;
    for interval in intervals {
        csv_writer
            .write_record([
                interval.bay.to_string(),
                interval.status.clone(),
                interval.start.to_rfc3339(),
                interval.end.to_rfc3339(),
                format!("{}", interval.duration_minutes()),
            ])
            .map_err(csv_error)?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn csv_error(e: csv::Error) -> kc_common::Error {
    kc_common::Error::Io(std::io::Error::other(e))
}
