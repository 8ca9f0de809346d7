//! Raw sensor events and reconstructed state intervals.

use crate::group::BayId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One observation of a single bay's status at an instant.
///
/// Events arrive unordered; every derived computation first sorts by
/// `(bay, timestamp, seq)`. `seq` is the ingest row number and serves as the
/// explicit tie-break for events carrying identical timestamps, so results
/// never depend on incidental input arrival order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorEvent {
    pub bay: BayId,
    /// Raw status code as reported by the feed (e.g. "Present",
    /// "Unoccupied"). Interpretation is the classifier's job.
    pub status: String,
    pub timestamp: DateTime<Utc>,
    /// Zero-based row number in the ingested log.
    pub seq: u64,
}

/// A maximal span during which one bay's status did not change.
///
/// Bounded by two consecutive events for the same bay. The final event per
/// bay has no known end and produces no interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateInterval {
    pub bay: BayId,
    pub status: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl StateInterval {
    /// Interval length in minutes.
    pub fn duration_minutes(&self) -> f64 {
        (self.end - self.start).num_seconds() as f64 / 60.0
    }
}
