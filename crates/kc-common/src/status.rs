//! Status classification table.
//!
//! The raw feed reports a categorical status string per event. Exactly the
//! configured occupied codes count as occupied; configured vacant codes are
//! known-vacant; anything else is `Unrecognized`. Unrecognized codes still
//! contribute a vacant indicator to the occupancy mean (matching the
//! historical arithmetic of the feed), but callers tally them so the anomaly
//! is visible in ingest stats rather than silently absorbed.

use std::collections::HashSet;

/// How a raw status code classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Occupied,
    Vacant,
    /// Not in either configured set. Counts as vacant in the occupancy
    /// mean; callers should tally and log it.
    Unrecognized,
}

/// Injectable occupied/vacant classification table.
#[derive(Debug, Clone)]
pub struct StatusClassifier {
    occupied: HashSet<String>,
    vacant: HashSet<String>,
}

impl StatusClassifier {
    pub fn new<I, J, S>(occupied: I, vacant: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StatusClassifier {
            occupied: occupied.into_iter().map(Into::into).collect(),
            vacant: vacant.into_iter().map(Into::into).collect(),
        }
    }

    pub fn classify(&self, status: &str) -> StatusKind {
        if self.occupied.contains(status) {
            StatusKind::Occupied
        } else if self.vacant.contains(status) {
            StatusKind::Vacant
        } else {
            StatusKind::Unrecognized
        }
    }

    /// Binary occupied indicator for the occupancy mean.
    pub fn indicator(&self, status: &str) -> f64 {
        match self.classify(status) {
            StatusKind::Occupied => 1.0,
            StatusKind::Vacant | StatusKind::Unrecognized => 0.0,
        }
    }
}

impl Default for StatusClassifier {
    /// The feed's historical vocabulary: "Present" occupied, "Unoccupied"
    /// known-vacant.
    fn default() -> Self {
        StatusClassifier::new(["Present"], ["Unoccupied"])
    }
}
