//! Resampled occupancy samples and engineered feature rows.

use crate::group::GroupId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mean occupancy of one group inside one time bucket.
///
/// Buckets are fixed-width, right-open, calendar-aligned. A (group, bucket)
/// pair with zero events produces no sample at all: absence of data, not
/// false vacancy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancySample {
    pub group: GroupId,
    pub bucket_start: DateTime<Utc>,
    /// Mean of the binary occupied indicators, in [0.0, 1.0].
    pub ratio: f64,
}

/// One training row: an occupancy sample with calendar and lag features and
/// the forecast label.
///
/// `feature_vector` fixes the positional layout of model input:
/// `[group_id, occupancy_ratio, hour, day_of_week, lag_1, .., lag_n]`.
/// The feature *names* for that same layout come from the pipeline
/// configuration; the exported manifest pins the pairing for serving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub group: GroupId,
    pub bucket_start: DateTime<Utc>,
    pub occupancy_ratio: f64,
    /// Hour of day of this row's own bucket, 0..=23.
    pub hour: u32,
    /// Day of week of this row's own bucket, Monday = 0.
    pub day_of_week: u32,
    /// Lagged ratios, nearest first: `lags[k]` is the ratio k+1 buckets back.
    pub lags: Vec<f64>,
    /// Ratio `horizon` buckets ahead, the training target.
    pub label: f64,
}

impl FeatureRow {
    /// Model input columns in training order.
    pub fn feature_vector(&self) -> Vec<f64> {
        let mut v = Vec::with_capacity(4 + self.lags.len());
        v.push(self.group.0 as f64);
        v.push(self.occupancy_ratio);
        v.push(self.hour as f64);
        v.push(self.day_of_week as f64);
        v.extend_from_slice(&self.lags);
        v
    }
}
