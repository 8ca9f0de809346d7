//! Lag, calendar, and label feature engineering.
//!
//! Works strictly within a single group's chronologically sorted sample
//! sequence. For a row at bucket `t`, lag-k is the ratio at `t - k*width`
//! and the label is the ratio at `t + horizon*width`; both must come from
//! buckets exactly that far away, so a gap in the series yields no row
//! rather than a feature smeared across the gap. Rows missing any lag or
//! the label are dropped: the boundary positions of every group's
//! sequence. No feature ever depends on a bucket at or after the label's
//! bucket.

use chrono::{Datelike, Duration, Timelike};
use kc_common::{FeatureRow, OccupancySample};
use kc_config::PipelineConfig;
use tracing::debug;

/// Build the training table from the sorted occupancy sample series.
pub fn build(samples: &[OccupancySample], config: &PipelineConfig) -> Vec<FeatureRow> {
    let width = Duration::minutes(i64::from(config.bucket_minutes));
    let lag_depth = config.lag_depth;
    let horizon = config.horizon_buckets;

    let mut rows = Vec::new();
    for group_slice in group_runs(samples) {
        for i in lag_depth..group_slice.len().saturating_sub(horizon) {
            let current = &group_slice[i];

            let mut lags = Vec::with_capacity(lag_depth);
            for k in 1..=lag_depth {
                let past = &group_slice[i - k];
                if past.bucket_start != current.bucket_start - width * k as i32 {
                    lags.clear();
                    break;
                }
                lags.push(past.ratio);
            }
            if lags.len() != lag_depth {
                continue;
            }

            let future = &group_slice[i + horizon];
            if future.bucket_start != current.bucket_start + width * horizon as i32 {
                continue;
            }

            rows.push(FeatureRow {
                group: current.group,
                bucket_start: current.bucket_start,
                occupancy_ratio: current.ratio,
                hour: current.bucket_start.hour(),
                day_of_week: current.bucket_start.weekday().num_days_from_monday(),
                lags,
                label: future.ratio,
            });
        }
    }

    debug!(
        rows = rows.len(),
        samples = samples.len(),
        "Built feature table"
    );
    rows
}

/// Split the sorted sample series into per-group runs.
fn group_runs(samples: &[OccupancySample]) -> impl Iterator<Item = &[OccupancySample]> {
    samples.chunk_by(|a, b| a.group == b.group)
}
