//! Group aggregation and time-bucket resampling.
//!
//! Maps each event to its bay group and a calendar-aligned, right-open time
//! bucket, then takes the mean occupied indicator per non-empty (group,
//! bucket) pair. Buckets with no events produce no sample: absence of data,
//! never an implicit zero.

use chrono::DateTime;
use kc_common::{GroupId, OccupancySample, SensorEvent, StatusClassifier, StatusKind};
use kc_config::PipelineConfig;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Per-run resampling counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResampleStats {
    pub events_bucketed: u64,
    /// Distinct status codes outside the configured vocabulary, with
    /// occurrence counts. They entered the mean as vacant.
    pub unrecognized_statuses: BTreeMap<String, u64>,
}

/// Resample an event batch into the per-group occupancy ratio series.
///
/// Output is sorted by (group, bucket start) ascending, the order the
/// feature builder's lag/label shifting relies on.
pub fn resample(
    events: &[SensorEvent],
    config: &PipelineConfig,
    classifier: &StatusClassifier,
) -> (Vec<OccupancySample>, ResampleStats) {
    let bucket_secs = i64::from(config.bucket_minutes) * 60;
    let mut stats = ResampleStats::default();

    // (group, bucket epoch) → (indicator sum, event count). BTreeMap keys
    // give the required output order for free.
    let mut buckets: BTreeMap<(GroupId, i64), (f64, u64)> = BTreeMap::new();

    for event in events {
        let group = GroupId::for_bay(event.bay, config.group_block_size);
        if classifier.classify(&event.status) == StatusKind::Unrecognized {
            *stats
                .unrecognized_statuses
                .entry(event.status.clone())
                .or_insert(0) += 1;
        }
        let bucket_epoch = event.timestamp.timestamp().div_euclid(bucket_secs) * bucket_secs;
        let entry = buckets.entry((group, bucket_epoch)).or_insert((0.0, 0));
        entry.0 += classifier.indicator(&event.status);
        entry.1 += 1;
        stats.events_bucketed += 1;
    }

    for (code, count) in &stats.unrecognized_statuses {
        warn!(status = %code, count, "Unrecognized status code counted as vacant");
    }

    let samples: Vec<OccupancySample> = buckets
        .into_iter()
        .map(|((group, epoch), (sum, count))| OccupancySample {
            group,
            // Bucket epochs are exact multiples of the width, always
            // representable.
            bucket_start: DateTime::from_timestamp(epoch, 0)
                .unwrap_or(chrono::DateTime::<chrono::Utc>::UNIX_EPOCH),
            ratio: sum / count as f64,
        })
        .collect();

    debug!(
        samples = samples.len(),
        events = stats.events_bucketed,
        "Resampled events into occupancy buckets"
    );
    (samples, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use kc_common::BayId;

    fn event(bay: u32, status: &str, h: u32, m: u32, s: u32, seq: u64) -> SensorEvent {
        SensorEvent {
            bay: BayId(bay),
            status: status.to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 6, 2, h, m, s).unwrap(),
            seq,
        }
    }

    fn run(events: &[SensorEvent]) -> (Vec<OccupancySample>, ResampleStats) {
        let config = PipelineConfig::default();
        resample(events, &config, &config.classifier())
    }

    #[test]
    fn mean_indicator_per_group_bucket() {
        let events = vec![
            event(100, "Present", 10, 0, 0, 0),
            event(105, "Unoccupied", 10, 5, 0, 1),
            event(119, "Present", 10, 14, 59, 2),
            event(120, "Present", 10, 1, 0, 3),
        ];
        let (samples, stats) = run(&events);
        assert_eq!(samples.len(), 2);

        // Bays 100/105/119 share group 100; two of three present.
        assert_eq!(samples[0].group, GroupId(100));
        assert!((samples[0].ratio - 2.0 / 3.0).abs() < 1e-12);
        // Bay 120 starts its own group.
        assert_eq!(samples[1].group, GroupId(120));
        assert_eq!(samples[1].ratio, 1.0);
        assert_eq!(stats.events_bucketed, 4);
        assert!(stats.unrecognized_statuses.is_empty());
    }

    #[test]
    fn buckets_are_calendar_aligned_right_open() {
        let events = vec![
            event(1, "Present", 10, 14, 59, 0),
            event(1, "Unoccupied", 10, 15, 0, 1),
        ];
        let (samples, _) = run(&events);
        assert_eq!(samples.len(), 2);
        assert_eq!(
            samples[0].bucket_start,
            Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap()
        );
        assert_eq!(
            samples[1].bucket_start,
            Utc.with_ymd_and_hms(2025, 6, 2, 10, 15, 0).unwrap()
        );
    }

    #[test]
    fn empty_buckets_are_absent_not_zero() {
        let events = vec![
            event(1, "Present", 10, 0, 0, 0),
            event(1, "Present", 11, 0, 0, 1),
        ];
        let (samples, _) = run(&events);
        // Nothing for 10:15..11:00.
        assert_eq!(samples.len(), 2);
    }

    #[test]
    fn unrecognized_status_tallied_and_counted_vacant() {
        let events = vec![
            event(1, "Present", 10, 0, 0, 0),
            event(2, "Out Of Service", 10, 1, 0, 1),
        ];
        let (samples, stats) = run(&events);
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].ratio, 0.5);
        assert_eq!(stats.unrecognized_statuses.get("Out Of Service"), Some(&1));
    }

    #[test]
    fn output_sorted_by_group_then_bucket() {
        let events = vec![
            event(200, "Present", 11, 0, 0, 0),
            event(1, "Present", 12, 0, 0, 1),
            event(200, "Present", 9, 0, 0, 2),
            event(1, "Present", 8, 0, 0, 3),
        ];
        let (samples, _) = run(&events);
        let keys: Vec<_> = samples.iter().map(|s| (s.group, s.bucket_start)).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn ratios_stay_in_unit_interval() {
        let events: Vec<_> = (0..50)
            .map(|i| event(i % 7, if i % 3 == 0 { "Present" } else { "Unoccupied" }, 10, (i % 60) as u32, 0, i as u64))
            .collect();
        let (samples, _) = run(&events);
        assert!(samples.iter().all(|s| (0.0..=1.0).contains(&s.ratio)));
    }
}
