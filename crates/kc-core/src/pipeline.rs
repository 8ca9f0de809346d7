//! End-to-end training orchestration.
//!
//! One bounded batch, processed to completion: ingest → resample →
//! features → fit. The binary and the integration tests both drive the
//! pipeline through this module.

use crate::ingest::{self, IngestStats};
use crate::resample::{self, ResampleStats};
use crate::train::TrainedModel;
use crate::{features, train};
use kc_common::Result;
use kc_config::PipelineConfig;
use std::io::Read;
use tracing::info;

/// Everything a training run produces besides the artifact itself.
#[derive(Debug)]
pub struct TrainingOutcome {
    pub model: TrainedModel,
    pub ingest: IngestStats,
    pub resample: ResampleStats,
    pub sample_count: usize,
    pub row_count: usize,
}

/// Run the full training pipeline over a CSV event log.
pub fn train_from_reader<R: Read>(reader: R, config: &PipelineConfig) -> Result<TrainingOutcome> {
    let classifier = config.classifier();

    let (events, ingest_stats) = ingest::read_events(reader)?;
    let (samples, resample_stats) = resample::resample(&events, config, &classifier);
    let rows = features::build(&samples, config);
    let model = train::fit(&rows, config)?;

    info!(
        events = events.len(),
        samples = samples.len(),
        rows = rows.len(),
        "Training pipeline complete"
    );
    Ok(TrainingOutcome {
        model,
        ingest: ingest_stats,
        resample: resample_stats,
        sample_count: samples.len(),
        row_count: rows.len(),
    })
}
