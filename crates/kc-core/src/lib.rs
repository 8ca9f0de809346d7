//! Kerbcast training pipeline.
//!
//! Turns a raw kerbside sensor-event log into a short-horizon occupancy
//! forecaster:
//!
//! ```text
//! event log ──ingest──▶ events ──resample──▶ group series ──features──▶ rows ──train──▶ model
//!                         │
//!                         └──intervals──▶ state-interval report (byproduct)
//! ```
//!
//! Every stage is a pure, synchronous batch transformation over one bounded
//! input; configuration is threaded explicitly so the whole pipeline runs on
//! synthetic inputs in tests.

pub mod features;
pub mod ingest;
pub mod intervals;
pub mod logging;
pub mod pipeline;
pub mod resample;
pub mod train;

pub use pipeline::{train_from_reader, TrainingOutcome};
pub use train::TrainedModel;
