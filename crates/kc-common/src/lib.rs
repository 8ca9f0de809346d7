//! Kerbcast common types and errors.
//!
//! This crate provides the foundational types shared across the pipeline:
//! - Sensor event and derived table row types
//! - Bay identity and the fixed bay→group partition
//! - The status classification table
//! - The workspace-wide error type

pub mod error;
pub mod event;
pub mod group;
pub mod sample;
pub mod status;

pub use error::{Error, ErrorCategory, Result};
pub use event::{SensorEvent, StateInterval};
pub use group::{BayId, GroupId};
pub use sample::{FeatureRow, OccupancySample};
pub use status::{StatusClassifier, StatusKind};

/// Schema version for artifacts and configuration files.
pub const SCHEMA_VERSION: &str = "1.0.0";
