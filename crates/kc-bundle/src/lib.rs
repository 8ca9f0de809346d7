//! Model artifact bundles.
//!
//! A trained model ships as a directory with three files that form one
//! atomic contract:
//! - `model.bin`: the serialized regressor
//! - `features.txt`: the comma-joined feature-name order (the positional
//!   contract for inference input vectors, readable without a JSON parser)
//! - `manifest.json`: version, SHA-256 digests of both parts, and training
//!   metadata
//!
//! The writer stages all three into a temporary sibling directory and
//! publishes with a single rename, so a serving component never observes a
//! partial pair. The reader re-hashes both parts against the manifest and
//! refuses anything inconsistent.

pub mod manifest;
pub mod reader;
pub mod writer;

pub use manifest::{ArtifactManifest, ARTIFACT_SCHEMA_VERSION};
pub use reader::LoadedArtifact;
pub use writer::ArtifactWriter;

/// Model part file name within the artifact directory.
pub const MODEL_FILE_NAME: &str = "model.bin";
/// Feature-order part file name.
pub const FEATURES_FILE_NAME: &str = "features.txt";
/// Manifest file name.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";
