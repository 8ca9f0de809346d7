//! Artifact manifest types and checksums.
//!
//! The manifest is the source of truth for the pairing between the model
//! binary and the feature-order list. A serving component accepts an
//! artifact only after both part digests match.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Current artifact schema version.
pub const ARTIFACT_SCHEMA_VERSION: &str = "1.0.0";

/// Manifest describing one published model artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactManifest {
    /// Artifact schema version.
    pub schema_version: String,

    /// When the artifact was published.
    pub created_at: DateTime<Utc>,

    /// Model input columns, in training order. Mirrors `features.txt`.
    pub feature_names: Vec<String>,

    /// Label column name the model was fit against.
    pub target_name: String,

    /// Number of feature rows the model was trained on.
    pub training_rows: usize,

    /// SHA-256 of the model binary, hex-encoded.
    pub model_sha256: String,

    /// SHA-256 of the features.txt bytes, hex-encoded.
    pub features_sha256: String,

    /// Kerbcast version that produced this artifact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kerbcast_version: Option<String>,
}

impl ArtifactManifest {
    /// Build a manifest for the given parts, computing both digests.
    pub fn new(
        feature_names: Vec<String>,
        target_name: impl Into<String>,
        training_rows: usize,
        model_bytes: &[u8],
        features_bytes: &[u8],
    ) -> Self {
        ArtifactManifest {
            schema_version: ARTIFACT_SCHEMA_VERSION.to_string(),
            created_at: Utc::now(),
            feature_names,
            target_name: target_name.into(),
            training_rows,
            model_sha256: compute_checksum(model_bytes),
            features_sha256: compute_checksum(features_bytes),
            kerbcast_version: Some(env!("CARGO_PKG_VERSION").to_string()),
        }
    }

    /// The comma-joined feature order exactly as `features.txt` carries it.
    pub fn features_text(&self) -> String {
        self.feature_names.join(",")
    }
}

/// SHA-256 digest of a byte slice, hex-encoded.
pub fn compute_checksum(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
