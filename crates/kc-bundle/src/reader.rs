//! Artifact loading with the serving-side acceptance check.

use crate::manifest::{compute_checksum, ArtifactManifest, ARTIFACT_SCHEMA_VERSION};
use crate::{FEATURES_FILE_NAME, MANIFEST_FILE_NAME, MODEL_FILE_NAME};
use kc_common::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// A verified artifact: manifest plus the raw model bytes.
#[derive(Debug)]
pub struct LoadedArtifact {
    pub manifest: ArtifactManifest,
    pub model_bytes: Vec<u8>,
}

impl LoadedArtifact {
    /// Feature order to assemble inference input vectors with.
    pub fn feature_names(&self) -> &[String] {
        &self.manifest.feature_names
    }
}

/// Load and verify an artifact directory.
///
/// Rejects version skew, a missing part, or any digest mismatch between the
/// manifest and the part files. A serving component must only accept
/// artifacts through this path; the pair is one contract, never two files.
pub fn load(dir: &Path) -> Result<LoadedArtifact> {
    let manifest_bytes = read_part(dir, MANIFEST_FILE_NAME)?;
    let manifest: ArtifactManifest = serde_json::from_slice(&manifest_bytes)
        .map_err(|e| Error::ArtifactInvalid(format!("manifest parse: {}", e)))?;

    if manifest.schema_version != ARTIFACT_SCHEMA_VERSION {
        return Err(Error::ArtifactInvalid(format!(
            "schema version mismatch: expected {}, got {}",
            ARTIFACT_SCHEMA_VERSION, manifest.schema_version
        )));
    }

    let model_bytes = read_part(dir, MODEL_FILE_NAME)?;
    let actual_model = compute_checksum(&model_bytes);
    if actual_model != manifest.model_sha256 {
        return Err(Error::ArtifactInvalid(format!(
            "model checksum mismatch: manifest {}, actual {}",
            manifest.model_sha256, actual_model
        )));
    }

    let features_bytes = read_part(dir, FEATURES_FILE_NAME)?;
    let actual_features = compute_checksum(&features_bytes);
    if actual_features != manifest.features_sha256 {
        return Err(Error::ArtifactInvalid(format!(
            "feature-order checksum mismatch: manifest {}, actual {}",
            manifest.features_sha256, actual_features
        )));
    }

    // features.txt and the manifest both carry the order; they must agree.
    let features_text = String::from_utf8(features_bytes)
        .map_err(|_| Error::ArtifactInvalid("features.txt is not UTF-8".to_string()))?;
    if features_text != manifest.features_text() {
        return Err(Error::ArtifactInvalid(
            "features.txt does not match manifest feature_names".to_string(),
        ));
    }

    debug!(
        path = %dir.display(),
        features = %features_text,
        "Artifact verified"
    );
    Ok(LoadedArtifact {
        manifest,
        model_bytes,
    })
}

fn read_part(dir: &Path, name: &str) -> Result<Vec<u8>> {
    let path = dir.join(name);
    fs::read(&path)
        .map_err(|e| Error::ArtifactInvalid(format!("missing part {}: {}", path.display(), e)))
}
