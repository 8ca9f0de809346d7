//! Artifact writer with stage-then-rename publish.

use crate::manifest::ArtifactManifest;
use crate::{FEATURES_FILE_NAME, MANIFEST_FILE_NAME, MODEL_FILE_NAME};
use kc_common::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Builder for publishing a model artifact directory.
pub struct ArtifactWriter {
    manifest: ArtifactManifest,
    model_bytes: Vec<u8>,
    features_bytes: Vec<u8>,
}

impl ArtifactWriter {
    /// Prepare an artifact from the serialized model and its feature order.
    pub fn new(
        model_bytes: Vec<u8>,
        feature_names: Vec<String>,
        target_name: impl Into<String>,
        training_rows: usize,
    ) -> Self {
        let features_bytes = feature_names.join(",").into_bytes();
        let manifest = ArtifactManifest::new(
            feature_names,
            target_name,
            training_rows,
            &model_bytes,
            &features_bytes,
        );
        ArtifactWriter {
            manifest,
            model_bytes,
            features_bytes,
        }
    }

    pub fn manifest(&self) -> &ArtifactManifest {
        &self.manifest
    }

    /// Publish the artifact at `dir`, replacing any previous artifact there.
    ///
    /// All three files are written to a staging directory next to the
    /// target and the staging directory is renamed into place, so the
    /// published path only ever holds a complete, mutually-consistent set.
    /// On any failure the staging directory is removed and the previous
    /// artifact (if any) is left untouched.
    pub fn publish(self, dir: &Path) -> Result<PathBuf> {
        if let Some(parent) = dir.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let staging = staging_path(dir);
        if staging.exists() {
            fs::remove_dir_all(&staging)?;
        }
        fs::create_dir_all(&staging)?;

        let result = self.write_parts(&staging);
        if let Err(e) = result {
            let _ = fs::remove_dir_all(&staging);
            return Err(e);
        }

        // Replace-then-rename: the only non-atomic window is between the
        // removal of the old artifact and the rename, and it contains no
        // partial pair, only absence.
        if dir.exists() {
            fs::remove_dir_all(dir)?;
        }
        fs::rename(&staging, dir).map_err(|e| {
            let _ = fs::remove_dir_all(&staging);
            Error::ArtifactWrite(format!("publish rename to {} failed: {}", dir.display(), e))
        })?;

        info!(
            path = %dir.display(),
            features = %self.manifest.features_text(),
            rows = self.manifest.training_rows,
            "Published model artifact"
        );
        Ok(dir.to_path_buf())
    }

    fn write_parts(&self, staging: &Path) -> Result<()> {
        let manifest_json = serde_json::to_vec_pretty(&self.manifest)
            .map_err(|e| Error::ArtifactWrite(format!("manifest serialization: {}", e)))?;

        for (name, bytes) in [
            (MODEL_FILE_NAME, self.model_bytes.as_slice()),
            (FEATURES_FILE_NAME, self.features_bytes.as_slice()),
            (MANIFEST_FILE_NAME, manifest_json.as_slice()),
        ] {
            let path = staging.join(name);
            fs::write(&path, bytes).map_err(|e| {
                Error::ArtifactWrite(format!("staging {} failed: {}", path.display(), e))
            })?;
            debug!(file = name, bytes = bytes.len(), "Staged artifact part");
        }
        Ok(())
    }
}

fn staging_path(dir: &Path) -> PathBuf {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "artifact".to_string());
    dir.with_file_name(format!(".{}.staging", name))
}
