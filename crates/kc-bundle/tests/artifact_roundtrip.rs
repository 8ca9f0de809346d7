//! Artifact publish/load round trip and tamper rejection.

use kc_bundle::{reader, ArtifactWriter, FEATURES_FILE_NAME, MODEL_FILE_NAME};
use std::fs;
use tempfile::TempDir;

fn feature_names() -> Vec<String> {
    ["group_id", "occupancy_ratio", "hour", "day_of_week", "lag_15m", "lag_30m"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[test]
fn publish_then_load_round_trip() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("models").join("parking_15m");

    let writer = ArtifactWriter::new(b"fake-model-bytes".to_vec(), feature_names(), "target_15m", 120);
    writer.publish(&dir).unwrap();

    let loaded = reader::load(&dir).unwrap();
    assert_eq!(loaded.model_bytes, b"fake-model-bytes");
    assert_eq!(loaded.feature_names(), feature_names().as_slice());
    assert_eq!(loaded.manifest.target_name, "target_15m");
    assert_eq!(loaded.manifest.training_rows, 120);

    // The plain-text part is exactly the comma-joined order.
    let text = fs::read_to_string(dir.join(FEATURES_FILE_NAME)).unwrap();
    assert_eq!(text, "group_id,occupancy_ratio,hour,day_of_week,lag_15m,lag_30m");
}

#[test]
fn tampered_model_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("artifact");
    ArtifactWriter::new(b"model".to_vec(), feature_names(), "target_15m", 1)
        .publish(&dir)
        .unwrap();

    let model_path = dir.join(MODEL_FILE_NAME);
    let mut bytes = fs::read(&model_path).unwrap();
    bytes[0] ^= 0xff;
    fs::write(&model_path, bytes).unwrap();

    let err = reader::load(&dir).unwrap_err();
    assert!(err.to_string().contains("model checksum mismatch"), "{err}");
}

#[test]
fn tampered_feature_order_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("artifact");
    ArtifactWriter::new(b"model".to_vec(), feature_names(), "target_15m", 1)
        .publish(&dir)
        .unwrap();

    fs::write(dir.join(FEATURES_FILE_NAME), "hour,group_id").unwrap();

    let err = reader::load(&dir).unwrap_err();
    assert!(err.to_string().contains("checksum mismatch"), "{err}");
}

#[test]
fn missing_part_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("artifact");
    ArtifactWriter::new(b"model".to_vec(), feature_names(), "target_15m", 1)
        .publish(&dir)
        .unwrap();

    fs::remove_file(dir.join(FEATURES_FILE_NAME)).unwrap();

    let err = reader::load(&dir).unwrap_err();
    assert!(err.to_string().contains("missing part"), "{err}");
}

#[test]
fn failed_publish_leaves_previous_artifact_intact() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("artifact");
    ArtifactWriter::new(b"v1".to_vec(), feature_names(), "target_15m", 1)
        .publish(&dir)
        .unwrap();

    // A plain file where the staging directory must go makes the next
    // publish fail before it can touch the published path.
    fs::write(tmp.path().join(".artifact.staging"), b"in the way").unwrap();
    ArtifactWriter::new(b"v2".to_vec(), feature_names(), "target_15m", 2)
        .publish(&dir)
        .unwrap_err();

    // The previously published artifact is still complete and consistent.
    let loaded = reader::load(&dir).unwrap();
    assert_eq!(loaded.model_bytes, b"v1");
    assert_eq!(loaded.manifest.training_rows, 1);
}

#[test]
fn failed_first_publish_leaves_nothing_at_target() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("artifact");

    fs::write(tmp.path().join(".artifact.staging"), b"in the way").unwrap();
    ArtifactWriter::new(b"v1".to_vec(), feature_names(), "target_15m", 1)
        .publish(&dir)
        .unwrap_err();

    assert!(!dir.exists());
}

#[test]
fn republish_replaces_previous_artifact() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("artifact");
    ArtifactWriter::new(b"v1".to_vec(), feature_names(), "target_15m", 1)
        .publish(&dir)
        .unwrap();
    ArtifactWriter::new(b"v2".to_vec(), feature_names(), "target_15m", 2)
        .publish(&dir)
        .unwrap();

    let loaded = reader::load(&dir).unwrap();
    assert_eq!(loaded.model_bytes, b"v2");
    assert_eq!(loaded.manifest.training_rows, 2);
    // No staging leftovers next to the published artifact.
    let siblings: Vec<_> = fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(siblings, vec!["artifact".to_string()]);
}
