//! Gradient-boosted regression training.
//!
//! Fits a squared-error GBDT on the engineered feature table. The wrapper
//! keeps the feature-name order next to the model; the two travel together
//! into the exported artifact and back out of it.

use gbdt::config::Config as GbdtConfig;
use gbdt::decision_tree::{Data, DataVec, ValueType};
use gbdt::gradient_boost::GBDT;
use kc_common::{Error, FeatureRow, Result};
use kc_config::PipelineConfig;
use tracing::info;

/// A trained occupancy regressor plus its input-column contract.
pub struct TrainedModel {
    model: GBDT,
    feature_names: Vec<String>,
    target_name: String,
}

/// Fit a regressor on the feature table.
///
/// Fails on an empty table (a model trained on zero rows must never reach
/// an artifact) and on rows whose lag count disagrees with the configured
/// feature columns.
pub fn fit(rows: &[FeatureRow], config: &PipelineConfig) -> Result<TrainedModel> {
    if rows.is_empty() {
        return Err(Error::EmptyTrainingSet);
    }
    let feature_names = config.feature_names();
    if let Some(bad) = rows.iter().find(|r| r.lags.len() != config.lag_depth) {
        return Err(Error::Training(format!(
            "row at {} has {} lag columns, configuration expects {}",
            bad.bucket_start,
            bad.lags.len(),
            config.lag_depth
        )));
    }

    let params = &config.trainer;
    let mut gbdt_config = GbdtConfig::new();
    gbdt_config.set_feature_size(feature_names.len());
    gbdt_config.set_iterations(params.trees);
    gbdt_config.set_shrinkage(params.learning_rate as ValueType);
    gbdt_config.set_max_depth(params.max_depth);
    gbdt_config.set_data_sample_ratio(params.subsample);
    gbdt_config.set_feature_sample_ratio(params.colsample);
    gbdt_config.set_loss("SquaredError");
    gbdt_config.set_training_optimization_level(2);

    let mut train_data: DataVec = rows
        .iter()
        .map(|row| {
            let features: Vec<ValueType> = row
                .feature_vector()
                .into_iter()
                .map(|v| v as ValueType)
                .collect();
            Data::new_training_data(features, 1.0, row.label as ValueType, None)
        })
        .collect();

    info!(
        rows = rows.len(),
        features = feature_names.len(),
        trees = params.trees,
        "Training occupancy regressor"
    );
    let mut model = GBDT::new(&gbdt_config);
    model.fit(&mut train_data);

    Ok(TrainedModel {
        model,
        feature_names,
        target_name: config.target_name(),
    })
}

impl TrainedModel {
    /// Input column names in positional order.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Label column name.
    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// Predict the occupancy ratio one horizon ahead from an input vector
    /// assembled in `feature_names` order.
    pub fn predict(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.feature_names.len() {
            return Err(Error::Training(format!(
                "input vector has {} columns, model expects {}",
                features.len(),
                self.feature_names.len()
            )));
        }
        let test_data: DataVec = vec![Data::new_test_data(
            features.iter().map(|v| *v as ValueType).collect(),
            None,
        )];
        let predictions = self.model.predict(&test_data);
        predictions
            .first()
            .map(|p| f64::from(*p))
            .ok_or_else(|| Error::Training("learner returned no prediction".to_string()))
    }

    /// Serialize the regressor to its binary artifact form.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(&self.model)
            .map_err(|e| Error::ArtifactWrite(format!("model serialization: {}", e)))
    }

    /// Rebuild a model from artifact bytes and the manifest's column order.
    pub fn from_bytes(
        bytes: &[u8],
        feature_names: Vec<String>,
        target_name: impl Into<String>,
    ) -> Result<Self> {
        let model: GBDT = bincode::deserialize(bytes)
            .map_err(|e| Error::ArtifactInvalid(format!("model deserialization: {}", e)))?;
        Ok(TrainedModel {
            model,
            feature_names,
            target_name: target_name.into(),
        })
    }
}

impl std::fmt::Debug for TrainedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrainedModel")
            .field("feature_names", &self.feature_names)
            .field("target_name", &self.target_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use kc_common::GroupId;
    use kc_config::TrainerParams;

    fn deterministic_config() -> PipelineConfig {
        PipelineConfig {
            trainer: TrainerParams::deterministic(),
            ..PipelineConfig::default()
        }
    }

    fn synthetic_rows(n: usize) -> Vec<FeatureRow> {
        (0..n)
            .map(|i| {
                let ratio = (i % 10) as f64 / 10.0;
                FeatureRow {
                    group: GroupId(100),
                    bucket_start: Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap()
                        + chrono::Duration::minutes(15 * i as i64),
                    occupancy_ratio: ratio,
                    hour: (i / 4 % 24) as u32,
                    day_of_week: (i / 96 % 7) as u32,
                    lags: vec![((i + 9) % 10) as f64 / 10.0, ((i + 8) % 10) as f64 / 10.0],
                    label: ((i + 1) % 10) as f64 / 10.0,
                }
            })
            .collect()
    }

    #[test]
    fn empty_table_is_fatal() {
        let err = fit(&[], &deterministic_config()).unwrap_err();
        assert!(matches!(err, Error::EmptyTrainingSet));
    }

    #[test]
    fn lag_count_mismatch_is_fatal() {
        let mut rows = synthetic_rows(8);
        rows[3].lags.pop();
        let err = fit(&rows, &deterministic_config()).unwrap_err();
        assert!(matches!(err, Error::Training(_)));
    }

    #[test]
    fn fit_and_predict() {
        let config = deterministic_config();
        let rows = synthetic_rows(200);
        let model = fit(&rows, &config).unwrap();
        assert_eq!(model.feature_names(), config.feature_names().as_slice());
        assert_eq!(model.target_name(), "target_15m");

        let prediction = model.predict(&rows[0].feature_vector()).unwrap();
        assert!(prediction.is_finite());
    }

    #[test]
    fn predict_rejects_wrong_arity() {
        let model = fit(&synthetic_rows(50), &deterministic_config()).unwrap();
        assert!(model.predict(&[1.0, 2.0]).is_err());
    }

    #[test]
    fn deterministic_training_is_reproducible() {
        let config = deterministic_config();
        let rows = synthetic_rows(120);
        let first = fit(&rows, &config).unwrap();
        let second = fit(&rows, &config).unwrap();
        let input = rows[17].feature_vector();
        assert_eq!(
            first.predict(&input).unwrap(),
            second.predict(&input).unwrap()
        );
    }

    #[test]
    fn byte_round_trip_preserves_predictions() {
        let config = deterministic_config();
        let rows = synthetic_rows(100);
        let model = fit(&rows, &config).unwrap();
        let bytes = model.to_bytes().unwrap();
        let restored = TrainedModel::from_bytes(
            &bytes,
            model.feature_names().to_vec(),
            model.target_name(),
        )
        .unwrap();
        let input = rows[5].feature_vector();
        assert_eq!(
            model.predict(&input).unwrap(),
            restored.predict(&input).unwrap()
        );
    }
}
