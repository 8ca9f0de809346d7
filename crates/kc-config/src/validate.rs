//! Semantic validation for pipeline configuration.

use thiserror::Error;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::InvalidValue { .. } => 60,
            ValidationError::VersionMismatch { .. } => 61,
        }
    }
}

fn invalid(field: &str, message: impl Into<String>) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        message: message.into(),
    }
}

/// Validate a pipeline configuration semantically.
pub fn validate(config: &crate::PipelineConfig) -> ValidationResult<()> {
    if config.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: config.schema_version.clone(),
        });
    }

    if config.bucket_minutes == 0 || 60 % config.bucket_minutes != 0 {
        return Err(invalid(
            "bucket_minutes",
            format!(
                "must be a positive divisor of 60 for calendar alignment, got {}",
                config.bucket_minutes
            ),
        ));
    }

    if config.group_block_size == 0 {
        return Err(invalid("group_block_size", "must be positive"));
    }

    if config.lag_depth == 0 {
        return Err(invalid("lag_depth", "must be at least 1"));
    }

    if config.horizon_buckets == 0 {
        return Err(invalid("horizon_buckets", "must be at least 1"));
    }

    if config.occupied_statuses.is_empty() {
        return Err(invalid(
            "occupied_statuses",
            "at least one occupied status code is required",
        ));
    }

    let trainer = &config.trainer;
    if trainer.trees == 0 {
        return Err(invalid("trainer.trees", "must be at least 1"));
    }
    if !(trainer.learning_rate > 0.0 && trainer.learning_rate <= 1.0) {
        return Err(invalid(
            "trainer.learning_rate",
            format!("must be in (0, 1], got {}", trainer.learning_rate),
        ));
    }
    if trainer.max_depth == 0 {
        return Err(invalid("trainer.max_depth", "must be at least 1"));
    }
    for (field, ratio) in [
        ("trainer.subsample", trainer.subsample),
        ("trainer.colsample", trainer.colsample),
    ] {
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(invalid(field, format!("must be in (0, 1], got {}", ratio)));
        }
    }

    Ok(())
}
