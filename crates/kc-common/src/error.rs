//! Error types for the kerbcast pipeline.
//!
//! One workspace-wide error enum with a category per failure class, so the
//! binary can map failures onto stable exit codes and callers can tell a
//! recoverable input problem from a fatal pipeline one.

use thiserror::Error;

/// Result type alias for kerbcast operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Configuration loading or validation.
    Config,
    /// Event-log ingestion.
    Ingest,
    /// Model training.
    Training,
    /// Artifact export or verification.
    Artifact,
    /// File I/O and serialization.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Ingest => write!(f, "ingest"),
            ErrorCategory::Training => write!(f, "training"),
            ErrorCategory::Artifact => write!(f, "artifact"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Kerbcast pipeline errors.
#[derive(Error, Debug)]
pub enum Error {
    /// A required column is missing from the event-log header. Individual
    /// malformed rows are dropped and counted instead; an absent column
    /// means the whole log is unusable.
    #[error("required column `{0}` missing from event log header")]
    MissingColumn(String),

    /// The event log could not be read at all (not a per-row problem).
    #[error("failed to read event log: {0}")]
    Ingest(String),

    /// Configuration failed to load or validate.
    #[error("configuration error: {0}")]
    Config(String),

    /// The feature table is empty after lag/label filtering. Training on
    /// zero rows must fail loudly, never produce an artifact.
    #[error("feature table is empty after filtering; nothing to train on")]
    EmptyTrainingSet,

    /// The learner itself failed.
    #[error("model training failed: {0}")]
    Training(String),

    /// A published artifact pair failed the acceptance check (checksum or
    /// version mismatch, missing part).
    #[error("artifact verification failed: {0}")]
    ArtifactInvalid(String),

    /// Artifact staging or publish failed.
    #[error("artifact write failed: {0}")]
    ArtifactWrite(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Category for exit-code mapping and log grouping.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::MissingColumn(_) | Error::Ingest(_) => ErrorCategory::Ingest,
            Error::Config(_) => ErrorCategory::Config,
            Error::EmptyTrainingSet | Error::Training(_) => ErrorCategory::Training,
            Error::ArtifactInvalid(_) | Error::ArtifactWrite(_) => ErrorCategory::Artifact,
            Error::Io(_) => ErrorCategory::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_stable() {
        assert_eq!(
            Error::MissingColumn("status".into()).category(),
            ErrorCategory::Ingest
        );
        assert_eq!(Error::EmptyTrainingSet.category(), ErrorCategory::Training);
        assert_eq!(
            Error::ArtifactInvalid("checksum".into()).category(),
            ErrorCategory::Artifact
        );
    }
}
