//! Classifier seam: anything that maps a schema-ordered feature vector to a cluster id.

use super::schema::{FeatureRow, FeatureSchema};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),
    #[error("feature `{0}` not present in metrics or extras")]
    MissingFeature(String),
    #[error("expected {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("feature at index {0} is not finite")]
    NonFinite(usize),
}

/// Read-only inference. Implementations are loaded once and shared; `predict` must not
/// mutate model state.
pub trait ClusterClassifier: Send + Sync {
    /// Feature names in the order `predict` expects them
    fn schema(&self) -> &FeatureSchema;

    fn predict(&self, features: &[f64]) -> Result<u32, ClassifierError>;

    /// Resolve the schema against `row`, then predict
    fn predict_row(&self, row: &FeatureRow) -> Result<u32, ClassifierError> {
        let values = self.schema().vectorize(row)?;
        self.predict(&values)
    }
}
