//! Standard-scaled k-means cluster assignment. Input: schema-ordered features, Output:
//! index of the nearest centroid in scaled space.
//! The artifact is exported once from the fitted scaler and model and loaded at startup.

use super::classifier::{ClassifierError, ClusterClassifier};
use super::schema::FeatureSchema;
use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fitted standard scaler parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerParams {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// On-disk model: feature order, scaler, centroids (one row per cluster)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterArtifact {
    pub features: FeatureSchema,
    pub scaler: ScalerParams,
    pub centroids: Vec<Vec<f64>>,
}

pub struct KMeansClassifier {
    schema: FeatureSchema,
    mean: Array1<f64>,
    scale: Array1<f64>,
    centroids: Array2<f64>,
}

impl KMeansClassifier {
    /// Load artifact JSON from path.
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let data = std::fs::read_to_string(path).map_err(|source| ClassifierError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: ClusterArtifact = serde_json::from_str(&data)?;
        let classifier = Self::from_artifact(artifact)?;
        tracing::info!(
            path = %path.display(),
            features = classifier.schema.len(),
            clusters = classifier.cluster_count(),
            "cluster model loaded"
        );
        Ok(classifier)
    }

    pub fn from_artifact(artifact: ClusterArtifact) -> Result<Self, ClassifierError> {
        let dim = artifact.features.len();
        if dim == 0 {
            return Err(ClassifierError::InvalidArtifact("empty feature list".into()));
        }
        if artifact.scaler.mean.len() != dim || artifact.scaler.scale.len() != dim {
            return Err(ClassifierError::InvalidArtifact(format!(
                "scaler has {} means and {} scales for {} features",
                artifact.scaler.mean.len(),
                artifact.scaler.scale.len(),
                dim
            )));
        }
        if artifact.centroids.is_empty() {
            return Err(ClassifierError::InvalidArtifact("no centroids".into()));
        }
        if let Some(bad) = artifact.centroids.iter().position(|c| c.len() != dim) {
            return Err(ClassifierError::InvalidArtifact(format!(
                "centroid {} has {} values, expected {}",
                bad,
                artifact.centroids[bad].len(),
                dim
            )));
        }

        if let Some(i) = artifact.scaler.mean.iter().position(|v| !v.is_finite()) {
            return Err(ClassifierError::InvalidArtifact(format!(
                "scaler mean {} is not finite",
                i
            )));
        }
        // Zero is allowed: constant features were fitted with a zero scale.
        if let Some(i) = artifact
            .scaler
            .scale
            .iter()
            .position(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(ClassifierError::InvalidArtifact(format!(
                "scaler scale {} must be finite and non-negative",
                i
            )));
        }
        for (c, centroid) in artifact.centroids.iter().enumerate() {
            if let Some(i) = centroid.iter().position(|v| !v.is_finite()) {
                return Err(ClassifierError::InvalidArtifact(format!(
                    "centroid {} value {} is not finite",
                    c, i
                )));
            }
        }

        let k = artifact.centroids.len();
        let flat: Vec<f64> = artifact.centroids.into_iter().flatten().collect();
        let centroids = Array2::from_shape_vec((k, dim), flat)
            .map_err(|e| ClassifierError::InvalidArtifact(e.to_string()))?;
        // The fitted scaler divides constant features by 1.
        let scale = artifact
            .scaler
            .scale
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect();

        Ok(Self {
            schema: artifact.features,
            mean: Array1::from_vec(artifact.scaler.mean),
            scale: Array1::from_vec(scale),
            centroids,
        })
    }

    pub fn cluster_count(&self) -> usize {
        self.centroids.nrows()
    }
}

impl ClusterClassifier for KMeansClassifier {
    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Nearest centroid by squared Euclidean distance; ties go to the lowest cluster id.
    fn predict(&self, features: &[f64]) -> Result<u32, ClassifierError> {
        let dim = self.schema.len();
        if features.len() != dim {
            return Err(ClassifierError::DimensionMismatch {
                expected: dim,
                actual: features.len(),
            });
        }
        if let Some(i) = features.iter().position(|v| !v.is_finite()) {
            return Err(ClassifierError::NonFinite(i));
        }

        let x = ArrayView1::from(features);
        let scaled = (&x - &self.mean) / &self.scale;

        let mut best = 0usize;
        let mut best_dist = f64::INFINITY;
        for (i, centroid) in self.centroids.outer_iter().enumerate() {
            let dist = (&centroid - &scaled).mapv(|d| d * d).sum();
            if dist < best_dist {
                best = i;
                best_dist = dist;
            }
        }
        Ok(best as u32)
    }
}
