//! Cluster assignment over extracted typing features.

mod classifier;
mod kmeans;
mod schema;

pub use classifier::{ClassifierError, ClusterClassifier};
pub use kmeans::{ClusterArtifact, KMeansClassifier, ScalerParams};
pub use schema::{FeatureRow, FeatureSchema};
