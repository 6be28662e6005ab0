//! Named feature schema and the rows it is resolved against.

use super::classifier::ClassifierError;
use crate::features::TypingMetrics;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered feature names a model was fitted on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Values of `row` in schema order
    pub fn vectorize(&self, row: &FeatureRow) -> Result<Vec<f64>, ClassifierError> {
        self.names
            .iter()
            .map(|name| {
                row.value(name)
                    .ok_or_else(|| ClassifierError::MissingFeature(name.clone()))
            })
            .collect()
    }
}

/// Extracted metrics plus side fields (e.g. `retry_count`) the model may also consume
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRow {
    pub metrics: TypingMetrics,
    pub extras: BTreeMap<String, f64>,
}

impl FeatureRow {
    pub fn new(metrics: TypingMetrics) -> Self {
        Self {
            metrics,
            extras: BTreeMap::new(),
        }
    }

    pub fn with_extra(mut self, name: impl Into<String>, value: f64) -> Self {
        self.extras.insert(name.into(), value);
        self
    }

    pub fn with_extras(mut self, extras: impl IntoIterator<Item = (String, f64)>) -> Self {
        self.extras.extend(extras);
        self
    }

    /// Metric fields shadow extras of the same name
    pub fn value(&self, name: &str) -> Option<f64> {
        self.metrics
            .get(name)
            .or_else(|| self.extras.get(name).copied())
    }
}
