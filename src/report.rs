//! Per-session output record: metrics plus the assigned cluster, if any.

use crate::features::TypingMetrics;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub session_id: String,
    /// RFC 3339
    pub extracted_at: String,
    pub event_count: usize,
    #[serde(flatten)]
    pub metrics: TypingMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<u32>,
}

impl SessionReport {
    pub fn new(event_count: usize, metrics: TypingMetrics) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            extracted_at: Utc::now().to_rfc3339(),
            event_count,
            metrics,
            cluster_id: None,
        }
    }

    pub fn with_cluster(mut self, cluster_id: u32) -> Self {
        self.cluster_id = Some(cluster_id);
        self
    }
}
