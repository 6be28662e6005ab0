//! Typing behaviour features extracted from raw key events.

mod extractor;
mod pending;
pub mod rounding;

pub use extractor::{extract, ExtractionSummary, KeystrokeMetricsExtractor};
pub use pending::{PendingKeyDown, PendingPresses};

use serde::{Deserialize, Serialize};

/// Per-session typing features, already rounded for model input
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TypingMetrics {
    /// Mean press duration over matched presses (ms)
    pub avg_dwell_time_ms: f64,
    /// Mean release-to-next-press gap (ms)
    pub avg_flight_time_ms: f64,
    pub keys_per_sec: f64,
    /// Share of keydowns that were Backspace, in [0, 1]
    pub backspace_rate: f64,
    /// Share of keydowns that were Delete, in [0, 1]
    pub delete_rate: f64,
}

impl TypingMetrics {
    pub const FIELD_NAMES: [&'static str; 5] = [
        "avg_dwell_time_ms",
        "avg_flight_time_ms",
        "keys_per_sec",
        "backspace_rate",
        "delete_rate",
    ];

    pub fn zero() -> Self {
        Self::default()
    }

    /// Look a field up by its serialized name
    pub fn get(&self, name: &str) -> Option<f64> {
        match name {
            "avg_dwell_time_ms" => Some(self.avg_dwell_time_ms),
            "avg_flight_time_ms" => Some(self.avg_flight_time_ms),
            "keys_per_sec" => Some(self.keys_per_sec),
            "backspace_rate" => Some(self.backspace_rate),
            "delete_rate" => Some(self.delete_rate),
            _ => None,
        }
    }

    /// Values in [`Self::FIELD_NAMES`] order
    pub fn to_array(&self) -> [f64; 5] {
        [
            self.avg_dwell_time_ms,
            self.avg_flight_time_ms,
            self.keys_per_sec,
            self.backspace_rate,
            self.delete_rate,
        ]
    }
}
