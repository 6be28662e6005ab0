//! Keystroke reconstruction: events → matched presses → dwell / flight / rate statistics.

use super::pending::PendingPresses;
use super::rounding::{round_to, RATE_PRECISION, TIME_PRECISION};
use super::TypingMetrics;
use crate::config::KeysConfig;
use crate::events::{KeyEvent, KeyEventType};
use serde::{Deserialize, Serialize};

/// Raw counts behind one extraction, for diagnostics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionSummary {
    pub metrics: TypingMetrics,
    pub event_count: usize,
    pub key_downs: u64,
    pub backspaces: u64,
    pub deletes: u64,
    pub dwell_samples: u64,
    pub flight_samples: u64,
    /// Releases with no open press of the same key
    pub orphan_key_ups: u64,
    /// Presses still open when the stream ended
    pub unmatched_key_downs: u64,
    pub session_duration_ms: f64,
}

#[derive(Debug, Default)]
struct Mean {
    sum: f64,
    count: u64,
}

impl Mean {
    /// Only strictly positive intervals are samples; anything else is skew or reordering.
    fn record_positive(&mut self, interval: f64) {
        if interval > 0.0 {
            self.sum += interval;
            self.count += 1;
        }
    }

    fn value(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Stateless extractor; holds only which key identifiers mean Backspace and Delete.
#[derive(Debug, Clone, Default)]
pub struct KeystrokeMetricsExtractor {
    keys: KeysConfig,
}

impl KeystrokeMetricsExtractor {
    pub fn new(keys: KeysConfig) -> Self {
        Self { keys }
    }

    pub fn extract(&self, events: &[KeyEvent]) -> TypingMetrics {
        self.extract_detailed(events).metrics
    }

    pub fn extract_detailed(&self, events: &[KeyEvent]) -> ExtractionSummary {
        let (first, last) = match (events.first(), events.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return ExtractionSummary::default(),
        };

        let mut pending = PendingPresses::new();
        let mut dwell = Mean::default();
        let mut flight = Mean::default();
        let mut last_key_up: Option<f64> = None;
        let mut key_downs = 0u64;
        let mut backspaces = 0u64;
        let mut deletes = 0u64;
        let mut orphan_key_ups = 0u64;
        let mut keyless_key_downs = 0u64;

        for event in events {
            match event.event_type {
                KeyEventType::KeyDown => {
                    key_downs += 1;
                    if let Some(up) = last_key_up {
                        flight.record_positive(event.timestamp_ms - up);
                    }
                    match event.key() {
                        Some(key) => {
                            if self.keys.is_backspace(key) {
                                backspaces += 1;
                            } else if self.keys.is_delete(key) {
                                deletes += 1;
                            }
                            pending.open(key, event.timestamp_ms);
                        }
                        // never closable
                        None => keyless_key_downs += 1,
                    }
                }
                KeyEventType::KeyUp => {
                    match event.key().and_then(|key| pending.close(key)) {
                        Some(press) => {
                            dwell.record_positive(event.timestamp_ms - press.down_timestamp_ms)
                        }
                        None => orphan_key_ups += 1,
                    }
                    last_key_up = Some(event.timestamp_ms);
                }
                KeyEventType::Other => {}
            }
        }

        let session_duration_ms = if events.len() > 1 {
            last.timestamp_ms - first.timestamp_ms
        } else {
            0.0
        };
        let session_secs = session_duration_ms / 1000.0;
        let keys_per_sec = if session_secs > 0.0 {
            key_downs as f64 / session_secs
        } else {
            0.0
        };
        let denominator = key_downs.max(1) as f64;

        let metrics = TypingMetrics {
            avg_dwell_time_ms: round_to(dwell.value(), TIME_PRECISION),
            avg_flight_time_ms: round_to(flight.value(), TIME_PRECISION),
            keys_per_sec: round_to(keys_per_sec, TIME_PRECISION),
            backspace_rate: round_to(backspaces as f64 / denominator, RATE_PRECISION),
            delete_rate: round_to(deletes as f64 / denominator, RATE_PRECISION),
        };

        let summary = ExtractionSummary {
            metrics,
            event_count: events.len(),
            key_downs,
            backspaces,
            deletes,
            dwell_samples: dwell.count,
            flight_samples: flight.count,
            orphan_key_ups,
            unmatched_key_downs: pending.len() as u64 + keyless_key_downs,
            session_duration_ms,
        };
        tracing::debug!(
            events = summary.event_count,
            key_downs,
            dwell_samples = summary.dwell_samples,
            flight_samples = summary.flight_samples,
            orphan_key_ups,
            unmatched_key_downs = summary.unmatched_key_downs,
            "extracted typing metrics"
        );
        summary
    }
}

/// Extract with the default key identifiers (`Backspace`, `Delete`).
pub fn extract(events: &[KeyEvent]) -> TypingMetrics {
    KeystrokeMetricsExtractor::default().extract(events)
}
