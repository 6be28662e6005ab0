//! Keystroke Metrics: typing behaviour features for clustering and authentication models.
//!
//! Modular structure:
//! - [`events`]: Key event records and lenient JSON decoding
//! - [`features`]: Dwell / flight / rate extraction with LIFO press matching
//! - [`model`]: Classifier seam and scaled k-means cluster assignment
//! - [`report`]: Per-session output record
//! - [`logging`]: Structured tracing setup

pub mod config;
pub mod events;
pub mod features;
pub mod logging;
pub mod model;
pub mod report;

pub use config::AppConfig;
pub use events::{KeyEvent, KeyEventType, Session};
pub use features::{extract, KeystrokeMetricsExtractor, TypingMetrics};
pub use logging::StructuredLogger;
pub use model::{ClusterClassifier, FeatureRow, FeatureSchema, KMeansClassifier};
pub use report::SessionReport;
