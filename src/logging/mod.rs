//! Structured logging to stderr; reports go to stdout as JSON lines.

mod format;

pub use format::StructuredLogger;
