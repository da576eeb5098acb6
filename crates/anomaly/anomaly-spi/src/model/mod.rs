//! Data models for anomaly detection.
//!
//! This module contains data structures used throughout the anomaly detection system.

mod alert;
mod stream_summary;
mod verdict;

pub use alert::{Alert, AlertSeverity};
pub use stream_summary::StreamSummary;
pub use verdict::Verdict;
