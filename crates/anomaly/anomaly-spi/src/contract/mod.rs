//! Contract definitions for anomaly detection.
//!
//! This module contains trait definitions that providers must implement.

mod streaming_detector;
mod verdict_sink;

pub use streaming_detector::StreamingDetector;
pub use verdict_sink::VerdictSink;
