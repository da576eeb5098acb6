//! Anomaly Detection Core
//!
//! Implementations for streaming anomaly detection, synthetic data,
//! monitoring, alerting and rendering.

mod alerting;
mod detectors;
mod generator;
mod monitoring;
mod sinks;
mod window;

pub use alerting::*;
pub use detectors::*;
pub use generator::*;
pub use monitoring::*;
pub use sinks::*;
pub use window::*;
