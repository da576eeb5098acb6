//! # anomaly
//!
//! Streaming anomaly detection with a rolling Z-score.
//!
//! This facade provides a single entry point to all functionality:
//! - `StreamingDetector` / `VerdictSink` traits, models and errors from SPI
//! - Configuration types from API
//! - `RollingZScoreDetector`, `SyntheticStream`, `Monitor`, alerting and
//!   sinks from Core
//!
//! ```
//! use anomaly::RollingZScoreDetector;
//!
//! let mut detector = RollingZScoreDetector::new(4, 1.5)?;
//! for value in [10.0, 10.0, 10.0] {
//!     assert!(!detector.update(value)?);
//! }
//! assert!(detector.update(100.0)?);
//! # Ok::<(), anomaly::AnomalyError>(())
//! ```

// Re-export everything from SPI
pub use anomaly_spi::*;

// Re-export everything from API
pub use anomaly_api::*;

// Re-export everything from Core
pub use anomaly_core::*;
