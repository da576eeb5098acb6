//! Streaming detector trait definition.

use crate::error::Result;

/// Detector that judges one sample at a time against its own recent history.
///
/// Implementations are stateful and not internally synchronized. Use one
/// instance per logical stream.
pub trait StreamingDetector: Send + Sync {
    /// Consume a sample and return whether it is anomalous.
    ///
    /// A rejected sample must leave the detector state untouched.
    fn update(&mut self, value: f64) -> Result<bool>;

    /// Drop all history and return to the warm-up phase.
    fn reset(&mut self);

    /// Whether enough history has been seen to produce real verdicts.
    fn is_warm(&self) -> bool;

    /// Number of samples currently retained.
    fn window_len(&self) -> usize;

    /// Score threshold above which a sample is flagged.
    fn threshold(&self) -> f64;

    /// Score of the most recently judged sample, `None` during warm-up.
    fn last_score(&self) -> Option<f64>;
}
