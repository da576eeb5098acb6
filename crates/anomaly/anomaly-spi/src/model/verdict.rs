//! Per-sample detection verdict.

use serde::{Deserialize, Serialize};

/// Outcome of feeding one sample to a streaming detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Zero-based position among accepted samples.
    pub step: usize,
    pub value: f64,
    pub is_anomaly: bool,
    /// Z-score of the sample, `None` while the window is still filling.
    pub z_score: Option<f64>,
}

impl Verdict {
    /// Whether the verdict was produced before the window was full.
    pub fn is_warmup(&self) -> bool {
        self.z_score.is_none()
    }
}
