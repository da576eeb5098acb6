//! Alert types for anomaly detection.

use serde::{Deserialize, Serialize};

/// Alert severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertSeverity {
    Warning,
    Critical,
}

impl AlertSeverity {
    /// Scores whose magnitude exceeds this are critical.
    pub const CRITICAL_SCORE: f64 = 5.0;

    /// Severity implied by an anomaly score.
    pub fn from_score(score: f64) -> Self {
        if score.abs() > Self::CRITICAL_SCORE {
            AlertSeverity::Critical
        } else {
            AlertSeverity::Warning
        }
    }
}

/// An alert triggered by anomaly detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub timestamp: u64,
    /// Position of the flagged sample in the stream.
    pub step: usize,
    pub value: f64,
    pub score: f64,
    pub severity: AlertSeverity,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_from_score() {
        assert_eq!(AlertSeverity::from_score(3.2), AlertSeverity::Warning);
        assert_eq!(AlertSeverity::from_score(-4.9), AlertSeverity::Warning);
        assert_eq!(AlertSeverity::from_score(5.0), AlertSeverity::Warning);
        assert_eq!(AlertSeverity::from_score(5.01), AlertSeverity::Critical);
        assert_eq!(AlertSeverity::from_score(-7.5), AlertSeverity::Critical);
    }
}
