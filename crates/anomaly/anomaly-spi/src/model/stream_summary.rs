//! Aggregate results of a monitored stream.

use serde::{Deserialize, Serialize};

use super::Verdict;

/// Summary of a completed detection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamSummary {
    /// Accepted samples.
    pub total: usize,
    /// Accepted samples judged before the window was full.
    pub warmup: usize,
    pub anomalies: usize,
    /// Samples rejected as invalid input.
    pub rejected: usize,
    /// Boolean mask indicating anomalies, one entry per accepted sample.
    pub is_anomaly: Vec<bool>,
    /// Threshold used for detection.
    pub threshold: f64,
}

impl StreamSummary {
    /// Create an empty summary for a run with the given threshold.
    pub fn new(threshold: f64) -> Self {
        Self {
            total: 0,
            warmup: 0,
            anomalies: 0,
            rejected: 0,
            is_anomaly: Vec::new(),
            threshold,
        }
    }

    /// Account for an accepted sample.
    pub fn record(&mut self, verdict: &Verdict) {
        self.total += 1;
        if verdict.is_warmup() {
            self.warmup += 1;
        }
        if verdict.is_anomaly {
            self.anomalies += 1;
        }
        self.is_anomaly.push(verdict.is_anomaly);
    }

    /// Account for a rejected sample.
    pub fn record_rejected(&mut self) {
        self.rejected += 1;
    }

    /// Get indices of detected anomalies.
    pub fn anomaly_indices(&self) -> Vec<usize> {
        self.is_anomaly
            .iter()
            .enumerate()
            .filter_map(|(i, &is_anomaly)| if is_anomaly { Some(i) } else { None })
            .collect()
    }

    /// Count of detected anomalies.
    pub fn anomaly_count(&self) -> usize {
        self.anomalies
    }

    /// Fraction of accepted samples flagged as anomalous.
    pub fn anomaly_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.anomalies as f64 / self.total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(step: usize, is_anomaly: bool, z_score: Option<f64>) -> Verdict {
        Verdict {
            step,
            value: step as f64,
            is_anomaly,
            z_score,
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = StreamSummary::new(3.0);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.anomaly_rate(), 0.0);
        assert!(summary.anomaly_indices().is_empty());
    }

    #[test]
    fn test_record_counts() {
        let mut summary = StreamSummary::new(2.0);
        summary.record(&verdict(0, false, None));
        summary.record(&verdict(1, false, Some(0.4)));
        summary.record(&verdict(2, true, Some(2.6)));
        summary.record_rejected();
        summary.record(&verdict(3, false, Some(-1.1)));

        assert_eq!(summary.total, 4);
        assert_eq!(summary.warmup, 1);
        assert_eq!(summary.anomaly_count(), 1);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.anomaly_indices(), vec![2]);
        assert!((summary.anomaly_rate() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_serializes_to_json() {
        let mut summary = StreamSummary::new(3.0);
        summary.record(&verdict(0, true, Some(4.0)));
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["anomalies"], 1);
        assert_eq!(json["is_anomaly"][0], true);
    }
}
