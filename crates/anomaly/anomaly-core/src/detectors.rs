//! Anomaly detector implementations.

use anomaly_api::DetectorConfig;
use anomaly_spi::{AnomalyError, Result, StreamingDetector};
use tracing::{debug, trace};

use crate::window::{RollingWindow, WindowStats};

// ============================================================================
// Rolling Z-Score Detector
// ============================================================================

/// Rolling Z-score anomaly detector.
///
/// Keeps the last `window_size` samples and flags a sample whose distance
/// from the window mean exceeds `z_threshold` population standard deviations.
/// The sample being judged is appended before the statistics are computed,
/// so it always contributes to its own baseline. A large spike in a small
/// window therefore inflates the deviation it is measured against.
///
/// No verdict is possible until the window is full; every update before
/// that returns `false`. A window of identical values has zero deviation
/// and its z-score is defined as 0.
///
/// @algorithm RollingZScore
/// @category StreamingDetector
/// @complexity O(window_size) per update
/// @thread_safe false
#[derive(Debug, Clone)]
pub struct RollingZScoreDetector {
    window: RollingWindow,
    threshold: f64,
    mean: f64,
    std_dev: f64,
    last_z: Option<f64>,
}

impl RollingZScoreDetector {
    /// Create a new rolling Z-score detector.
    ///
    /// # Arguments
    ///
    /// * `window_size` - Number of recent samples the statistics cover
    /// * `z_threshold` - Z-score magnitude above which a sample is anomalous
    pub fn new(window_size: usize, z_threshold: f64) -> Result<Self> {
        Self::from_config(&DetectorConfig::new(window_size, z_threshold))
    }

    /// Create from configuration.
    pub fn from_config(config: &DetectorConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            window_size = config.window_size,
            z_threshold = config.z_threshold,
            "created rolling z-score detector"
        );
        Ok(Self {
            window: RollingWindow::new(config.window_size)?,
            threshold: config.z_threshold,
            mean: 0.0,
            std_dev: 0.0,
            last_z: None,
        })
    }

    /// Feed one sample and return whether it is anomalous.
    ///
    /// Non-finite samples are rejected with [`AnomalyError::InvalidInput`]
    /// and leave the detector untouched.
    pub fn update(&mut self, value: f64) -> Result<bool> {
        if !value.is_finite() {
            return Err(AnomalyError::InvalidInput(format!(
                "expected a finite number, got {}",
                value
            )));
        }

        let was_full = self.window.is_full();
        self.window.push(value);
        if !self.window.is_full() {
            trace!(len = self.window.len(), "warming up");
            return Ok(false);
        }
        if !was_full {
            debug!(window_size = self.window.capacity(), "window full, detection active");
        }

        let WindowStats { mean, std_dev } = match self.window.stats() {
            Some(stats) => stats,
            None => return Ok(false),
        };
        self.mean = mean;
        self.std_dev = std_dev;

        let z = if std_dev != 0.0 {
            (value - mean) / std_dev
        } else {
            0.0
        };
        self.last_z = Some(z);

        let is_anomaly = z.abs() > self.threshold;
        trace!(value, mean, std_dev, z, is_anomaly, "judged sample");
        Ok(is_anomaly)
    }

    /// Drop all history and statistics.
    pub fn reset(&mut self) {
        self.window.clear();
        self.mean = 0.0;
        self.std_dev = 0.0;
        self.last_z = None;
    }

    /// Get the configured window size
    pub fn window_size(&self) -> usize {
        self.window.capacity()
    }

    /// Get the threshold
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Mean of the window as of the last full-window update, 0 before that.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population standard deviation as of the last full-window update, 0 before that.
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Z-score of the last judged sample.
    pub fn last_z_score(&self) -> Option<f64> {
        self.last_z
    }

    /// Number of samples currently retained.
    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Whether the window is full and verdicts are live.
    pub fn is_warm(&self) -> bool {
        self.window.is_full()
    }

    /// Read-only view of the retained history.
    pub fn window(&self) -> &RollingWindow {
        &self.window
    }
}

impl StreamingDetector for RollingZScoreDetector {
    fn update(&mut self, value: f64) -> Result<bool> {
        RollingZScoreDetector::update(self, value)
    }

    fn reset(&mut self) {
        RollingZScoreDetector::reset(self)
    }

    fn is_warm(&self) -> bool {
        RollingZScoreDetector::is_warm(self)
    }

    fn window_len(&self) -> usize {
        self.len()
    }

    fn threshold(&self) -> f64 {
        self.threshold
    }

    fn last_score(&self) -> Option<f64> {
        self.last_z
    }
}

/// Parse a textual sample, rejecting anything that is not a finite number.
pub fn parse_sample(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(AnomalyError::InvalidInput(format!(
            "'{}' is not a finite number",
            trimmed
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(detector: &mut RollingZScoreDetector, values: &[f64]) -> Vec<bool> {
        values.iter().map(|&v| detector.update(v).unwrap()).collect()
    }

    #[test]
    fn test_new_rejects_zero_window() {
        let err = RollingZScoreDetector::new(0, 3.0).unwrap_err();
        assert!(matches!(err, AnomalyError::InvalidParameter { ref name, .. } if name == "window_size"));
    }

    #[test]
    fn test_new_rejects_non_positive_threshold() {
        assert!(RollingZScoreDetector::new(5, 0.0).is_err());
        assert!(RollingZScoreDetector::new(5, -1.5).is_err());
        assert!(RollingZScoreDetector::new(5, f64::NAN).is_err());
    }

    #[test]
    fn test_initial_state() {
        let detector = RollingZScoreDetector::new(4, 2.5).unwrap();
        assert_eq!(detector.window_size(), 4);
        assert_eq!(detector.threshold(), 2.5);
        assert_eq!(detector.mean(), 0.0);
        assert_eq!(detector.std_dev(), 0.0);
        assert_eq!(detector.last_z_score(), None);
        assert!(detector.is_empty());
        assert!(!detector.is_warm());
    }

    #[test]
    fn test_warmup_never_flags() {
        let mut detector = RollingZScoreDetector::new(6, 0.1).unwrap();
        let verdicts = feed(&mut detector, &[1.0, 1000.0, -1000.0, 5.0, 1e9]);
        assert_eq!(verdicts, vec![false; 5]);
        assert_eq!(detector.mean(), 0.0);
        assert_eq!(detector.std_dev(), 0.0);
        assert_eq!(detector.last_z_score(), None);
    }

    #[test]
    fn test_window_size_one_never_flags() {
        // a single sample is always its own mean
        let mut detector = RollingZScoreDetector::new(1, 0.5).unwrap();
        assert_eq!(feed(&mut detector, &[3.0, 100.0, -7.0]), vec![false; 3]);
        assert_eq!(detector.last_z_score(), Some(0.0));
    }

    #[test]
    fn test_flat_window_has_zero_z() {
        let mut detector = RollingZScoreDetector::new(4, 1e-9).unwrap();
        let verdicts = feed(&mut detector, &[7.0, 7.0, 7.0, 7.0]);
        assert_eq!(verdicts, vec![false; 4]);
        assert_eq!(detector.std_dev(), 0.0);
        assert_eq!(detector.mean(), 7.0);
        assert_eq!(detector.last_z_score(), Some(0.0));
    }

    #[test]
    fn test_scenario_self_inclusion_masks_spike() {
        let mut detector = RollingZScoreDetector::new(5, 2.0).unwrap();
        let verdicts = feed(&mut detector, &[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(verdicts, vec![false; 5]);
        assert!((detector.mean() - 3.0).abs() < 1e-12);
        assert!((detector.std_dev() - 2.0_f64.sqrt()).abs() < 1e-12);
        assert!((detector.last_z_score().unwrap() - 2.0_f64.sqrt()).abs() < 1e-12);

        // window is now [2, 3, 4, 5, 50]
        assert!(!detector.update(50.0).unwrap());
        assert!((detector.mean() - 12.8).abs() < 1e-12);
        assert!((detector.std_dev() - 346.96_f64.sqrt()).abs() < 1e-9);
        let z = detector.last_z_score().unwrap();
        assert!(z > 1.99 && z < 2.0, "z = {}", z);
    }

    #[test]
    fn test_new_value_is_part_of_its_baseline() {
        let mut detector = RollingZScoreDetector::new(4, 1.5).unwrap();
        feed(&mut detector, &[10.0, 10.0, 10.0]);
        assert!(detector.update(100.0).unwrap());
        assert!((detector.mean() - 32.5).abs() < 1e-12);
        assert!((detector.std_dev() - 1518.75_f64.sqrt()).abs() < 1e-9);
        assert!((detector.last_z_score().unwrap() - 3.0_f64.sqrt()).abs() < 1e-9);

        let mut detector = RollingZScoreDetector::new(4, 1.5).unwrap();
        feed(&mut detector, &[10.0, 10.0, 10.0]);
        assert!(!detector.update(10.0).unwrap());
    }

    #[test]
    fn test_three_sample_window_spike() {
        // window [10, 10, 100]: mean 40, std sqrt(1800), z = sqrt(2)
        let mut detector = RollingZScoreDetector::new(3, 1.5).unwrap();
        feed(&mut detector, &[10.0, 10.0, 10.0]);
        assert!(!detector.update(100.0).unwrap());
        assert!((detector.mean() - 40.0).abs() < 1e-12);
        assert!((detector.last_z_score().unwrap() - 2.0_f64.sqrt()).abs() < 1e-9);

        let mut detector = RollingZScoreDetector::new(3, 1.4).unwrap();
        feed(&mut detector, &[10.0, 10.0, 10.0]);
        assert!(detector.update(100.0).unwrap());
    }

    #[test]
    fn test_negative_deviation_flags() {
        let mut detector = RollingZScoreDetector::new(10, 2.5).unwrap();
        feed(&mut detector, &[5.0; 9]);
        assert!(detector.update(-100.0).unwrap());
        assert!(detector.last_z_score().unwrap() < 0.0);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut detector = RollingZScoreDetector::new(8, 3.0).unwrap();
        for i in 0..50 {
            detector.update(i as f64).unwrap();
            assert!(detector.len() <= 8);
        }
        assert_eq!(detector.len(), 8);
        assert_eq!(detector.window().iter().next(), Some(42.0));
    }

    #[test]
    fn test_invalid_input_leaves_state_unchanged() {
        let mut detector = RollingZScoreDetector::new(3, 1.0).unwrap();
        feed(&mut detector, &[1.0, 2.0, 3.0]);
        let before = detector.window().clone();
        let (mean, std_dev, z) = (detector.mean(), detector.std_dev(), detector.last_z_score());

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = detector.update(bad).unwrap_err();
            assert!(matches!(err, AnomalyError::InvalidInput(_)));
            assert!(err.is_recoverable());
        }

        assert_eq!(detector.window(), &before);
        assert_eq!(detector.mean(), mean);
        assert_eq!(detector.std_dev(), std_dev);
        assert_eq!(detector.last_z_score(), z);
    }

    #[test]
    fn test_reset_restarts_warmup() {
        let mut detector = RollingZScoreDetector::new(3, 1.0).unwrap();
        feed(&mut detector, &[1.0, 2.0, 3.0, 4.0]);
        assert!(detector.is_warm());

        detector.reset();
        assert!(detector.is_empty());
        assert_eq!(detector.mean(), 0.0);
        assert_eq!(detector.last_z_score(), None);
        assert_eq!(feed(&mut detector, &[1.0, 500.0]), vec![false, false]);
    }

    #[test]
    fn test_trait_object_dispatch() {
        let mut detector: Box<dyn StreamingDetector> =
            Box::new(RollingZScoreDetector::new(2, 0.5).unwrap());
        assert!(!detector.update(1.0).unwrap());
        assert!(!detector.is_warm());
        // window [1, 3]: z = 1
        assert!(detector.update(3.0).unwrap());
        assert_eq!(detector.window_len(), 2);
        assert_eq!(detector.threshold(), 0.5);
        assert!((detector.last_score().unwrap() - 1.0).abs() < 1e-12);
        detector.reset();
        assert_eq!(detector.window_len(), 0);
    }

    #[test]
    fn test_parse_sample() {
        assert_eq!(parse_sample(" 4.25 ").unwrap(), 4.25);
        assert_eq!(parse_sample("-3").unwrap(), -3.0);
        assert_eq!(parse_sample("1e3").unwrap(), 1000.0);
        for bad in ["", "abc", "NaN", "inf", "1,5"] {
            assert!(
                matches!(parse_sample(bad), Err(AnomalyError::InvalidInput(_))),
                "'{}' should be rejected",
                bad
            );
        }
    }
}
