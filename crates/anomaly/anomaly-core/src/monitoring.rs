//! Real-time monitoring implementation.

use anomaly_api::MonitorConfig;
use anomaly_spi::{Alert, Result, StreamSummary, StreamingDetector, Verdict, VerdictSink};
use tracing::{info, warn};

use super::alerting::alert_for;
use super::detectors::RollingZScoreDetector;

/// Real-time monitor for streaming anomaly detection.
///
/// Feeds samples to its detector one at a time and numbers the accepted
/// ones. Rejected samples do not advance the step counter.
pub struct Monitor<D: StreamingDetector> {
    detector: D,
    step: usize,
}

impl<D: StreamingDetector> Monitor<D> {
    /// Create a new monitor around the given detector.
    pub fn new(detector: D) -> Self {
        Self { detector, step: 0 }
    }

    /// Get the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get mutable reference to the detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Number of samples accepted so far.
    pub fn steps(&self) -> usize {
        self.step
    }

    /// Push a new value and return its verdict.
    pub fn push(&mut self, value: f64) -> Result<Verdict> {
        let is_anomaly = self.detector.update(value)?;
        let verdict = Verdict {
            step: self.step,
            value,
            is_anomaly,
            z_score: self.detector.last_score().filter(|_| self.detector.is_warm()),
        };
        self.step += 1;
        Ok(verdict)
    }

    /// Push a new value and check for anomalies.
    pub fn push_alert(&mut self, value: f64) -> Result<Option<Alert>> {
        let verdict = self.push(value)?;
        Ok(alert_for(&verdict))
    }

    /// Drive a fallible source to exhaustion, rendering every verdict.
    ///
    /// Each anomalous verdict is followed by its alert. Invalid samples,
    /// whether produced by the source or rejected by the detector, are
    /// logged, counted and skipped. Any other error aborts the run.
    pub fn run<I, S>(&mut self, source: I, sink: &mut S) -> Result<StreamSummary>
    where
        I: IntoIterator<Item = Result<f64>>,
        S: VerdictSink + ?Sized,
    {
        let mut summary = StreamSummary::new(self.detector.threshold());

        for item in source {
            let verdict = match item.and_then(|value| self.push(value)) {
                Ok(verdict) => verdict,
                Err(err) if err.is_recoverable() => {
                    warn!(step = self.step, error = %err, "rejected sample");
                    summary.record_rejected();
                    continue;
                }
                Err(err) => return Err(err),
            };
            summary.record(&verdict);
            sink.emit(&verdict)?;
            if let Some(alert) = alert_for(&verdict) {
                sink.alert(&alert)?;
            }
        }

        sink.finish(&summary)?;
        info!(
            total = summary.total,
            anomalies = summary.anomalies,
            rejected = summary.rejected,
            "stream complete"
        );
        Ok(summary)
    }

    /// Drive an infallible source to exhaustion.
    pub fn run_values<I, S>(&mut self, source: I, sink: &mut S) -> Result<StreamSummary>
    where
        I: IntoIterator<Item = f64>,
        S: VerdictSink + ?Sized,
    {
        self.run(source.into_iter().map(Ok), sink)
    }

    /// Reset the monitor state.
    pub fn reset(&mut self) {
        self.detector.reset();
        self.step = 0;
    }
}

impl Monitor<RollingZScoreDetector> {
    /// Create from configuration.
    pub fn from_config(config: &MonitorConfig) -> Result<Self> {
        Ok(Self::new(RollingZScoreDetector::from_config(&config.detector)?))
    }
}
