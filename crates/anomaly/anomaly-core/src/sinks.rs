//! Verdict sinks for rendering detection results.

use std::io::Write;

use anomaly_spi::{Alert, AnomalyError, Result, StreamSummary, Verdict, VerdictSink};

fn sink_error(err: impl std::fmt::Display) -> AnomalyError {
    AnomalyError::Sink(err.to_string())
}

// ============================================================================
// Text Sink
// ============================================================================

/// Renders one aligned line per verdict, one per alert, and a summary footer.
///
/// ```text
///      0      -0.3521  warm-up
///     50       2.8719  z=  0.2270
///     51      19.4410  z=  3.1415  ANOMALY
///     51  [Warning] Anomaly detected: value=19.4410, score=3.1415
/// ```
#[derive(Debug)]
pub struct TextSink<W: Write> {
    writer: W,
    anomalies_only: bool,
}

impl<W: Write> TextSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            anomalies_only: false,
        }
    }

    /// Only print flagged samples.
    pub fn anomalies_only(mut self, enabled: bool) -> Self {
        self.anomalies_only = enabled;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> VerdictSink for TextSink<W> {
    fn emit(&mut self, verdict: &Verdict) -> Result<()> {
        if self.anomalies_only && !verdict.is_anomaly {
            return Ok(());
        }
        let written = match verdict.z_score {
            None => writeln!(self.writer, "{:>6}  {:>12.4}  warm-up", verdict.step, verdict.value),
            Some(z) => writeln!(
                self.writer,
                "{:>6}  {:>12.4}  z={:>8.4}{}",
                verdict.step,
                verdict.value,
                z,
                if verdict.is_anomaly { "  ANOMALY" } else { "" }
            ),
        };
        written.map_err(sink_error)
    }

    fn alert(&mut self, alert: &Alert) -> Result<()> {
        writeln!(
            self.writer,
            "{:>6}  [{:?}] {}",
            alert.step, alert.severity, alert.message
        )
        .map_err(sink_error)
    }

    fn finish(&mut self, summary: &StreamSummary) -> Result<()> {
        writeln!(
            self.writer,
            "--- {} points, {} anomalies ({:.1}%), {} rejected, threshold {} ---",
            summary.total,
            summary.anomalies,
            summary.anomaly_rate() * 100.0,
            summary.rejected,
            summary.threshold
        )
        .map_err(sink_error)?;
        self.writer.flush().map_err(sink_error)
    }
}

// ============================================================================
// JSON Lines Sink
// ============================================================================

/// Writes each verdict as a JSON object on its own line, alerts wrapped as
/// `{"alert": {...}}`, then the summary wrapped as `{"summary": {...}}`.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> VerdictSink for JsonLinesSink<W> {
    fn emit(&mut self, verdict: &Verdict) -> Result<()> {
        serde_json::to_writer(&mut self.writer, verdict).map_err(sink_error)?;
        self.writer.write_all(b"\n").map_err(sink_error)
    }

    fn alert(&mut self, alert: &Alert) -> Result<()> {
        let wrapped = serde_json::json!({ "alert": alert });
        serde_json::to_writer(&mut self.writer, &wrapped).map_err(sink_error)?;
        self.writer.write_all(b"\n").map_err(sink_error)
    }

    fn finish(&mut self, summary: &StreamSummary) -> Result<()> {
        let wrapped = serde_json::json!({ "summary": summary });
        serde_json::to_writer(&mut self.writer, &wrapped).map_err(sink_error)?;
        self.writer.write_all(b"\n").map_err(sink_error)?;
        self.writer.flush().map_err(sink_error)
    }
}

// ============================================================================
// Collect Sink
// ============================================================================

/// Keeps every verdict and alert in memory.
#[derive(Debug, Clone, Default)]
pub struct CollectSink {
    verdicts: Vec<Verdict>,
    alerts: Vec<Alert>,
    summary: Option<StreamSummary>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verdicts(&self) -> &[Verdict] {
        &self.verdicts
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Summary of the run, once it has finished.
    pub fn summary(&self) -> Option<&StreamSummary> {
        self.summary.as_ref()
    }

    /// `(value, is_anomaly)` pairs in stream order.
    pub fn pairs(&self) -> Vec<(f64, bool)> {
        self.verdicts.iter().map(|v| (v.value, v.is_anomaly)).collect()
    }
}

impl VerdictSink for CollectSink {
    fn emit(&mut self, verdict: &Verdict) -> Result<()> {
        self.verdicts.push(*verdict);
        Ok(())
    }

    fn alert(&mut self, alert: &Alert) -> Result<()> {
        self.alerts.push(alert.clone());
        Ok(())
    }

    fn finish(&mut self, summary: &StreamSummary) -> Result<()> {
        self.summary = Some(summary.clone());
        Ok(())
    }
}
