//! Presentation sink trait definition.

use crate::error::Result;
use crate::model::{Alert, StreamSummary, Verdict};

/// Consumer of verdicts in stream order.
///
/// Sinks render or collect results. Detectors never call them; a driver
/// loop forwards each verdict after the detector has returned.
pub trait VerdictSink {
    /// Render a single verdict.
    fn emit(&mut self, verdict: &Verdict) -> Result<()>;

    /// Render the alert raised for an anomalous verdict, right after it
    /// was emitted.
    fn alert(&mut self, alert: &Alert) -> Result<()> {
        let _ = alert;
        Ok(())
    }

    /// Called once after the source is exhausted.
    fn finish(&mut self, summary: &StreamSummary) -> Result<()> {
        let _ = summary;
        Ok(())
    }
}

impl<S: VerdictSink + ?Sized> VerdictSink for Box<S> {
    fn emit(&mut self, verdict: &Verdict) -> Result<()> {
        (**self).emit(verdict)
    }

    fn alert(&mut self, alert: &Alert) -> Result<()> {
        (**self).alert(alert)
    }

    fn finish(&mut self, summary: &StreamSummary) -> Result<()> {
        (**self).finish(summary)
    }
}
