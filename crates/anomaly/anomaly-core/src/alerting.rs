//! Alerting system implementation.

use std::time::{SystemTime, UNIX_EPOCH};

use anomaly_spi::{Alert, AlertSeverity, Verdict};

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

fn default_message(value: f64, score: f64) -> String {
    format!("Anomaly detected: value={:.4}, score={:.4}", value, score)
}

/// Create a new alert from a detected anomaly.
pub fn create_alert(step: usize, value: f64, score: f64) -> Alert {
    AlertBuilder::new(step, value, score).build()
}

/// Create an alert for an anomalous verdict, `None` for a normal one.
pub fn alert_for(verdict: &Verdict) -> Option<Alert> {
    if !verdict.is_anomaly {
        return None;
    }
    let score = verdict.z_score.unwrap_or(0.0);
    Some(create_alert(verdict.step, verdict.value, score))
}

/// Alert builder for custom alert creation.
#[derive(Debug, Clone)]
pub struct AlertBuilder {
    step: usize,
    value: f64,
    score: f64,
    severity: Option<AlertSeverity>,
    message: Option<String>,
}

impl AlertBuilder {
    /// Create a new alert builder.
    pub fn new(step: usize, value: f64, score: f64) -> Self {
        Self {
            step,
            value,
            score,
            severity: None,
            message: None,
        }
    }

    /// Set custom severity.
    pub fn severity(mut self, severity: AlertSeverity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Set custom message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Build the alert.
    pub fn build(self) -> Alert {
        let severity = self
            .severity
            .unwrap_or_else(|| AlertSeverity::from_score(self.score));
        let message = self
            .message
            .unwrap_or_else(|| default_message(self.value, self.score));

        Alert {
            timestamp: unix_now(),
            step: self.step,
            value: self.value,
            score: self.score,
            severity,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_alert() {
        let alert = create_alert(12, 42.5, 3.25);
        assert_eq!(alert.step, 12);
        assert_eq!(alert.severity, AlertSeverity::Warning);
        assert_eq!(alert.message, "Anomaly detected: value=42.5000, score=3.2500");
        assert!(alert.timestamp > 0);
    }

    #[test]
    fn test_create_alert_critical() {
        let alert = create_alert(0, -90.0, -6.0);
        assert_eq!(alert.severity, AlertSeverity::Critical);
    }

    #[test]
    fn test_alert_for_verdict() {
        let normal = Verdict {
            step: 3,
            value: 1.0,
            is_anomaly: false,
            z_score: Some(0.2),
        };
        assert!(alert_for(&normal).is_none());

        let anomalous = Verdict {
            is_anomaly: true,
            z_score: Some(4.0),
            ..normal
        };
        let alert = alert_for(&anomalous).unwrap();
        assert_eq!(alert.step, 3);
        assert_eq!(alert.score, 4.0);
    }

    #[test]
    fn test_builder_overrides() {
        let alert = AlertBuilder::new(7, 10.0, 1.0)
            .severity(AlertSeverity::Critical)
            .message("sensor spike")
            .build();
        assert_eq!(alert.step, 7);
        assert_eq!(alert.severity, AlertSeverity::Critical);
        assert_eq!(alert.message, "sensor spike");
    }

    #[test]
    fn test_builder_defaults() {
        let alert = AlertBuilder::new(1, 2.0, 8.0).build();
        assert_eq!(alert.severity, AlertSeverity::Critical);
        assert_eq!(alert.message, "Anomaly detected: value=2.0000, score=8.0000");
    }
}
