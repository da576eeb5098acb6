//! Anomaly Detection API
//!
//! Configuration types for streaming anomaly detection.

use std::path::Path;

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use anomaly_spi::{
    Alert, AlertSeverity, AnomalyError, Result, StreamSummary, StreamingDetector, Verdict,
    VerdictSink,
};

// ============================================================================
// Detector Configuration
// ============================================================================

/// Rolling Z-score detector configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Number of recent samples kept for the rolling statistics (default: 50).
    pub window_size: usize,
    /// Z-score magnitude above which a sample is anomalous (default: 3.0).
    pub z_threshold: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            window_size: 50,
            z_threshold: 3.0,
        }
    }
}

impl DetectorConfig {
    pub fn new(window_size: usize, z_threshold: f64) -> Self {
        Self {
            window_size,
            z_threshold,
        }
    }

    /// Check that the configuration can build a detector.
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(AnomalyError::invalid_parameter(
                "window_size",
                "must be at least 1",
            ));
        }
        // NaN fails this comparison too
        if !(self.z_threshold > 0.0) || !self.z_threshold.is_finite() {
            return Err(AnomalyError::invalid_parameter(
                "z_threshold",
                "must be a positive finite number",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Generator Configuration
// ============================================================================

/// Synthetic stream configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of samples to produce (default: 500).
    pub steps: usize,
    /// Period of the seasonal component in steps (default: 100).
    pub seasonality_period: f64,
    /// Probability of injecting a spike at each step (default: 0.1).
    pub anomaly_probability: f64,
    /// Fixed RNG seed for reproducible streams.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            steps: 500,
            seasonality_period: 100.0,
            anomaly_probability: 0.1,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    pub fn new(steps: usize, seasonality_period: f64, anomaly_probability: f64) -> Self {
        Self {
            steps,
            seasonality_period,
            anomaly_probability,
            seed: None,
        }
    }

    /// Use a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.seasonality_period > 0.0) || !self.seasonality_period.is_finite() {
            return Err(AnomalyError::invalid_parameter(
                "seasonality_period",
                "must be a positive finite number",
            ));
        }
        if !(0.0..=1.0).contains(&self.anomaly_probability) {
            return Err(AnomalyError::invalid_parameter(
                "anomaly_probability",
                "must be in range [0, 1]",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Monitor Configuration
// ============================================================================

/// Complete configuration of a monitored stream.
///
/// Loaded from TOML with `[detector]` and `[generator]` tables; missing
/// tables and fields fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub detector: DetectorConfig,
    pub generator: GeneratorConfig,
}

impl MonitorConfig {
    pub fn new(detector: DetectorConfig, generator: GeneratorConfig) -> Self {
        Self {
            detector,
            generator,
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| AnomalyError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| AnomalyError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<()> {
        self.detector.validate()?;
        self.generator.validate()
    }
}
