//! Synthetic data stream.

use std::f64::consts::PI;

use anomaly_api::GeneratorConfig;
use anomaly_spi::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Amplitude of the seasonal sine component.
pub const SEASONAL_AMPLITUDE: f64 = 10.0;
/// Increase of the baseline per step.
pub const TREND_SLOPE: f64 = 0.05;
/// Half-width of the uniform noise band.
pub const NOISE_AMPLITUDE: f64 = 1.0;
/// Lower bound of an injected spike.
pub const SPIKE_MIN: f64 = 10.0;
/// Upper bound of an injected spike.
pub const SPIKE_MAX: f64 = 20.0;

/// Finite stream of seasonal, trending, noisy samples with occasional spikes.
///
/// Step `t` yields `10·sin(2πt / period) + 0.05·t + U(-1, 1)`, plus a
/// `U(10, 20)` spike with probability `anomaly_probability`. The stream is
/// lazy and cannot be restarted.
#[derive(Debug, Clone)]
pub struct SyntheticStream {
    rng: StdRng,
    step: usize,
    steps: usize,
    seasonality_period: f64,
    anomaly_probability: f64,
}

impl SyntheticStream {
    /// Build a stream from a validated configuration.
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        debug!(
            steps = config.steps,
            seasonality_period = config.seasonality_period,
            anomaly_probability = config.anomaly_probability,
            seed = ?config.seed,
            "created synthetic stream"
        );
        Ok(Self {
            rng,
            step: 0,
            steps: config.steps,
            seasonality_period: config.seasonality_period,
            anomaly_probability: config.anomaly_probability,
        })
    }

    /// Noise-free part of the signal at `step`.
    pub fn baseline(&self, step: usize) -> f64 {
        let t = step as f64;
        SEASONAL_AMPLITUDE * (2.0 * PI * t / self.seasonality_period).sin() + TREND_SLOPE * t
    }

    /// Samples produced so far.
    pub fn position(&self) -> usize {
        self.step
    }
}

impl Iterator for SyntheticStream {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.step >= self.steps {
            return None;
        }

        let mut value =
            self.baseline(self.step) + self.rng.gen_range(-NOISE_AMPLITUDE..NOISE_AMPLITUDE);
        if self.rng.gen::<f64>() < self.anomaly_probability {
            value += self.rng.gen_range(SPIKE_MIN..SPIKE_MAX);
        }

        self.step += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.steps - self.step;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SyntheticStream {}

/// Create a synthetic stream.
pub fn generate(config: &GeneratorConfig) -> Result<SyntheticStream> {
    SyntheticStream::new(config)
}
