//! Fixed-capacity rolling window.

use std::collections::VecDeque;

use anomaly_spi::{AnomalyError, Result};

/// The most recent `capacity` samples, oldest first.
///
/// Pushing into a full window evicts the oldest sample.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingWindow {
    data: VecDeque<f64>,
    capacity: usize,
}

/// Mean and population standard deviation of a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    pub mean: f64,
    pub std_dev: f64,
}

impl RollingWindow {
    /// Create an empty window holding at most `capacity` samples.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(AnomalyError::invalid_parameter(
                "window_size",
                "must be at least 1",
            ));
        }
        Ok(Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Append a sample, returning the evicted one if the window was full.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        let evicted = if self.data.len() == self.capacity {
            self.data.pop_front()
        } else {
            None
        };
        self.data.push_back(value);
        evicted
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.data.len() == self.capacity
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Arithmetic mean, `None` when empty.
    pub fn mean(&self) -> Option<f64> {
        if self.data.is_empty() {
            return None;
        }
        Some(self.data.iter().sum::<f64>() / self.data.len() as f64)
    }

    /// Mean and population standard deviation (divisor N), `None` when empty.
    ///
    /// Both are recomputed from every retained sample.
    pub fn stats(&self) -> Option<WindowStats> {
        let mean = self.mean()?;
        let n = self.data.len() as f64;
        let variance = self.data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        Some(WindowStats {
            mean,
            std_dev: variance.sqrt(),
        })
    }
}
