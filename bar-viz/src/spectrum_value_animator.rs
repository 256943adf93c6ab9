use alloc::{vec, vec::Vec};

#[cfg(feature = "logging")]
use defmt::warn;

use crate::types::lerp;

/// Smooths a set of values frame to frame.
///
/// Every call to [`update`](Self::update) moves each value `rate` of the way
/// toward its new target (an exponential moving average with a time constant
/// of roughly `1 / rate` frames). Values are independent of each other.
pub struct SpectrumValueAnimator {
    /// The smoothed values, one per bar.
    current_values: Vec<f32>,
    /// Fraction of the remaining distance covered per frame, in `[0, 1]`.
    rate: f32,
}

impl SpectrumValueAnimator {
    /// Creates an animator for `num_values` values, all starting at zero.
    pub fn new(num_values: usize, rate: f32) -> Self {
        Self {
            current_values: vec![0.0; num_values],
            rate,
        }
    }

    /// Advances every value one frame toward `targets`.
    ///
    /// A target slice of the wrong length leaves the values untouched.
    pub fn update(&mut self, targets: &[f32]) -> &[f32] {
        if targets.len() != self.current_values.len() {
            #[cfg(feature = "logging")]
            warn!(
                "SpectrumValueAnimator: {} targets for {} values, frame skipped",
                targets.len(),
                self.current_values.len()
            );
            return &self.current_values;
        }

        for (value, &target) in self.current_values.iter_mut().zip(targets) {
            *value = lerp(*value, target, self.rate);
        }
        &self.current_values
    }

    pub fn values(&self) -> &[f32] {
        &self.current_values
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn reset(&mut self) {
        self.current_values.fill(0.0);
    }
}
