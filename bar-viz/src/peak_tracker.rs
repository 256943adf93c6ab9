use alloc::{vec, vec::Vec};

use crate::types::lerp;

/// Peak-hold markers: jump up instantly, fall back `decay_rate` of the way
/// toward the current height every frame.
pub struct PeakTracker {
    peaks: Vec<f32>,
    decay_rate: f32,
}

impl PeakTracker {
    pub fn new(num_values: usize, decay_rate: f32) -> Self {
        Self {
            peaks: vec![0.0; num_values],
            decay_rate,
        }
    }

    pub fn update(&mut self, heights: &[f32]) -> &[f32] {
        for (peak, &height) in self.peaks.iter_mut().zip(heights) {
            if height > *peak {
                *peak = height;
            } else {
                *peak = lerp(*peak, height, self.decay_rate);
            }
        }
        &self.peaks
    }

    pub fn peaks(&self) -> &[f32] {
        &self.peaks
    }

    pub fn reset(&mut self) {
        self.peaks.fill(0.0);
    }
}
