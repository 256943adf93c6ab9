use alloc::{vec, vec::Vec};

/// 3-tap box filter over neighboring bars. Edge bars reuse their own value
/// for the missing neighbor.
pub fn blend_neighbors(input: &[f32], output: &mut [f32]) {
    let len = input.len().min(output.len());
    for i in 0..len {
        let center = input[i];
        let left = if i == 0 { center } else { input[i - 1] };
        let right = if i + 1 == len { center } else { input[i + 1] };
        output[i] = (left + center + right) / 3.0;
    }
}

/// Holds the blended heights of the current frame. Nothing carries over
/// between frames; the buffer only avoids allocating per frame.
pub struct SpatialInterpolator {
    heights: Vec<f32>,
}

impl SpatialInterpolator {
    pub fn new(num_values: usize) -> Self {
        Self {
            heights: vec![0.0; num_values],
        }
    }

    pub fn update(&mut self, smoothed: &[f32]) -> &[f32] {
        blend_neighbors(smoothed, &mut self.heights);
        &self.heights
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    pub fn reset(&mut self) {
        self.heights.fill(0.0);
    }
}
