use alloc::vec::Vec;

use embedded_graphics::primitives::Rectangle;

use crate::color_strategy::BarColor;

/// Linear interpolation; `t = 0` yields `a`, `t = 1` yields `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Everything the renderer needs to know about one bar for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarData {
    pub index: usize,           // Position of the bar, 0 is the lowest band
    pub raw_magnitude: f32,     // Summarized band energy before normalization
    pub smoothed_height: f32,   // Temporal EMA of the normalized height
    pub height: f32,            // Height after blending with the neighbors
    pub peak_height: f32,       // Peak-hold level
    pub color: BarColor,
    pub peak_color: BarColor,
    pub bar: Rectangle,         // Bar area in viewport pixels
    pub peak_marker: Rectangle, // Thin marker drawn at the peak level
}

impl BarData {
    pub fn empty(index: usize) -> Self {
        Self {
            index,
            raw_magnitude: 0.0,
            smoothed_height: 0.0,
            height: 0.0,
            peak_height: 0.0,
            color: BarColor::TRANSPARENT,
            peak_color: BarColor::TRANSPARENT,
            bar: Rectangle::zero(),
            peak_marker: Rectangle::zero(),
        }
    }
}

// One frame of bars, lowest band first
pub type BarFrame = Vec<BarData>;
