use crate::types::lerp;

/// `avg_max_mag` never drops below this, so silence is never amplified.
pub const NORMALIZER_FLOOR: f32 = 1.0;

/// Slow running estimate of the loudest band, used to scale magnitudes into
/// viewport pixels so bar heights stay stable across volume swings.
pub struct AdaptiveNormalizer {
    avg_max_mag: f32,
    rate: f32,
}

impl AdaptiveNormalizer {
    pub fn new(rate: f32) -> Self {
        Self {
            avg_max_mag: NORMALIZER_FLOOR,
            rate,
        }
    }

    /// Moves the ceiling `rate` of the way toward this frame's loudest band.
    pub fn update(&mut self, frame_max: f32) -> f32 {
        // f32::max drops a NaN operand
        let target = frame_max.max(NORMALIZER_FLOOR);
        self.avg_max_mag = lerp(self.avg_max_mag, target, self.rate).max(NORMALIZER_FLOOR);
        self.avg_max_mag
    }

    /// Converts a raw band magnitude into viewport-height units.
    #[inline]
    pub fn scale(&self, magnitude: f32, viewport_height: f32) -> f32 {
        magnitude / self.avg_max_mag * viewport_height
    }

    pub fn avg_max_mag(&self) -> f32 {
        self.avg_max_mag
    }

    pub fn reset(&mut self) {
        self.avg_max_mag = NORMALIZER_FLOOR;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_starts_at_floor() {
        let normalizer = AdaptiveNormalizer::new(0.1);
        assert_eq!(normalizer.avg_max_mag(), 1.0);
        assert_abs_diff_eq!(normalizer.scale(0.5, 600.0), 300.0);
    }

    #[test]
    fn test_moves_ten_percent_toward_frame_max() {
        let mut normalizer = AdaptiveNormalizer::new(0.1);
        assert_abs_diff_eq!(normalizer.update(11.0), 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(normalizer.update(11.0), 2.9, epsilon = 1e-6);
    }

    #[test]
    fn test_silence_never_goes_below_floor() {
        let mut normalizer = AdaptiveNormalizer::new(0.1);
        normalizer.update(50.0);
        for _ in 0..1000 {
            let avg = normalizer.update(0.0);
            assert!(avg >= NORMALIZER_FLOOR);
        }
        assert_abs_diff_eq!(normalizer.avg_max_mag(), 1.0, epsilon = 1e-4);
        assert_eq!(normalizer.update(f32::NAN), normalizer.avg_max_mag());
    }

    #[test]
    fn test_reset() {
        let mut normalizer = AdaptiveNormalizer::new(0.1);
        normalizer.update(100.0);
        normalizer.reset();
        assert_eq!(normalizer.avg_max_mag(), 1.0);
    }
}
