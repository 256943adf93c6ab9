use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

// Below this spread between the largest and smallest channel a color is gray.
const ACHROMATIC_EPSILON: f32 = 0.00001;

/// Hue in degrees `[0, 360)`, saturation and value in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

/// Wraps an angle into `[0, 360)`. Non-finite input maps to 0.
pub fn wrap_degrees(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let mut wrapped = libm::fmodf(degrees, 360.0);
    if wrapped < 0.0 {
        wrapped += 360.0;
    }
    // -tiny + 360.0 rounds to 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

impl Hsv {
    pub const fn new(h: f32, s: f32, v: f32) -> Self {
        Self { h, s, v }
    }

    /// Converts an RGB color.
    ///
    /// Grays (including black) have no hue. For those `fallback_hue` is used,
    /// so callers that pass their current hue keep it unchanged instead of
    /// picking up an undefined value.
    pub fn from_rgb(color: Rgb888, fallback_hue: f32) -> Self {
        let r = color.r() as f32 / 255.0;
        let g = color.g() as f32 / 255.0;
        let b = color.b() as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        if delta < ACHROMATIC_EPSILON {
            return Self::new(wrap_degrees(fallback_hue), 0.0, max);
        }

        let sextant = if r >= max {
            (g - b) / delta
        } else if g >= max {
            2.0 + (b - r) / delta
        } else {
            4.0 + (r - g) / delta
        };

        Self::new(wrap_degrees(sextant * 60.0), delta / max, max)
    }

    /// Classic sextant conversion. Channels are truncated, not rounded.
    pub fn to_rgb(&self) -> Rgb888 {
        let hh = wrap_degrees(self.h) / 60.0;
        let s = self.s.clamp(0.0, 1.0);
        let v = self.v.clamp(0.0, 1.0);

        let sextant = hh as u32;
        let ff = hh - sextant as f32;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * ff);
        let t = v * (1.0 - s * (1.0 - ff));

        let (r, g, b) = match sextant {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        Rgb888::new((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_primary_colors_round_trip() {
        let red = Hsv::from_rgb(Rgb888::new(255, 0, 0), 0.0);
        assert_abs_diff_eq!(red.h, 0.0);
        assert_abs_diff_eq!(red.s, 1.0);
        assert_abs_diff_eq!(red.v, 1.0);

        let green = Hsv::from_rgb(Rgb888::new(0, 255, 0), 0.0);
        assert_abs_diff_eq!(green.h, 120.0, epsilon = 1e-3);

        let blue = Hsv::from_rgb(Rgb888::new(0, 0, 255), 0.0);
        assert_abs_diff_eq!(blue.h, 240.0, epsilon = 1e-3);

        assert_eq!(Hsv::new(0.0, 1.0, 1.0).to_rgb(), Rgb888::new(255, 0, 0));
        assert_eq!(Hsv::new(120.0, 1.0, 1.0).to_rgb(), Rgb888::new(0, 255, 0));
        assert_eq!(Hsv::new(240.0, 1.0, 1.0).to_rgb(), Rgb888::new(0, 0, 255));
    }

    #[test]
    fn test_magenta_hue_is_wrapped_positive() {
        // (g - b) / delta is negative here
        let magenta = Hsv::from_rgb(Rgb888::new(255, 0, 255), 0.0);
        assert_abs_diff_eq!(magenta.h, 300.0, epsilon = 1e-3);
    }

    #[test]
    fn test_achromatic_uses_fallback_hue() {
        let black = Hsv::from_rgb(Rgb888::new(0, 0, 0), 42.0);
        assert_eq!(black.h, 42.0);
        assert_eq!(black.s, 0.0);
        assert_eq!(black.v, 0.0);
        assert!(!black.h.is_nan());

        let gray = Hsv::from_rgb(Rgb888::new(128, 128, 128), 300.0);
        assert_eq!(gray.h, 300.0);
        assert_eq!(gray.s, 0.0);
    }

    #[test]
    fn test_hue_at_360_is_treated_as_zero() {
        assert_eq!(
            Hsv::new(360.0, 1.0, 1.0).to_rgb(),
            Hsv::new(0.0, 1.0, 1.0).to_rgb()
        );
    }

    #[test]
    fn test_wrap_degrees() {
        assert_abs_diff_eq!(wrap_degrees(370.0), 10.0, epsilon = 1e-4);
        assert_abs_diff_eq!(wrap_degrees(-10.0), 350.0, epsilon = 1e-4);
        assert_eq!(wrap_degrees(f32::NAN), 0.0);
        assert_eq!(wrap_degrees(f32::INFINITY), 0.0);
        assert!(wrap_degrees(-1e-9) < 360.0);
    }
}
