use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

use crate::hsv::{wrap_degrees, Hsv};

/// Default translucency of the bars.
pub const DEFAULT_BAR_ALPHA: u8 = 180;

/// An RGB color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarColor {
    pub rgb: Rgb888,
    pub alpha: u8,
}

impl BarColor {
    pub const TRANSPARENT: BarColor = BarColor::new(Rgb888::BLACK, 0);

    pub const fn new(rgb: Rgb888, alpha: u8) -> Self {
        Self { rgb, alpha }
    }

    pub const fn opaque(rgb: Rgb888) -> Self {
        Self { rgb, alpha: u8::MAX }
    }

    /// Composites this color over an opaque background.
    pub fn blend_over(&self, background: Rgb888) -> Rgb888 {
        let a = self.alpha as u32;
        let mix = |fg: u8, bg: u8| ((fg as u32 * a + bg as u32 * (255 - a)) / 255) as u8;
        Rgb888::new(
            mix(self.rgb.r(), background.r()),
            mix(self.rgb.g(), background.g()),
            mix(self.rgb.b(), background.b()),
        )
    }
}

/// How bars are tinted, picked once per session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorPolicy {
    /// Fixed cyan-to-magenta gradient across the bar index. Stateless.
    GradientByIndex,
    /// One color for all bars whose hue rotates with wall-clock time,
    /// starting from the hue of `base`.
    RotatingHue { base: Rgb888 },
}

/// Gradient color of bar `index` out of `num_bars`, low bars cyan, high bars magenta.
pub fn gradient_color(index: usize, num_bars: usize, alpha: u8) -> BarColor {
    let t = if num_bars == 0 {
        0.0
    } else {
        index as f32 / num_bars as f32
    };
    let r = (255.0 * t) as u8;
    let g = (255.0 * (1.0 - t)) as u8;
    BarColor::new(Rgb888::new(r, g, 255), alpha)
}

/// Tracks the rotating hue. Under [`ColorPolicy::GradientByIndex`] it holds
/// no meaningful state and [`advance`](Self::advance) is a no-op.
pub struct ColorModulator {
    policy: ColorPolicy,
    base: Hsv,
    hue: f32,
    degrees_per_second: f32,
    alpha: u8,
}

impl ColorModulator {
    pub fn new(policy: ColorPolicy, degrees_per_second: f32, alpha: u8) -> Self {
        let base = match policy {
            ColorPolicy::RotatingHue { base } => Hsv::from_rgb(base, 0.0),
            ColorPolicy::GradientByIndex => Hsv::new(0.0, 1.0, 1.0),
        };
        Self {
            policy,
            base,
            hue: base.h,
            degrees_per_second,
            alpha,
        }
    }

    /// Rotates the hue by `degrees_per_second * delta_time` and returns it.
    ///
    /// Negative or non-finite frame times count as zero. A step too large to
    /// represent leaves the hue where it was.
    pub fn advance(&mut self, delta_time: f32) -> f32 {
        if let ColorPolicy::RotatingHue { .. } = self.policy {
            let dt = if delta_time.is_finite() {
                delta_time.max(0.0)
            } else {
                0.0
            };
            let next = self.hue + self.degrees_per_second * dt;
            if next.is_finite() {
                self.hue = wrap_degrees(next);
            }
        }
        self.hue
    }

    /// Re-seeds the rotation from a new base color. A gray or black base has
    /// no hue of its own, so the current hue is kept.
    pub fn set_base_color(&mut self, color: Rgb888) {
        self.base = Hsv::from_rgb(color, self.hue);
        self.hue = self.base.h;
        if let ColorPolicy::RotatingHue { base } = &mut self.policy {
            *base = color;
        }
    }

    pub fn color_for(&self, index: usize, num_bars: usize) -> BarColor {
        match self.policy {
            ColorPolicy::GradientByIndex => gradient_color(index, num_bars, self.alpha),
            ColorPolicy::RotatingHue { .. } => {
                let rgb = Hsv::new(self.hue, self.base.s, self.base.v).to_rgb();
                BarColor::new(rgb, self.alpha)
            }
        }
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn policy(&self) -> ColorPolicy {
        self.policy
    }

    /// Back to the base hue.
    pub fn reset(&mut self) {
        self.hue = self.base.h;
    }
}
