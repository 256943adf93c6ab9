use embedded_graphics::pixelcolor::{Rgb888, RgbColor, WebColors};

use crate::{
    bin_summary_strategy::BinSummaryStrategy,
    color_strategy::{ColorPolicy, DEFAULT_BAR_ALPHA},
    error::VizError,
    layout::LayoutPolicy,
    spectral_band_aggregator::LogFloor,
};

pub const FFT_SIZE_512: usize = 512;
pub const FFT_SIZE_1024: usize = 1024;
pub const FFT_SIZE_2048: usize = 2048;
pub const FFT_SIZE_4096: usize = 4096;

pub const VALID_FFT_SIZES: [usize; 4] = [FFT_SIZE_512, FFT_SIZE_1024, FFT_SIZE_2048, FFT_SIZE_4096];

pub const NUMBER_OF_BARS_128: usize = 128;
pub const NUMBER_OF_BARS_256: usize = 256;

pub const DEFAULT_NORMALIZER_RATE: f32 = 0.1;
pub const DEFAULT_SMOOTHING_RATE: f32 = 0.2;
pub const DEFAULT_PEAK_DECAY_RATE: f32 = 0.05;
pub const DEFAULT_HUE_DEGREES_PER_SECOND: f32 = 10.0;
pub const DEFAULT_PEAK_MARKER_HEIGHT: u32 = 4;

pub fn is_valid_fft_size(value: usize) -> bool {
    VALID_FFT_SIZES.contains(&value)
}

/// Everything fixed for the lifetime of one visualization session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualizerConfig {
    /// Samples per FFT window (`N`). The spectrum holds `N / 2 + 1` bins.
    pub fft_size: usize,
    /// Number of bars (`B`), at most `N / 2`.
    pub bar_count: usize,
    pub log_floor: LogFloor,
    pub summary: BinSummaryStrategy,
    /// Step of the loudness ceiling toward each frame's loudest band.
    pub normalizer_rate: f32,
    /// Step of each bar toward its new height.
    pub smoothing_rate: f32,
    /// Step of a falling peak marker toward the bar.
    pub peak_decay_rate: f32,
    pub hue_degrees_per_second: f32,
    pub color_policy: ColorPolicy,
    pub alpha: u8,
    pub layout: LayoutPolicy,
    pub peak_marker_height: u32,
    pub peak_color: Rgb888,
    /// Whether smoothing, peaks, loudness and hue start over with every track.
    pub reset_state_on_track_change: bool,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            fft_size: FFT_SIZE_2048,
            bar_count: NUMBER_OF_BARS_256,
            log_floor: LogFloor::Two,
            summary: BinSummaryStrategy::CompressedMean,
            normalizer_rate: DEFAULT_NORMALIZER_RATE,
            smoothing_rate: DEFAULT_SMOOTHING_RATE,
            peak_decay_rate: DEFAULT_PEAK_DECAY_RATE,
            hue_degrees_per_second: DEFAULT_HUE_DEGREES_PER_SECOND,
            color_policy: ColorPolicy::RotatingHue {
                base: Rgb888::CSS_DEEP_SKY_BLUE,
            },
            alpha: DEFAULT_BAR_ALPHA,
            layout: LayoutPolicy::FixedBarWidth { bar_width: 3.0 },
            peak_marker_height: DEFAULT_PEAK_MARKER_HEIGHT,
            peak_color: Rgb888::WHITE,
            reset_state_on_track_change: true,
        }
    }
}

impl VisualizerConfig {
    /// The single-file player look: 128 bars over a 1024-point FFT, plain
    /// mean magnitudes, a static gradient and stretched bars with 2 px gaps.
    pub fn classic() -> Self {
        Self {
            fft_size: FFT_SIZE_1024,
            bar_count: NUMBER_OF_BARS_128,
            log_floor: LogFloor::One,
            summary: BinSummaryStrategy::Mean,
            color_policy: ColorPolicy::GradientByIndex,
            layout: LayoutPolicy::FixedSpacing { spacing: 2.0 },
            ..Self::default()
        }
    }

    pub fn with_fft_size(mut self, fft_size: usize) -> Self {
        self.fft_size = fft_size;
        self
    }

    pub fn with_bar_count(mut self, bar_count: usize) -> Self {
        self.bar_count = bar_count;
        self
    }

    pub fn with_log_floor(mut self, log_floor: LogFloor) -> Self {
        self.log_floor = log_floor;
        self
    }

    pub fn with_summary(mut self, summary: BinSummaryStrategy) -> Self {
        self.summary = summary;
        self
    }

    pub fn with_color_policy(mut self, color_policy: ColorPolicy) -> Self {
        self.color_policy = color_policy;
        self
    }

    pub fn with_layout(mut self, layout: LayoutPolicy) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_reset_on_track_change(mut self, reset: bool) -> Self {
        self.reset_state_on_track_change = reset;
        self
    }

    /// Length of the spectrum a frame must carry, `N / 2 + 1`.
    pub fn spectrum_len(&self) -> usize {
        self.fft_size / 2 + 1
    }

    pub fn validate(&self) -> Result<(), VizError> {
        if !is_valid_fft_size(self.fft_size) {
            return Err(VizError::UnsupportedFftSize(self.fft_size));
        }
        if self.bar_count == 0 {
            return Err(VizError::NoBars);
        }
        if self.bar_count > self.fft_size / 2 {
            return Err(VizError::TooManyBars {
                bars: self.bar_count,
                half: self.fft_size / 2,
            });
        }
        check_rate("normalizer_rate", self.normalizer_rate)?;
        check_rate("smoothing_rate", self.smoothing_rate)?;
        check_rate("peak_decay_rate", self.peak_decay_rate)?;
        check_non_negative("hue_degrees_per_second", self.hue_degrees_per_second)?;
        check_non_negative("layout", self.layout.parameter())?;
        Ok(())
    }
}

fn check_rate(name: &'static str, value: f32) -> Result<(), VizError> {
    // NaN fails the range check too
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(VizError::RateOutOfRange { name, value })
    }
}

fn check_non_negative(name: &'static str, value: f32) -> Result<(), VizError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(VizError::InvalidParameter { name, value })
    }
}
