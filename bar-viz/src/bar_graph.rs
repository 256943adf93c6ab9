use alloc::{vec, vec::Vec};

use embedded_graphics::geometry::Size;
use num_complex::Complex32;

#[cfg(feature = "logging")]
use defmt::{debug, info, warn};

use crate::adaptive_normalizer::AdaptiveNormalizer;
use crate::color_strategy::{BarColor, ColorModulator};
use crate::config::VisualizerConfig;
use crate::error::VizError;
use crate::peak_tracker::PeakTracker;
use crate::spatial_interpolator::SpatialInterpolator;
use crate::spectral_band_aggregator::SpectralBandAggregator;
use crate::spectrum_value_animator::SpectrumValueAnimator;
use crate::types::{BarData, BarFrame};

/// One visualization session: all per-bar state for one audio stream.
///
/// Buffers are sized once in [`new`](Self::new); [`update`](Self::update)
/// runs one full pass per video frame without allocating.
pub struct BarGraph {
    config: VisualizerConfig,
    sba: SpectralBandAggregator,
    raw_magnitudes: Vec<f32>,
    scaled_magnitudes: Vec<f32>,
    normalizer: AdaptiveNormalizer,
    animator: SpectrumValueAnimator,
    interpolator: SpatialInterpolator,
    peaks: PeakTracker,
    colors: ColorModulator,
    frame: BarFrame,
    frame_counter: u32,
}

impl BarGraph {
    pub fn new(config: VisualizerConfig) -> Result<Self, VizError> {
        config.validate()?;
        let num_bars = config.bar_count;

        #[cfg(feature = "logging")]
        info!(
            "BarGraph::new called with fft_size: {}, bar_count: {}",
            config.fft_size, num_bars
        );

        let sba = SpectralBandAggregator::new(config.fft_size, num_bars, config.log_floor)?;

        Ok(Self {
            sba,
            raw_magnitudes: vec![0.0; num_bars],
            scaled_magnitudes: vec![0.0; num_bars],
            normalizer: AdaptiveNormalizer::new(config.normalizer_rate),
            animator: SpectrumValueAnimator::new(num_bars, config.smoothing_rate),
            interpolator: SpatialInterpolator::new(num_bars),
            peaks: PeakTracker::new(num_bars, config.peak_decay_rate),
            colors: ColorModulator::new(
                config.color_policy,
                config.hue_degrees_per_second,
                config.alpha,
            ),
            frame: (0..num_bars).map(BarData::empty).collect(),
            frame_counter: 0,
            config,
        })
    }

    /// Runs one frame.
    ///
    /// `spectrum` must hold `fft_size / 2 + 1` bins. A spectrum of any other
    /// length is skipped: the previous frame is returned and only the hue,
    /// which follows wall-clock time, moves on.
    pub fn update(&mut self, spectrum: &[Complex32], viewport: Size, delta_time: f32) -> &[BarData] {
        self.colors.advance(delta_time);

        if spectrum.len() != self.config.spectrum_len() {
            #[cfg(feature = "logging")]
            warn!(
                "BarGraph: spectrum has {} bins, expected {}; frame skipped",
                spectrum.len(),
                self.config.spectrum_len()
            );
            return &self.frame;
        }

        // Step 1: one magnitude per band, plus the loudest band of the frame
        let max_mag = self.config.summary.summarize_bands(
            spectrum,
            self.sba.band_ranges(),
            &mut self.raw_magnitudes,
        );

        // Step 2: scale against the slow loudness ceiling
        self.normalizer.update(max_mag);
        let viewport_height = viewport.height as f32;
        for (scaled, &raw) in self.scaled_magnitudes.iter_mut().zip(&self.raw_magnitudes) {
            *scaled = self.normalizer.scale(raw, viewport_height);
        }

        // Step 3: temporal smoothing, neighbor blending, peak hold
        let smoothed = self.animator.update(&self.scaled_magnitudes);
        let heights = self.interpolator.update(smoothed);
        let peaks = self.peaks.update(heights);

        // Step 4: color and geometry
        let num_bars = self.config.bar_count;
        let layout = self.config.layout.layout(viewport.width, num_bars);
        let peak_color = BarColor::opaque(self.config.peak_color);

        for (i, data) in self.frame.iter_mut().enumerate() {
            data.raw_magnitude = self.raw_magnitudes[i];
            data.smoothed_height = smoothed[i];
            data.height = heights[i];
            data.peak_height = peaks[i];
            data.color = self.colors.color_for(i, num_bars);
            data.peak_color = peak_color;
            data.bar = layout.bar_rect(i, heights[i], viewport.height);
            data.peak_marker = layout.marker_rect(
                i,
                peaks[i],
                self.config.peak_marker_height,
                viewport.height,
            );
        }

        self.frame_counter = self.frame_counter.wrapping_add(1);
        &self.frame
    }

    /// Drops all accumulated state, as if the session had just started.
    pub fn reset(&mut self) {
        self.raw_magnitudes.fill(0.0);
        self.scaled_magnitudes.fill(0.0);
        self.normalizer.reset();
        self.animator.reset();
        self.interpolator.reset();
        self.peaks.reset();
        self.colors.reset();
        for (i, data) in self.frame.iter_mut().enumerate() {
            *data = BarData::empty(i);
        }
        self.frame_counter = 0;
    }

    /// Called when playback moves on to the next track. Returns whether the
    /// state was reset, which depends on `reset_state_on_track_change`.
    pub fn on_track_change(&mut self) -> bool {
        if !self.config.reset_state_on_track_change {
            return false;
        }
        #[cfg(feature = "logging")]
        debug!("BarGraph: track change after {} frames, state reset", self.frame_counter);
        self.reset();
        true
    }

    /// Re-seeds the rotating hue from a new base color.
    pub fn set_base_color(&mut self, color: embedded_graphics::pixelcolor::Rgb888) {
        self.colors.set_base_color(color);
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    pub fn band_ranges(&self) -> &[(usize, usize)] {
        self.sba.band_ranges()
    }

    pub fn frame(&self) -> &[BarData] {
        &self.frame
    }

    pub fn raw_magnitudes(&self) -> &[f32] {
        &self.raw_magnitudes
    }

    pub fn smoothed_heights(&self) -> &[f32] {
        self.animator.values()
    }

    pub fn peak_heights(&self) -> &[f32] {
        self.peaks.peaks()
    }

    pub fn avg_max_mag(&self) -> f32 {
        self.normalizer.avg_max_mag()
    }

    pub fn hue(&self) -> f32 {
        self.colors.hue()
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_counter
    }
}
