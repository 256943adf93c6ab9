use alloc::vec::Vec;

use crate::error::VizError;

/// Lowest spectrum bin the logarithmic band curve starts from.
///
/// `Two` keeps the lowest bars from collapsing onto single bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum LogFloor {
    One,
    Two,
}

impl LogFloor {
    pub fn bin(self) -> f64 {
        match self {
            LogFloor::One => 1.0,
            LogFloor::Two => 2.0,
        }
    }
}

// Relative nudge applied before flooring so that band edges which are
// integers in exact arithmetic (10^logMax == N/2) do not land one bin low.
const EDGE_EPSILON: f64 = 1e-9;

/// Splits the half-spectrum `[0, N/2]` into `bar_count` logarithmically spaced
/// bands. Ranges are `[start, end)` bin indices and are computed once.
pub struct SpectralBandAggregator {
    active_band_ranges: Vec<(usize, usize)>,
    half_spectrum: usize,
}

impl SpectralBandAggregator {
    pub fn new(fft_size: usize, bar_count: usize, floor: LogFloor) -> Result<Self, VizError> {
        let half_spectrum = fft_size / 2;
        if bar_count == 0 {
            return Err(VizError::NoBars);
        }
        if bar_count > half_spectrum {
            return Err(VizError::TooManyBars {
                bars: bar_count,
                half: half_spectrum,
            });
        }

        let active_band_ranges = (0..bar_count)
            .map(|i| Self::log_band(i, bar_count, half_spectrum, floor))
            .collect();

        Ok(Self {
            active_band_ranges,
            half_spectrum,
        })
    }

    pub fn band_ranges(&self) -> &[(usize, usize)] {
        &self.active_band_ranges
    }

    pub fn half_spectrum(&self) -> usize {
        self.half_spectrum
    }

    /// Range of bar `index` out of `bar_count`, always at least one bin wide.
    pub fn log_band(
        index: usize,
        bar_count: usize,
        half_spectrum: usize,
        floor: LogFloor,
    ) -> (usize, usize) {
        let log_min = libm::log10(floor.bin());
        let log_max = libm::log10(half_spectrum as f64);

        let start_fraction = index as f64 / bar_count as f64;
        let end_fraction = (index + 1) as f64 / bar_count as f64;

        let start = Self::edge(log_min, log_max, start_fraction);
        let end = Self::edge(log_min, log_max, end_fraction).min(half_spectrum);

        if end <= start {
            (start, start + 1)
        } else {
            (start, end)
        }
    }

    fn edge(log_min: f64, log_max: f64, fraction: f64) -> usize {
        let exponent = log_min + (log_max - log_min) * fraction;
        let bin = libm::floor(libm::pow(10.0, exponent) * (1.0 + EDGE_EPSILON));
        bin.max(0.0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_spectral_band_aggregator() {
        let sba = SpectralBandAggregator::new(2048, 256, LogFloor::Two).unwrap();
        assert_eq!(sba.band_ranges().len(), 256);
        assert_eq!(sba.half_spectrum(), 1024);
    }

    #[test]
    fn test_rejects_invalid_bar_counts() {
        assert_eq!(
            SpectralBandAggregator::new(1024, 0, LogFloor::One).err(),
            Some(VizError::NoBars)
        );
        assert_eq!(
            SpectralBandAggregator::new(1024, 513, LogFloor::One).err(),
            Some(VizError::TooManyBars { bars: 513, half: 512 })
        );
        assert!(SpectralBandAggregator::new(1024, 512, LogFloor::One).is_ok());
    }

    #[test]
    fn test_calculate_log_spread_bands() {
        // 16^(k/4) hits the powers of two exactly
        let sba = SpectralBandAggregator::new(32, 4, LogFloor::One).unwrap();
        assert_eq!(sba.band_ranges(), &[(1, 2), (2, 4), (4, 8), (8, 16)]);
    }

    #[test]
    fn test_low_bands_are_widened_to_one_bin() {
        let sba = SpectralBandAggregator::new(32, 16, LogFloor::One).unwrap();
        let ranges = sba.band_ranges();
        assert_eq!(ranges[0], (1, 2));
        assert_eq!(ranges[1], (1, 2));
        assert_eq!(ranges[15].1, 16);
        for &(start, end) in ranges {
            assert!(end > start);
        }
    }

    #[test]
    fn test_floor_two_starts_at_bin_two() {
        let sba = SpectralBandAggregator::new(2048, 256, LogFloor::Two).unwrap();
        assert_eq!(sba.band_ranges()[0].0, 2);
        assert_eq!(sba.band_ranges()[255].1, 1024);
    }

    #[test]
    fn test_high_bands_are_wider_than_low_bands() {
        let sba = SpectralBandAggregator::new(2048, 128, LogFloor::Two).unwrap();
        let ranges = sba.band_ranges();
        let width = |(start, end): (usize, usize)| end - start;
        assert!(width(ranges[127]) > width(ranges[0]));
        assert!(width(ranges[127]) > 10);
    }
}
