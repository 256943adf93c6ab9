use thiserror::Error;

/// Configuration problems detected when a [`BarGraph`](crate::BarGraph) session starts.
///
/// Nothing in the per-frame path returns an error; every numeric edge case
/// there has a defined fallback.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum VizError {
    #[error("unsupported FFT size {0}")]
    UnsupportedFftSize(usize),
    #[error("bar count must be at least 1")]
    NoBars,
    #[error("bar count {bars} exceeds half the FFT size ({half})")]
    TooManyBars { bars: usize, half: usize },
    #[error("{name} must lie in [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f32 },
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidParameter { name: &'static str, value: f32 },
}
