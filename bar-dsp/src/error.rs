use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum DspError {
    #[error("unsupported FFT size {0}, expected 512, 1024, 2048 or 4096")]
    UnsupportedFftSize(usize),
    #[error("buffer holds {actual} samples, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("audio must have at least one channel")]
    NoChannels,
}
