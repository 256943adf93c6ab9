//! Audio-side helpers feeding the bar visualizer: PCM conversion, mono
//! folding, sample windows for file playback and live capture, and the
//! forward real FFT producing `N/2 + 1` complex bins.
#![no_std]
extern crate alloc;

#[cfg(feature = "logging")]
use defmt_rtt as _;

pub mod capture;
pub mod error;
pub mod spectrum;

pub use capture::{CaptureRing, PlaybackCursor};
pub use error::DspError;
pub use microfft::Complex32;
pub use spectrum::{SpectrumSource, Windowing};

/// Normalize a single sample from i16 to f32.
pub fn normalize_sample(sample: i16) -> f32 {
    sample as f32 / i16::MAX as f32
}

/// Normalize a slice of i16 samples to a slice of f32 samples.
pub fn normalize_samples(samples: &[i16], normalized_samples: &mut [f32]) {
    for (out, &sample) in normalized_samples.iter_mut().zip(samples) {
        *out = normalize_sample(sample);
    }
}

/// Folds interleaved frames into mono, `0.5 * (left + right)`.
///
/// Only the first two channels of each frame are used. Returns the number of
/// mono samples written, limited by whichever buffer runs out first.
pub fn fold_to_mono(interleaved: &[f32], channels: usize, out: &mut [f32]) -> Result<usize, DspError> {
    if channels == 0 {
        return Err(DspError::NoChannels);
    }

    let mut written = 0;
    for (slot, frame) in out.iter_mut().zip(interleaved.chunks_exact(channels)) {
        *slot = fold_frame(frame);
        written += 1;
    }
    Ok(written)
}

#[inline]
pub(crate) fn fold_frame(frame: &[f32]) -> f32 {
    match frame {
        [left, right, ..] => 0.5 * (left + right),
        [mono] => *mono,
        [] => 0.0,
    }
}
