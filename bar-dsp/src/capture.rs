use heapless::HistoryBuffer;

#[cfg(feature = "logging")]
use defmt::debug;

use crate::{error::DspError, fold_frame};

/// Pull-model window source for file playback.
///
/// The window is derived from elapsed playback time, never from how many
/// frames were rendered, so pausing keeps returning the same window and a
/// slow renderer skips audio instead of falling behind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackCursor {
    sample_rate: u32,
}

impl PlaybackCursor {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Index of the first sample of the window at `elapsed_seconds`.
    /// Negative or non-finite times map to the start of the track.
    pub fn position(&self, elapsed_seconds: f32) -> usize {
        if !elapsed_seconds.is_finite() || elapsed_seconds <= 0.0 {
            return 0;
        }
        (elapsed_seconds as f64 * self.sample_rate as f64) as usize
    }

    /// Fills `window` with the samples starting at the cursor; anything past
    /// the end of `track` is zero. Returns the cursor position.
    pub fn fill_window(&self, track: &[f32], elapsed_seconds: f32, window: &mut [f32]) -> usize {
        let start = self.position(elapsed_seconds);
        let available = track.get(start..).unwrap_or(&[]);
        let copied = available.len().min(window.len());
        window[..copied].copy_from_slice(&available[..copied]);
        window[copied..].fill(0.0);
        start
    }

    /// Whether the window at `elapsed_seconds` starts past the last sample.
    pub fn is_finished(&self, track: &[f32], elapsed_seconds: f32) -> bool {
        self.position(elapsed_seconds) >= track.len()
    }
}

/// Push-model sink for live capture keeping only the most recent `N` mono
/// samples. Older audio is overwritten, there is no backlog.
pub struct CaptureRing<const N: usize> {
    samples: HistoryBuffer<f32, N>,
}

impl<const N: usize> Default for CaptureRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> CaptureRing<N> {
    pub fn new() -> Self {
        Self {
            samples: HistoryBuffer::new(),
        }
    }

    /// Appends mono samples, as delivered by the capture callback.
    pub fn push(&mut self, samples: &[f32]) {
        self.samples.extend_from_slice(samples);
    }

    /// Appends interleaved frames, folding them to mono on the way in.
    pub fn push_interleaved(&mut self, interleaved: &[f32], channels: usize) -> Result<(), DspError> {
        if channels == 0 {
            return Err(DspError::NoChannels);
        }
        for frame in interleaved.chunks_exact(channels) {
            self.samples.write(fold_frame(frame));
        }
        Ok(())
    }

    /// Copies the current window into `out`, oldest sample first. Until `N`
    /// samples have arrived the front of the window is zero.
    pub fn latest_window(&self, out: &mut [f32]) -> Result<(), DspError> {
        if out.len() != N {
            return Err(DspError::LengthMismatch {
                expected: N,
                actual: out.len(),
            });
        }

        let missing = N - self.samples.len();
        out[..missing].fill(0.0);
        for (slot, &sample) in out[missing..].iter_mut().zip(self.samples.oldest_ordered()) {
            *slot = sample;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() == self.samples.capacity()
    }

    /// Forgets all captured audio, e.g. when the input device changes.
    pub fn clear(&mut self) {
        #[cfg(feature = "logging")]
        debug!("CaptureRing: dropping {} samples", self.samples.len());
        self.samples = HistoryBuffer::new();
    }
}
