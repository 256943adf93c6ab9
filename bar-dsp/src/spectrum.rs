use alloc::{vec, vec::Vec};

use microdsp::common::{apply_window_function, WindowFunctionType};
use microfft::{real, Complex32};

#[cfg(feature = "logging")]
use defmt::info;

use crate::{error::DspError, normalize_samples};

pub const SUPPORTED_FFT_SIZES: [usize; 4] = [512, 1024, 2048, 4096];

/// Taper applied to the sample window before the transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum Windowing {
    /// Samples go into the transform untouched.
    #[default]
    Rectangular,
    Hann,
}

/// Turns the trailing `N` mono samples into `N/2 + 1` complex bins, DC first
/// and Nyquist last. Buffers are allocated once.
pub struct SpectrumSource {
    fft_size: usize,
    windowing: Windowing,
    window: Vec<f32>,
    spectrum: Vec<Complex32>,
}

impl SpectrumSource {
    pub fn new(fft_size: usize, windowing: Windowing) -> Result<Self, DspError> {
        if !SUPPORTED_FFT_SIZES.contains(&fft_size) {
            return Err(DspError::UnsupportedFftSize(fft_size));
        }

        #[cfg(feature = "logging")]
        info!("SpectrumSource::new with fft_size: {}, windowing: {}", fft_size, windowing);

        Ok(Self {
            fft_size,
            windowing,
            window: vec![0.0; fft_size],
            spectrum: vec![Complex32::new(0.0, 0.0); fft_size / 2 + 1],
        })
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    pub fn windowing(&self) -> Windowing {
        self.windowing
    }

    pub fn spectrum(&self) -> &[Complex32] {
        &self.spectrum
    }

    /// Transforms exactly `N` samples.
    pub fn process(&mut self, samples: &[f32]) -> Result<&[Complex32], DspError> {
        self.check_len(samples.len())?;
        self.window.copy_from_slice(samples);
        self.transform()
    }

    /// Transforms exactly `N` PCM samples, scaled to `[-1, 1]` first.
    pub fn process_i16(&mut self, samples: &[i16]) -> Result<&[Complex32], DspError> {
        self.check_len(samples.len())?;
        normalize_samples(samples, &mut self.window);
        self.transform()
    }

    fn check_len(&self, actual: usize) -> Result<(), DspError> {
        if actual != self.fft_size {
            return Err(DspError::LengthMismatch {
                expected: self.fft_size,
                actual,
            });
        }
        Ok(())
    }

    fn transform(&mut self) -> Result<&[Complex32], DspError> {
        if self.windowing == Windowing::Hann {
            apply_window_function(WindowFunctionType::Hann, &mut self.window);
        }

        let packed: &mut [Complex32] = match self.fft_size {
            512 => real::rfft_512(as_array(&mut self.window)?).as_mut_slice(),
            1024 => real::rfft_1024(as_array(&mut self.window)?).as_mut_slice(),
            2048 => real::rfft_2048(as_array(&mut self.window)?).as_mut_slice(),
            4096 => real::rfft_4096(as_array(&mut self.window)?).as_mut_slice(),
            other => return Err(DspError::UnsupportedFftSize(other)),
        };

        // microfft packs the real Nyquist bin into the imaginary part of DC
        let half = packed.len();
        self.spectrum[0] = Complex32::new(packed[0].re, 0.0);
        self.spectrum[1..half].copy_from_slice(&packed[1..]);
        self.spectrum[half] = Complex32::new(packed[0].im, 0.0);

        Ok(&self.spectrum)
    }
}

fn as_array<const N: usize>(window: &mut [f32]) -> Result<&mut [f32; N], DspError> {
    let actual = window.len();
    window
        .try_into()
        .map_err(|_| DspError::LengthMismatch { expected: N, actual })
}
