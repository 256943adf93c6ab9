use num_complex::Complex32;

/// How the complex bins of one band are reduced to a single magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum BinSummaryStrategy {
    CompressedMean, // Mean of sqrt(|bin|), narrows the dynamic range
    Mean,           // Plain mean of |bin|
}

/// Magnitude of one FFT bin.
#[inline]
pub fn magnitude(bin: &Complex32) -> f32 {
    libm::sqrtf(bin.re * bin.re + bin.im * bin.im)
}

impl BinSummaryStrategy {
    pub fn calculate(&self, bin_slice: &[Complex32]) -> f32 {
        if bin_slice.is_empty() {
            return 0.0;
        }
        let num_elements = bin_slice.len() as f32;

        match *self {
            BinSummaryStrategy::CompressedMean => {
                bin_slice
                    .iter()
                    .map(|bin| libm::sqrtf(magnitude(bin)))
                    .sum::<f32>()
                    / num_elements
            }
            BinSummaryStrategy::Mean => bin_slice.iter().map(magnitude).sum::<f32>() / num_elements,
        }
    }

    /// Summarizes every band of `spectrum` into `magnitudes` and returns the
    /// loudest band of the frame, never less than 1.0.
    ///
    /// Ranges reaching past the end of `spectrum` are cut short. A band
    /// containing a non-finite bin summarizes to 0.
    pub fn summarize_bands(
        &self,
        spectrum: &[Complex32],
        band_ranges: &[(usize, usize)],
        magnitudes: &mut [f32],
    ) -> f32 {
        let mut max_mag = 1.0f32;
        for (slot, &(start, end)) in magnitudes.iter_mut().zip(band_ranges) {
            let end = end.min(spectrum.len());
            let start = start.min(end);
            let mag = self.calculate(&spectrum[start..end]);
            // a NaN or infinite bin would stick in every stateful stage downstream
            let mag = if mag.is_finite() { mag } else { 0.0 };
            *slot = mag;
            if mag > max_mag {
                max_mag = mag;
            }
        }
        max_mag
    }
}
