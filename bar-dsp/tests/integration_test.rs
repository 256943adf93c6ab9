use approx::assert_abs_diff_eq;
use bar_dsp::{
    fold_to_mono, normalize_samples, CaptureRing, Complex32, PlaybackCursor, SpectrumSource,
    Windowing,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f32::consts::PI;

const TOLERANCE: f32 = 1e-3;

fn sine(len: usize, cycles_per_window: f32, window: usize, amplitude: f32) -> Vec<f32> {
    (0..len)
        .map(|n| amplitude * (2.0 * PI * cycles_per_window * n as f32 / window as f32).sin())
        .collect()
}

fn magnitude(bin: &Complex32) -> f32 {
    bin.norm_sqr().sqrt()
}

fn loudest_bin(spectrum: &[Complex32]) -> usize {
    spectrum
        .iter()
        .map(magnitude)
        .enumerate()
        .fold((0, 0.0f32), |best, (i, m)| if m > best.1 { (i, m) } else { best })
        .0
}

#[test]
fn test_normalize_samples_real_world() {
    let expected = sine(1024, 8.0, 1024, 0.5);
    let sine_i16: Vec<i16> = expected
        .iter()
        .map(|&s| (s * i16::MAX as f32).round() as i16)
        .collect();

    let mut normalized = [0.0f32; 1024];
    normalize_samples(&sine_i16, &mut normalized);
    for (i, (&got, &want)) in normalized.iter().zip(&expected).enumerate() {
        assert!((got - want).abs() < TOLERANCE, "Expected {want}, got {got} at index {i}");
    }
}

#[test]
fn test_pure_tone_lands_in_its_bin() {
    for &fft_size in &[512usize, 1024, 2048, 4096] {
        let mut source = SpectrumSource::new(fft_size, Windowing::Rectangular).unwrap();
        let samples = sine(fft_size, 64.0, fft_size, 1.0);
        let spectrum = source.process(&samples).unwrap();

        assert_eq!(spectrum.len(), fft_size / 2 + 1);
        assert_eq!(loudest_bin(spectrum), 64);
        // a unit sine on an exact bin carries N/2
        let rel = magnitude(&spectrum[64]) / (fft_size as f32 / 2.0);
        assert_abs_diff_eq!(rel, 1.0, epsilon = 1e-2);
    }
}

#[test]
fn test_hann_reduces_leakage_of_off_bin_tone() {
    let samples = sine(2048, 100.5, 2048, 1.0);

    let mut rectangular = SpectrumSource::new(2048, Windowing::Rectangular).unwrap();
    let far_rect = magnitude(&rectangular.process(&samples).unwrap()[300]);

    let mut hann = SpectrumSource::new(2048, Windowing::Hann).unwrap();
    let spectrum = hann.process(&samples).unwrap();
    let far_hann = magnitude(&spectrum[300]);
    let peak = loudest_bin(spectrum);

    assert!(peak == 100 || peak == 101);
    assert!(far_hann < far_rect / 10.0, "hann {far_hann}, rectangular {far_rect}");
}

#[test]
fn test_playback_window_follows_the_track() {
    let sample_rate = 8_000;
    let cursor = PlaybackCursor::new(sample_rate);
    // one second at 8 kHz: a 1 kHz tone, then silence
    let mut track = sine(sample_rate as usize, 1_000.0, sample_rate as usize, 0.8);
    track.extend(std::iter::repeat(0.0).take(sample_rate as usize));

    let mut source = SpectrumSource::new(1024, Windowing::Hann).unwrap();
    let mut window = vec![0.0f32; 1024];

    cursor.fill_window(&track, 0.25, &mut window);
    let spectrum = source.process(&window).unwrap();
    // 1 kHz at 8 kHz over 1024 samples is bin 128
    assert_eq!(loudest_bin(spectrum), 128);

    cursor.fill_window(&track, 1.5, &mut window);
    let spectrum = source.process(&window).unwrap();
    assert!(spectrum.iter().all(|bin| bin.norm_sqr() == 0.0));

    assert!(!cursor.is_finished(&track, 1.9));
    assert!(cursor.is_finished(&track, 2.0));
}

#[test]
fn test_capture_ring_keeps_latest_samples_from_random_callbacks() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut ring: CaptureRing<512> = CaptureRing::new();
    let mut stream: Vec<f32> = Vec::new();

    for _ in 0..50 {
        let chunk_len = rng.random_range(0..300);
        let chunk: Vec<f32> = (0..chunk_len).map(|_| rng.random_range(-1.0..1.0)).collect();
        ring.push(&chunk);
        stream.extend_from_slice(&chunk);

        let mut window = [0.0f32; 512];
        ring.latest_window(&mut window).unwrap();
        let tail = &stream[stream.len().saturating_sub(512)..];
        assert_eq!(&window[512 - tail.len()..], tail);
        assert!(window[..512 - tail.len()].iter().all(|&s| s == 0.0));
    }
}

#[test]
fn test_stereo_capture_matches_offline_fold() {
    let mut rng = StdRng::seed_from_u64(11);
    let interleaved: Vec<f32> = (0..2048).map(|_| rng.random_range(-1.0..1.0)).collect();

    let mut offline = vec![0.0f32; 1024];
    assert_eq!(fold_to_mono(&interleaved, 2, &mut offline), Ok(1024));

    let mut ring: CaptureRing<1024> = CaptureRing::new();
    for chunk in interleaved.chunks(128) {
        ring.push_interleaved(chunk, 2).unwrap();
    }
    let mut live = vec![0.0f32; 1024];
    ring.latest_window(&mut live).unwrap();
    assert_eq!(live, offline);
}
