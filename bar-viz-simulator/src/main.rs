use bar_dsp::{PlaybackCursor, SpectrumSource, Windowing};
use bar_viz::{BarGraph, BarGraphRenderer, Renderer, VisualizerConfig};
use embedded_graphics::{pixelcolor::Rgb888, prelude::*};
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use log::{debug, info};
use std::{
    error::Error,
    f32::consts::PI,
    thread,
    time::{Duration, Instant},
};

pub const WIDTH: u32 = 320;
pub const HEIGHT: u32 = 160;
pub const SCALE: u32 = 3;
pub const FRAME_DELAY_MS: u64 = 16;
pub const SAMPLE_RATE: u32 = 22_050;

/// A rising sweep with a steady bass note under it.
fn sweep_track(seconds: f32) -> Vec<f32> {
    let len = (seconds * SAMPLE_RATE as f32) as usize;
    let mut phase = 0.0f32;
    (0..len)
        .map(|n| {
            let t = n as f32 / SAMPLE_RATE as f32;
            let freq = 60.0 * (8_000.0f32 / 60.0).powf(t / seconds);
            phase = (phase + 2.0 * PI * freq / SAMPLE_RATE as f32) % (2.0 * PI);
            0.6 * phase.sin() + 0.3 * (2.0 * PI * 55.0 * t).sin()
        })
        .collect()
}

/// Three chords, each note fading in and out, one chord per second.
fn chord_track(seconds: f32) -> Vec<f32> {
    const CHORDS: [[f32; 3]; 3] = [
        [261.6, 329.6, 392.0],
        [220.0, 277.2, 329.6],
        [174.6, 220.0, 261.6],
    ];
    let len = (seconds * SAMPLE_RATE as f32) as usize;
    (0..len)
        .map(|n| {
            let t = n as f32 / SAMPLE_RATE as f32;
            let chord = CHORDS[t as usize % CHORDS.len()];
            let envelope = (PI * t.fract()).sin();
            chord
                .iter()
                .enumerate()
                .map(|(k, &f)| (2.0 * PI * f * (k + 1) as f32 * t).sin() / (k + 1) as f32)
                .sum::<f32>()
                * 0.4
                * envelope
        })
        .collect()
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let playlist = [sweep_track(8.0), chord_track(6.0)];
    let config = VisualizerConfig::default();
    let mut graph = BarGraph::new(config)?;
    let mut source = SpectrumSource::new(config.fft_size, Windowing::Rectangular)?;
    let cursor = PlaybackCursor::new(SAMPLE_RATE);
    let renderer = BarGraphRenderer::new(Rgb888::BLACK, true);

    let mut display: SimulatorDisplay<Rgb888> = SimulatorDisplay::new(Size::new(WIDTH, HEIGHT));
    let mut window = Window::new(
        "Bar Spectrum Simulator (any key pauses)",
        &OutputSettingsBuilder::new().scale(SCALE).build(),
    );

    info!(
        "{} bars over a {}-point FFT, {} tracks",
        config.bar_count,
        config.fft_size,
        playlist.len()
    );

    let mut samples = vec![0.0f32; config.fft_size];
    let mut track = 0;
    let mut elapsed = 0.0f32;
    let mut paused = false;
    let mut last_frame = Instant::now();

    'running: loop {
        let now = Instant::now();
        let delta_time = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;
        if !paused {
            elapsed += delta_time;
        }

        if cursor.is_finished(&playlist[track], elapsed) {
            track = (track + 1) % playlist.len();
            elapsed = 0.0;
            let reset = graph.on_track_change();
            info!("Track {} starts, state reset: {}", track, reset);
        }

        cursor.fill_window(&playlist[track], elapsed, &mut samples);
        let spectrum = source.process(&samples)?;
        let frame = graph.update(spectrum, display.size(), delta_time);
        renderer.draw(&mut display, frame)?;
        window.update(&display);

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { .. } => {
                    paused = !paused;
                    debug!("paused: {} at {:.2}s", paused, elapsed);
                }
                _ => {}
            }
        }

        thread::sleep(Duration::from_millis(FRAME_DELAY_MS));
    }

    Ok(())
}
