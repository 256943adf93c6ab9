//! Per-frame spectrum → bar transform for a real-time bar visualizer.
//!
//! A [`BarGraph`] owns all state for one audio stream. Every frame it takes
//! the `N/2 + 1` complex bins of a forward real FFT, folds them into `B`
//! log-spaced bars and returns their heights, peak markers, colors and
//! rectangles, ready for any `embedded-graphics` draw target.
#![no_std]
extern crate alloc;

#[cfg(feature = "logging")]
use defmt_rtt as _;

pub mod adaptive_normalizer;
pub mod bar_graph;
pub mod bin_summary_strategy;
pub mod color_strategy;
pub mod config;
pub mod error;
pub mod hsv;
pub mod layout;
pub mod peak_tracker;
pub mod renderer;
pub mod spatial_interpolator;
pub mod spectral_band_aggregator;
pub mod spectrum_value_animator;
pub mod types;

pub use bar_graph::BarGraph;
pub use color_strategy::{BarColor, ColorPolicy};
pub use config::VisualizerConfig;
pub use error::VizError;
pub use layout::LayoutPolicy;
pub use renderer::{BarGraphRenderer, Renderer};
pub use types::{BarData, BarFrame};

pub use num_complex::Complex32;
