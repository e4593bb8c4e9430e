// src/audio/visualizer/mod.rs
//! Audio-reactive equalizer: FFT analysis feeding the spectrum display driver.

mod fft;
mod renderer;

use std::sync::{Arc, Mutex};

use ratatui::{Frame, layout::Rect};
use ringbuf::HeapRb;

use super::spectrum::{SpectrumError, SpectrumState};

pub use fft::{SpectrumAnalyser, group_into_bands};
pub use renderer::{EqualizerRenderer, band_color, hsv_to_rgb, outline_brightness, remap};

/// Minimum buffered samples before a frame is analysed.
const MIN_ANALYSIS_SAMPLES: usize = 512;

/// Per-frame driver for the equalizer display.
pub struct Visualizer {
    /// Turns captured samples into a raw magnitude spectrum
    analyser: SpectrumAnalyser,
    /// Smoothed, peak-normalized band intensities
    spectrum: SpectrumState,
    /// Column renderer
    renderer: EqualizerRenderer,
    /// Reused all-zero frame fed while nothing is playing
    silence: Vec<f32>,
}

impl Visualizer {
    /// Create a visualizer with `bands` columns, `max_units` units per column
    /// and the given decay factor.
    pub fn new(bands: usize, max_units: usize, decay: f32) -> Result<Self, SpectrumError> {
        let spectrum = SpectrumState::with_settings(bands, max_units, decay)?;
        Ok(Self {
            analyser: SpectrumAnalyser::new(bands),
            spectrum,
            renderer: EqualizerRenderer::new(),
            silence: vec![0.0; bands],
        })
    }

    /// Analyse the newest samples and advance the spectrum one frame.
    ///
    /// When `active` is false, or too few samples are buffered, a silent frame
    /// is fed instead so the columns fall back down.
    pub fn update(&mut self, sample_buffer: &Arc<Mutex<HeapRb<f32>>>, active: bool) {
        use ringbuf::traits::*;

        let samples: Option<Vec<f32>> = if active {
            sample_buffer.lock().ok().and_then(|buf| {
                let available = buf.occupied_len();
                if available < MIN_ANALYSIS_SAMPLES {
                    return None;
                }
                let take = available.min(fft::MAX_FFT_SIZE);
                Some(buf.iter().skip(available - take).copied().collect())
            })
        } else {
            None
        };

        match samples {
            Some(samples) => {
                let raw = self.analyser.compute(&samples);
                self.spectrum.update(&raw);
            }
            None => self.spectrum.update(&self.silence),
        }
    }

    pub fn spectrum(&self) -> &SpectrumState {
        &self.spectrum
    }

    pub fn spectrum_mut(&mut self) -> &mut SpectrumState {
        &mut self.spectrum
    }

    /// Draw the equalizer; `elapsed_secs` drives the pulsing outline.
    pub fn render(&self, f: &mut Frame<'_>, area: Rect, elapsed_secs: f32) {
        self.renderer.render(f, area, &self.spectrum, elapsed_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringbuf::traits::*;

    fn filled_buffer(len: usize) -> Arc<Mutex<HeapRb<f32>>> {
        let mut rb = HeapRb::<f32>::new(4096);
        for n in 0..len {
            let _ = rb.try_push((n as f32 * 0.3).sin());
        }
        Arc::new(Mutex::new(rb))
    }

    #[test]
    fn playing_audio_lights_up_some_band() {
        let mut vis = Visualizer::new(8, 8, 0.96).unwrap();
        vis.update(&filled_buffer(2048), true);
        assert!(vis.spectrum().peak().iter().any(|&p| p > 0.0));
        assert!(vis.spectrum().visual_units().iter().any(|&u| u > 0));
    }

    #[test]
    fn inactive_player_only_decays() {
        let mut vis = Visualizer::new(4, 4, 0.5).unwrap();
        vis.spectrum_mut().update(&[1.0; 4]);
        let buffer = filled_buffer(2048);
        vis.update(&buffer, false);
        assert_eq!(vis.spectrum().smoothed(), &[0.5; 4]);
        assert_eq!(vis.spectrum().peak(), &[1.0; 4]);
    }

    #[test]
    fn short_buffer_counts_as_silence() {
        let mut vis = Visualizer::new(2, 2, 0.5).unwrap();
        vis.update(&filled_buffer(100), true);
        assert_eq!(vis.spectrum().peak(), &[0.0, 0.0]);
    }
}
