// src/audio/visualizer/fft.rs
//! FFT computation and frequency band grouping.

use rustfft::{FftPlanner, num_complex::Complex};

/// Largest FFT window analysed per frame.
pub const MAX_FFT_SIZE: usize = 2048;

/// Below this many samples there is nothing worth transforming.
const MIN_FFT_SIZE: usize = 16;

/// Spacing exponent for band edges; higher values give the bass more bands.
const BAND_EXPONENT: f32 = 2.5;

/// Turns raw audio samples into a linear magnitude spectrum of fixed length.
pub struct SpectrumAnalyser {
    /// FFT planner, caches plans between frames
    fft_planner: FftPlanner<f32>,
    /// Number of frequency bands to output
    num_bands: usize,
}

impl SpectrumAnalyser {
    /// Create an analyser producing `num_bands` magnitudes per frame.
    pub fn new(num_bands: usize) -> Self {
        Self {
            fft_planner: FftPlanner::new(),
            num_bands,
        }
    }

    /// Compute the magnitude spectrum of `samples`, grouped into bands.
    ///
    /// Magnitudes are linear and non-negative. Too few samples yield silence.
    pub fn compute(&mut self, samples: &[f32]) -> Vec<f32> {
        if samples.len() < MIN_FFT_SIZE {
            return vec![0.0; self.num_bands];
        }

        // Largest power of two that fits, so the window is never zero-padded.
        let fft_size = prev_power_of_two(samples.len()).min(MAX_FFT_SIZE);
        let window_start = samples.len() - fft_size;

        let mut buffer: Vec<Complex<f32>> = samples[window_start..]
            .iter()
            .enumerate()
            .map(|(i, &sample)| Complex::new(sample * hann(i, fft_size), 0.0))
            .collect();

        let fft = self.fft_planner.plan_fft_forward(fft_size);
        fft.process(&mut buffer);

        let spectrum_size = fft_size / 2;
        let scale = 1.0 / fft_size as f32;
        let magnitudes: Vec<f32> = buffer
            .iter()
            .take(spectrum_size)
            .map(|c| c.norm() * scale)
            .collect();

        group_into_bands(&magnitudes, self.num_bands)
    }
}

fn hann(i: usize, size: usize) -> f32 {
    0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / size as f32).cos())
}

fn prev_power_of_two(n: usize) -> usize {
    if n.is_power_of_two() {
        n
    } else {
        n.next_power_of_two() / 2
    }
}

/// Average FFT bins into `num_bands` bands with power-law spacing.
///
/// Every band covers at least one bin, so low bands repeat a bin rather than
/// going dark when there are more bands than bass bins.
pub fn group_into_bands(magnitudes: &[f32], num_bands: usize) -> Vec<f32> {
    let bins = magnitudes.len();
    if bins == 0 {
        return vec![0.0; num_bands];
    }

    (0..num_bands)
        .map(|i| {
            let edge = |b: usize| (b as f32 / num_bands as f32).powf(BAND_EXPONENT);
            let bin_start = ((edge(i) * bins as f32) as usize).min(bins - 1);
            let bin_end = ((edge(i + 1) * bins as f32) as usize).clamp(bin_start + 1, bins);

            let slice = &magnitudes[bin_start..bin_end];
            slice.iter().sum::<f32>() / slice.len() as f32
        })
        .collect()
}
