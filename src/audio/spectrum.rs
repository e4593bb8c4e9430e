// src/audio/spectrum.rs
//! Smoothed, peak-normalized spectrum state that drives the equalizer columns.
//!
//! Every frame the raw magnitude spectrum goes through an envelope follower
//! (instant attack, exponential release), a lifetime peak tracker and a
//! normalization step. The renderer then asks how many visual units to stack
//! in each band's column.

use thiserror::Error;

/// Default per-frame decay applied to the smoothed magnitudes.
pub const DEFAULT_DECAY_FACTOR: f32 = 0.96;

/// Errors raised when building a [`SpectrumState`].
#[derive(Debug, Error, PartialEq)]
pub enum SpectrumError {
    #[error("spectrum needs at least one band")]
    NoBands,
    #[error("decay factor {0} must lie strictly between 0 and 1")]
    DecayOutOfRange(f32),
    #[error("a band column needs room for at least one visual unit")]
    NoUnits,
}

/// Per-band envelope, peak and normalized intensity.
#[derive(Debug, Clone)]
pub struct SpectrumState {
    /// Number of bands, fixed for the lifetime of the state
    band_count: usize,
    /// Decaying envelope of each band
    smoothed: Vec<f32>,
    /// Largest magnitude ever seen in each band
    peak: Vec<f32>,
    /// `smoothed / peak`, always within [0, 1]
    normalized: Vec<f32>,
    /// Multiplier applied to `smoothed` before each attack
    decay_factor: f32,
    /// Height of a full column, in visual units
    max_units_per_band: usize,
}

impl SpectrumState {
    /// Create a zeroed state with the default decay and a column height equal
    /// to the band count.
    pub fn new(band_count: usize) -> Result<Self, SpectrumError> {
        Self::with_settings(band_count, band_count, DEFAULT_DECAY_FACTOR)
    }

    /// Create a zeroed state with an explicit column height and decay factor.
    pub fn with_settings(
        band_count: usize,
        max_units_per_band: usize,
        decay_factor: f32,
    ) -> Result<Self, SpectrumError> {
        if band_count == 0 {
            return Err(SpectrumError::NoBands);
        }
        if max_units_per_band == 0 {
            return Err(SpectrumError::NoUnits);
        }
        check_decay(decay_factor)?;

        Ok(Self {
            band_count,
            smoothed: vec![0.0; band_count],
            peak: vec![0.0; band_count],
            normalized: vec![0.0; band_count],
            decay_factor,
            max_units_per_band,
        })
    }

    /// Fold one frame of raw magnitudes into the state.
    ///
    /// Bands past the end of `raw` read as silence and extra values are
    /// ignored. NaN, infinite and negative magnitudes are treated as zero so a
    /// single bad frame can never poison the peak tracker.
    pub fn update(&mut self, raw: &[f32]) {
        for i in 0..self.band_count {
            let sample = sanitize(raw.get(i).copied().unwrap_or(0.0));

            self.smoothed[i] *= self.decay_factor;
            self.smoothed[i] = sample.max(self.smoothed[i]);
            self.peak[i] = sample.max(self.peak[i]);

            // Until a band has been heard its normalized value stays where it was.
            if self.peak[i] != 0.0 {
                self.normalized[i] = (self.smoothed[i] / self.peak[i]).clamp(0.0, 1.0);
            }
        }
    }

    /// Number of visual units to stack in column `band`.
    ///
    /// Rounds half up, so the result is always within `0..=max_units_per_band`.
    pub fn visual_units_for_band(&self, band: usize) -> usize {
        self.normalized
            .get(band)
            .map(|&n| (n * self.max_units_per_band as f32 + 0.5).floor() as usize)
            .unwrap_or(0)
            .min(self.max_units_per_band)
    }

    /// Visual unit counts for every band, lowest band first.
    pub fn visual_units(&self) -> Vec<usize> {
        (0..self.band_count)
            .map(|band| self.visual_units_for_band(band))
            .collect()
    }

    pub fn band_count(&self) -> usize {
        self.band_count
    }

    pub fn smoothed(&self) -> &[f32] {
        &self.smoothed
    }

    pub fn peak(&self) -> &[f32] {
        &self.peak
    }

    pub fn normalized(&self) -> &[f32] {
        &self.normalized
    }

    pub fn decay_factor(&self) -> f32 {
        self.decay_factor
    }

    /// Change how quickly columns fall. Takes effect from the next update.
    pub fn set_decay_factor(&mut self, decay_factor: f32) -> Result<(), SpectrumError> {
        check_decay(decay_factor)?;
        self.decay_factor = decay_factor;
        Ok(())
    }

    pub fn max_units_per_band(&self) -> usize {
        self.max_units_per_band
    }

    /// Change the height of a full column without touching the band count.
    pub fn set_max_units_per_band(&mut self, max_units: usize) -> Result<(), SpectrumError> {
        if max_units == 0 {
            return Err(SpectrumError::NoUnits);
        }
        self.max_units_per_band = max_units;
        Ok(())
    }
}

fn check_decay(decay_factor: f32) -> Result<(), SpectrumError> {
    if decay_factor > 0.0 && decay_factor < 1.0 {
        Ok(())
    } else {
        Err(SpectrumError::DecayOutOfRange(decay_factor))
    }
}

fn sanitize(sample: f32) -> f32 {
    if sample.is_finite() && sample > 0.0 {
        sample
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rejects_degenerate_construction() {
        assert_eq!(SpectrumState::new(0).unwrap_err(), SpectrumError::NoBands);
        assert_eq!(
            SpectrumState::with_settings(4, 0, 0.9).unwrap_err(),
            SpectrumError::NoUnits
        );
        assert!(matches!(
            SpectrumState::with_settings(4, 4, 1.0),
            Err(SpectrumError::DecayOutOfRange(_))
        ));
        assert!(matches!(
            SpectrumState::with_settings(4, 4, 0.0),
            Err(SpectrumError::DecayOutOfRange(_))
        ));
    }

    #[test]
    fn silence_keeps_everything_at_rest() {
        let mut state = SpectrumState::new(6).unwrap();
        for _ in 0..100 {
            state.update(&[0.0; 6]);
        }
        assert!(state.smoothed().iter().all(|&v| v == 0.0));
        assert!(state.peak().iter().all(|&v| v == 0.0));
        assert!(state.normalized().iter().all(|&v| v == 0.0));
        assert_eq!(state.visual_units(), vec![0; 6]);
    }

    #[test]
    fn attack_is_instant_and_release_is_geometric() {
        let mut state = SpectrumState::new(1).unwrap();
        state.update(&[2.0]);
        state.update(&[5.0]);
        assert_eq!(state.smoothed()[0], 5.0);

        let mut previous = state.smoothed()[0];
        for _ in 0..50 {
            state.update(&[0.0]);
            let current = state.smoothed()[0];
            assert_relative_eq!(current, previous * DEFAULT_DECAY_FACTOR, epsilon = 1e-6);
            assert!(current > 0.0);
            assert!(current < previous);
            previous = current;
        }
    }

    #[test]
    fn louder_input_than_envelope_sets_normalized_to_one() {
        let mut state = SpectrumState::new(2).unwrap();
        state.update(&[3.0, 1.0]);
        state.update(&[0.0, 0.0]);
        state.update(&[4.0, 0.5]);
        assert_eq!(state.normalized()[0], 1.0);
        assert_relative_eq!(state.normalized()[1], 0.96 * 0.96, epsilon = 1e-6);
    }

    #[test]
    fn short_input_reads_as_silence_and_extra_values_are_ignored() {
        let mut state = SpectrumState::new(3).unwrap();
        state.update(&[1.0, 2.0, 3.0, 99.0]);
        assert_eq!(state.peak(), &[1.0, 2.0, 3.0]);

        state.update(&[1.0]);
        assert_eq!(state.smoothed()[0], 1.0);
        assert_relative_eq!(state.smoothed()[1], 1.92, epsilon = 1e-6);
        assert_relative_eq!(state.smoothed()[2], 2.88, epsilon = 1e-6);

        state.update(&[]);
        assert_relative_eq!(state.smoothed()[0], 0.96, epsilon = 1e-6);
    }

    #[test]
    fn malformed_samples_never_reach_the_peak_tracker() {
        let mut state = SpectrumState::new(4).unwrap();
        state.update(&[f32::NAN, f32::INFINITY, -3.0, f32::NEG_INFINITY]);
        assert_eq!(state.peak(), &[0.0; 4]);
        assert_eq!(state.normalized(), &[0.0; 4]);
        assert_eq!(state.visual_units(), vec![0; 4]);
    }

    #[test]
    fn visual_units_round_half_up_against_the_column_height() {
        let mut state = SpectrumState::with_settings(2, 10, 0.5).unwrap();
        state.update(&[8.0, 8.0]);
        state.update(&[0.0, 0.0]);
        // normalized 0.5 -> 5 units
        assert_eq!(state.visual_units_for_band(0), 5);
        state.update(&[0.0, 0.0]);
        // normalized 0.25 -> 2.5 -> 3 units
        assert_eq!(state.visual_units_for_band(1), 3);
        assert_eq!(state.visual_units_for_band(7), 0);
    }

    #[test]
    fn column_height_is_independent_of_band_count() {
        let mut state = SpectrumState::new(4).unwrap();
        state.update(&[1.0, 0.0, 0.0, 0.0]);
        assert_eq!(state.visual_units_for_band(0), 4);

        state.set_max_units_per_band(12).unwrap();
        assert_eq!(state.band_count(), 4);
        assert_eq!(state.visual_units_for_band(0), 12);
        assert_eq!(state.set_max_units_per_band(0), Err(SpectrumError::NoUnits));
    }

    #[test]
    fn decay_factor_can_be_tuned_at_runtime() {
        let mut state = SpectrumState::new(1).unwrap();
        state.update(&[1.0]);
        state.set_decay_factor(0.5).unwrap();
        state.update(&[0.0]);
        assert_relative_eq!(state.smoothed()[0], 0.5);
        assert!(state.set_decay_factor(1.5).is_err());
        assert_eq!(state.decay_factor(), 0.5);
    }
}
