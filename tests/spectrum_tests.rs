// Behaviour of the spectrum display driver as the renderer sees it.

use approx::assert_relative_eq;
use boxeq::audio::SpectrumState;
use rand::{Rng, SeedableRng, rngs::StdRng};

fn random_frames(bands: usize, frames: usize, seed: u64) -> Vec<Vec<f32>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..frames)
        .map(|_| {
            (0..bands)
                .map(|_| {
                    // Mostly quiet with the odd loud spike.
                    if rng.gen_bool(0.1) {
                        rng.gen_range(5.0..50.0)
                    } else {
                        rng.gen_range(0.0..1.0)
                    }
                })
                .collect()
        })
        .collect()
}

#[test]
fn four_band_walkthrough() {
    let mut state = SpectrumState::new(4).unwrap();

    state.update(&[0.0, 0.0, 0.0, 0.0]);
    assert_eq!(state.normalized(), &[0.0; 4]);

    state.update(&[10.0, 0.0, 0.0, 0.0]);
    assert_eq!(state.smoothed(), &[10.0, 0.0, 0.0, 0.0]);
    assert_eq!(state.peak(), &[10.0, 0.0, 0.0, 0.0]);
    assert_eq!(state.normalized(), &[1.0, 0.0, 0.0, 0.0]);

    state.update(&[0.0, 0.0, 0.0, 0.0]);
    assert_relative_eq!(state.smoothed()[0], 9.6, epsilon = 1e-5);
    assert_eq!(&state.smoothed()[1..], &[0.0; 3]);
    assert_eq!(state.peak(), &[10.0, 0.0, 0.0, 0.0]);
    assert_relative_eq!(state.normalized()[0], 0.96, epsilon = 1e-6);

    // round(0.96 * 4) = round(3.84) = 4
    assert_eq!(state.visual_units_for_band(0), 4);
    assert_eq!(state.visual_units(), vec![4, 0, 0, 0]);
}

#[test]
fn peaks_never_fall_and_levels_stay_bounded() {
    let bands = 8;
    let mut state = SpectrumState::new(bands).unwrap();
    let mut previous_peak = vec![0.0f32; bands];

    for frame in random_frames(bands, 500, 7) {
        state.update(&frame);
        for i in 0..bands {
            assert!(state.peak()[i] >= previous_peak[i]);
            assert!(state.peak()[i] >= state.smoothed()[i]);
            assert!(state.smoothed()[i] >= 0.0);
            assert!((0.0..=1.0).contains(&state.normalized()[i]));
            assert!(state.visual_units_for_band(i) <= state.max_units_per_band());
        }
        previous_peak.copy_from_slice(state.peak());
    }
}

#[test]
fn input_matching_the_peak_reads_full_scale() {
    let mut state = SpectrumState::new(3).unwrap();
    state.update(&[2.0, 4.0, 6.0]);
    for _ in 0..10 {
        state.update(&[0.1, 0.1, 0.1]);
    }
    state.update(&[2.0, 4.0, 6.0]);
    assert_eq!(state.normalized(), &[1.0, 1.0, 1.0]);
    assert_eq!(state.visual_units(), vec![3, 3, 3]);
}

#[test]
fn release_is_asymptotic() {
    let mut state = SpectrumState::new(1).unwrap();
    state.update(&[1.0]);
    let mut previous = state.smoothed()[0];
    for _ in 0..200 {
        state.update(&[0.0]);
        let current = state.smoothed()[0];
        assert!(current <= previous);
        assert!(current > 0.0);
        previous = current;
    }
}

#[test]
fn a_bad_frame_does_not_disturb_the_display() {
    let mut state = SpectrumState::new(4).unwrap();
    state.update(&[1.0, 2.0, 3.0, 4.0]);
    let peak_before = state.peak().to_vec();

    state.update(&[f32::NAN, f32::INFINITY, -1.0]);
    assert_eq!(state.peak(), peak_before.as_slice());
    assert!(state.normalized().iter().all(|n| (0.0..=1.0).contains(n)));
}
