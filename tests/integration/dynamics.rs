//! Attack, hold and release behavior over time.

use crate::helpers::tolerances::{CONVERGED_EPSILON, GAIN_EPSILON};
use crate::helpers::*;
use ducker::dsp::utils::db_to_amplitude;
use ducker::prelude::*;

#[test]
fn test_sustained_sidechain_converges_monotonically() {
    let config = DuckingConfig::shared();
    let samples = 2 * TEST_SAMPLE_RATE as usize;

    let mut processor = DuckingProcessor::new(
        mono_source(vec![1.0; samples]),
        mono_source(vec![0.5; samples]),
        config.clone(),
    )
    .unwrap();

    let states = trace(&mut processor, samples);
    assert_eq!(states.len(), samples);

    let reduction = db_to_amplitude(f64::from(config.reduction_db()));

    let engaged = states
        .iter()
        .position(|s| s.target < 1.0)
        .expect("sidechain above threshold should engage ducking");
    assert!(states[..engaged].iter().all(|s| s.gain == 1.0));

    for pair in states.windows(2) {
        assert!(
            pair[1].gain <= pair[0].gain + GAIN_EPSILON,
            "gain rose from {} to {}",
            pair[0].gain,
            pair[1].gain
        );
    }

    let settled = states
        .iter()
        .position(|s| (s.gain - reduction).abs() < CONVERGED_EPSILON)
        .expect("gain should reach the reduction level");
    assert!(states[settled..]
        .iter()
        .all(|s| (s.gain - reduction).abs() < CONVERGED_EPSILON));

    assert!((processor.gain_reduction_db() - -12.0).abs() < 0.01);
}

#[test]
fn test_impulse_holds_ducking_for_hold_window() {
    let config = DuckingConfig::shared();
    config.set_threshold_db(-60.0);
    config.set_attack_ms(1.0);
    config.set_hold_ms(100.0);
    config.set_release_ms(10.0);

    let samples = TEST_SAMPLE_RATE as usize;
    let hold_samples = (TEST_SAMPLE_RATE as f32 * config.hold_ms() / 1000.0) as usize;
    assert_eq!(hold_samples, 4800);

    let mut processor = DuckingProcessor::new(
        mono_source(vec![1.0; samples]),
        mono_source(generate_impulse(samples)),
        config.clone(),
    )
    .unwrap();

    let states = trace(&mut processor, samples);

    let reduced = states[0].target;
    assert!(reduced < 1.0, "impulse should engage ducking on its own sample");
    assert_eq!(states[0].hold, hold_samples);

    // Fully engaged for at least the hold window after the impulse
    for state in &states[..=hold_samples] {
        assert_eq!(state.target, reduced);
    }

    // Release begins exactly one hold window after the envelope last
    // exceeded the threshold.
    let threshold = db_to_amplitude(f64::from(config.threshold_db()));
    let last_above = states
        .iter()
        .rposition(|s| s.envelope > threshold)
        .expect("envelope exceeded threshold");
    let released = last_above + hold_samples + 1;

    assert_eq!(states[last_above + hold_samples].target, reduced);
    assert_eq!(states[released].target, 1.0);
    assert!(states[..released].iter().all(|s| s.target == reduced));

    // Gain never recovers while held
    for pair in states[..released].windows(2) {
        assert!(pair[1].gain <= pair[0].gain + GAIN_EPSILON);
    }
}

#[test]
fn test_release_returns_to_unity() {
    let config = DuckingConfig::shared();
    let burst = TEST_SAMPLE_RATE as usize / 2;
    let tail = 5 * TEST_SAMPLE_RATE as usize;

    let mut processor = DuckingProcessor::new(
        mono_source(vec![1.0; burst + tail]),
        mono_source(generate_burst(0.5, burst, tail)),
        config.clone(),
    )
    .unwrap();

    let states = trace(&mut processor, burst + tail);
    let reduction = db_to_amplitude(f64::from(config.reduction_db()));

    assert!((states[burst - 1].gain - reduction).abs() < 1e-3);

    let released = burst
        + states[burst..]
            .iter()
            .position(|s| s.target == 1.0)
            .expect("ducking should release once the sidechain is silent");
    assert_eq!(states[released].hold, 0);

    for pair in states[released..].windows(2) {
        assert!(
            pair[1].gain + GAIN_EPSILON >= pair[0].gain,
            "gain fell from {} to {}",
            pair[0].gain,
            pair[1].gain
        );
    }

    // Gradual: still well below unity after two release time constants
    let tau = (TEST_SAMPLE_RATE as f32 * config.release_ms() / 1000.0) as usize;
    assert!(states[released + 2 * tau].gain < 0.95);

    // Converged after twelve
    assert!((states[released + 12 * tau].gain - 1.0).abs() < CONVERGED_EPSILON);
    assert!(!processor.is_ducking());
}

#[test]
fn test_envelope_directions() {
    let config = DuckingConfig::shared();
    config.set_attack_ms(1.0);
    config.set_release_ms(1000.0);

    let mut processor = DuckingProcessor::new(
        mono_source(vec![1.0; 2000]),
        mono_source(generate_burst(0.8, 1000, 1000)),
        config,
    )
    .unwrap();

    let states = trace(&mut processor, 2000);

    // Fast rise with the attack coefficient
    assert!(states[499].envelope > 0.79);
    // Slow fall with the release coefficient
    assert!(states[1999].envelope > 0.6);
    assert!(states[1999].envelope < states[1000].envelope);
}

#[test]
fn test_faster_attack_ducks_sooner() {
    let gain_after = |attack_ms: f32| {
        let config = DuckingConfig::shared();
        config.set_attack_ms(attack_ms);

        let mut processor = DuckingProcessor::new(
            mono_source(vec![1.0; 4800]),
            mono_source(vec![0.9; 4800]),
            config,
        )
        .unwrap();
        render(&mut processor, 4800);
        processor.current_gain()
    };

    assert!(gain_after(5.0) < gain_after(50.0));
    assert!(gain_after(50.0) < gain_after(400.0));
}

#[test]
fn test_stereo_program_with_speech_like_sidechain() {
    let samples = TEST_SAMPLE_RATE as usize;
    let music: Vec<f32> = generate_sine(110.0, TEST_SAMPLE_RATE as f64, samples)
        .into_iter()
        .flat_map(|s| [s * 0.5, s * 0.5])
        .collect();
    let voice: Vec<f32> = generate_sine(300.0, TEST_SAMPLE_RATE as f64, samples)
        .into_iter()
        .enumerate()
        .map(|(i, s)| if i < samples / 2 { s * 0.7 } else { 0.0 })
        .flat_map(|s| [s, s])
        .collect();

    let mut processor =
        DuckingProcessor::with_default_config(stereo_source(music.clone()), stereo_source(voice))
            .unwrap();

    let out = render(&mut processor, music.len());
    let quarter = music.len() / 4;

    // Second quarter is under the voice and ducked
    let ducked = rms(&out[quarter..2 * quarter]);
    let dry = rms(&music[quarter..2 * quarter]);
    assert!(ducked < dry * 0.6);

    // Left and right carry the same gain
    for frame in out.chunks_exact(2) {
        assert_eq!(frame[0], frame[1]);
    }
}
