//! # Sidechain Ducking
//!
//! Ducks a synthetic music bed under bursts of "voice" and prints the gain
//! reduction every 100 ms. Halfway through, the shared config switches to
//! the podcast preset from another thread.
//!
//! **Concepts:** DuckingHandle, shared config, presets, meter
//!
//! ```bash
//! cargo run --example ducking
//! ```

use std::f32::consts::TAU;

use ducker::prelude::*;

const SAMPLE_RATE: u32 = 48000;
const BLOCK: usize = 480 * 2;

fn music_bed(seconds: usize) -> Vec<f32> {
    (0..SAMPLE_RATE as usize * seconds)
        .flat_map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let s = 0.4 * (TAU * 110.0 * t).sin() + 0.2 * (TAU * 165.0 * t).sin();
            [s, s]
        })
        .collect()
}

/// One second of speech-like tone, one second of silence, repeated.
fn voice_bursts(seconds: usize) -> Vec<f32> {
    (0..SAMPLE_RATE as usize * seconds)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            if (t as usize) % 2 == 0 {
                0.6 * (TAU * 220.0 * t).sin() * (TAU * 4.0 * t).sin().abs()
            } else {
                0.0
            }
        })
        .collect()
}

fn main() -> ducker::Result<()> {
    tracing_subscriber::fmt::init();

    let seconds = 6;
    let handle = DuckingHandle::new();
    handle.config().apply_preset(DuckingPreset::Moderate);

    let music = BufferSource::new(music_bed(seconds), SampleFormat::stereo(SAMPLE_RATE));
    let voice = BufferSource::new(voice_bursts(seconds), SampleFormat::mono(SAMPLE_RATE));

    let mut processor = handle.processor(music, voice)?;
    processor.reserve(BLOCK);
    let meter = processor.meter();

    println!("Sidechain ducking ({} s, preset: moderate)", seconds);
    println!("  time   gain      envelope  ducking");

    let mut buffer = vec![0.0f32; BLOCK];
    let mut blocks = 0usize;

    loop {
        let produced = processor.read(&mut buffer, 0, BLOCK);
        if produced == 0 {
            break;
        }
        blocks += 1;

        // Ten 10 ms blocks per line
        if blocks % 10 == 0 {
            let snap = meter.snapshot();
            println!(
                "  {:4.1}s {:6.1} dB  {:8.4}  {}",
                blocks as f32 * 0.01,
                snap.gain_reduction_db,
                snap.envelope,
                if snap.ducking { "yes" } else { "no" }
            );
        }

        if blocks == 300 {
            let config = handle.config().clone();
            std::thread::spawn(move || config.apply_preset(DuckingPreset::Podcast))
                .join()
                .expect("preset thread panicked");
            println!("-> switched to podcast preset");
        }
    }

    tracing::info!(blocks, "done");
    Ok(())
}
