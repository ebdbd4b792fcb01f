//! Shared conversions for the ducking chain

/// Convert linear amplitude to decibels
#[inline]
pub fn amplitude_to_db(amp: f64) -> f64 {
    if amp <= 0.0 {
        -96.0 // Floor
    } else {
        20.0 * amp.log10()
    }
}

/// Convert decibels to linear amplitude
#[inline]
pub fn db_to_amplitude(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

/// One-pole smoothing coefficient for a time constant in milliseconds.
///
/// Smaller times give smaller coefficients and faster response.
#[inline]
pub fn time_to_coeff(time_ms: f32, sample_rate: f64) -> f64 {
    let samples = sample_rate * f64::from(time_ms) / 1000.0;
    if samples <= 0.0 {
        0.0
    } else {
        (-1.0 / samples).exp()
    }
}

/// Number of whole samples covering `time_ms`.
#[inline]
pub fn ms_to_samples(time_ms: f32, sample_rate: f64) -> usize {
    (sample_rate * f64::from(time_ms) / 1000.0).max(0.0) as usize
}
