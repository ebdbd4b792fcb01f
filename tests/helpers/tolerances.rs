//! Tolerance constants for ducking tests.

/// Floating point rounding errors (for passthrough, exact gain).
pub const FLOAT_EPSILON: f32 = 1e-6;

/// Slack for per-sample monotonicity checks on the `f64` smoother.
pub const GAIN_EPSILON: f64 = 1e-9;

/// "Converged" distance from the smoother's target.
pub const CONVERGED_EPSILON: f64 = 1e-4;
