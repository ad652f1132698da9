//! Day-length multipliers for a clock watched from the other frame.
//!
//! `radius` is the ship's distance to the horizon and `characteristic` the
//! mass-to-horizon distance. With `ratio = (D - r) / D` the dilation factor is
//! `1 - ratio^2`, which is 1 far from the mass and falls to 0 at the horizon.

pub fn dilation_factor(radius: f64, characteristic: f64) -> f64 {
    debug_assert!(characteristic > 0.0, "characteristic distance must be positive");
    let ratio = (characteristic - radius) / characteristic;
    1.0 - ratio * ratio
}

/// Real milliseconds per simulated day of the distant clock when the observer
/// near the mass is being watched: that clock appears to run slow.
///
/// A zero factor saturates to `u64::MAX`; the horizon check normally fires first.
pub fn slower_day_length(base_day_ms: u64, radius: f64, characteristic: f64) -> u64 {
    let factor = dilation_factor(radius, characteristic);
    (base_day_ms as f64 / factor).round() as u64
}

/// Real milliseconds per simulated day of the distant clock as seen from the
/// ship near the mass: that clock appears to run fast.
pub fn faster_day_length(base_day_ms: u64, radius: f64, characteristic: f64) -> u64 {
    let factor = dilation_factor(radius, characteristic);
    (base_day_ms as f64 * factor).round() as u64
}
