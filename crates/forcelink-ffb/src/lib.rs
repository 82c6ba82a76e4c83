//! Force Feedback (FFB) effect model for forcelink
//!
//! This crate defines the effect kinds a session provisions, the per-axis
//! spring condition record, and the conversions from logical signals into
//! device-native magnitudes and direction weights.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod constants;
pub mod effects;

pub use constants::*;
pub use effects::*;

/// Converts a logical force signal to a device-native magnitude:
/// `round(force * sensitivity)`, saturated to the `i32` range.
///
/// Non-finite products map to zero so a bad sample never reaches the
/// device as a full-scale force.
///
/// # Examples
///
/// ```
/// use forcelink_ffb::magnitude_from_signal;
///
/// assert_eq!(magnitude_from_signal(1200.0, 0.5), 600);
/// assert_eq!(magnitude_from_signal(-2.5, 1.0), -3);
/// assert_eq!(magnitude_from_signal(f64::NAN, 1.0), 0);
/// ```
#[inline]
pub fn magnitude_from_signal(force: f64, sensitivity: f64) -> i32 {
    let scaled = (force * sensitivity).round();
    if !scaled.is_finite() {
        return 0;
    }
    // Float-to-int `as` saturates at the i32 bounds.
    scaled as i32
}

/// Converts a logical direction in `[-1.0, 1.0]` to an axis direction
/// weight in `[-DIRECTION_SCALE, DIRECTION_SCALE]`, clamping outside values.
///
/// ```
/// use forcelink_ffb::{direction_weight, DIRECTION_SCALE};
///
/// assert_eq!(direction_weight(1.0), DIRECTION_SCALE);
/// assert_eq!(direction_weight(-0.5), -DIRECTION_SCALE / 2);
/// assert_eq!(direction_weight(7.0), DIRECTION_SCALE);
/// ```
pub fn direction_weight(direction: f64) -> i32 {
    if direction.is_nan() {
        return 0;
    }
    (direction.clamp(-1.0, 1.0) * f64::from(DIRECTION_SCALE)).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitude_rounds_half_away_from_zero() {
        assert_eq!(magnitude_from_signal(0.5, 1.0), 1);
        assert_eq!(magnitude_from_signal(-0.5, 1.0), -1);
        assert_eq!(magnitude_from_signal(10.4, 1.0), 10);
    }

    #[test]
    fn test_magnitude_saturates() {
        assert_eq!(magnitude_from_signal(1e20, 1.0), i32::MAX);
        assert_eq!(magnitude_from_signal(-1e20, 1.0), i32::MIN);
        assert_eq!(magnitude_from_signal(f64::INFINITY, 1.0), 0);
    }

    #[test]
    fn test_magnitude_zero_sensitivity() {
        assert_eq!(magnitude_from_signal(5000.0, 0.0), 0);
    }

    #[test]
    fn test_direction_weight() {
        assert_eq!(direction_weight(0.0), 0);
        assert_eq!(direction_weight(-1.0), -DIRECTION_SCALE);
        assert_eq!(direction_weight(f64::NAN), 0);
    }
}
