//! Linear range mapping.

use forcelink_ffb::NOMINAL_MAX;
use serde::{Deserialize, Serialize};

use crate::MappingError;

fn finite(argument: &'static str, value: f64) -> Result<f64, MappingError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MappingError::NonFinite { argument, value })
    }
}

/// Interpolate between `a` and `b`.
///
/// Exact at `t == 0` and `t == 1`, and never leaves `[a, b]` for
/// `t` in `[0, 1]`.
#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    let span = b - a;
    if t < 0.5 {
        a + t * span
    } else {
        b - (1.0 - t) * span
    }
}

/// Rescale `x` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// With `clamp` set, `x` is first clamped into `[in_min, in_max]`. Callers
/// must pass `in_min <= in_max` for the clamp to be meaningful; reversed
/// input bounds do not panic, but the clamped result is unspecified.
///
/// # Errors
///
/// - [`MappingError::DegenerateRange`] if `in_min == in_max`
/// - [`MappingError::NonFinite`] if any argument is NaN or infinite, a
///   range width overflows, or the mapped value itself is not finite
///
/// # Examples
///
/// ```
/// use forcelink_mapping::rescale;
///
/// assert_eq!(rescale(0.0, 0.0, 1.0, 100.0, 200.0, false)?, 100.0);
/// assert_eq!(rescale(1.0, 0.0, 1.0, 100.0, 200.0, false)?, 200.0);
/// assert_eq!(rescale(5.0, 0.0, 1.0, 100.0, 200.0, true)?, 200.0);
/// assert!(rescale(0.5, 1.0, 1.0, 0.0, 1.0, false).is_err());
/// # Ok::<(), forcelink_mapping::MappingError>(())
/// ```
pub fn rescale(
    x: f64,
    in_min: f64,
    in_max: f64,
    out_min: f64,
    out_max: f64,
    clamp: bool,
) -> Result<f64, MappingError> {
    let x = finite("x", x)?;
    let map = RangeMap::new(in_min, in_max, out_min, out_max)?;
    let map = if clamp { map.clamped() } else { map };
    map.try_apply(x)
}

/// A validated linear mapping between two ranges.
///
/// Construction rejects degenerate or non-finite ranges, so [`apply`] is
/// infallible and safe to call from the per-tick path.
///
/// [`apply`]: RangeMap::apply
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRangeMap", into = "RawRangeMap")]
pub struct RangeMap {
    in_min: f64,
    in_max: f64,
    out_min: f64,
    out_max: f64,
    clamp: bool,
}

impl RangeMap {
    /// Creates an unclamped mapping.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::DegenerateRange`] when `in_min == in_max` and
    /// [`MappingError::NonFinite`] for NaN/infinite bounds or overflowing
    /// widths.
    pub fn new(in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> Result<Self, MappingError> {
        let in_min = finite("in_min", in_min)?;
        let in_max = finite("in_max", in_max)?;
        let out_min = finite("out_min", out_min)?;
        let out_max = finite("out_max", out_max)?;

        if in_min == in_max {
            return Err(MappingError::DegenerateRange { value: in_min });
        }
        finite("input width", in_max - in_min)?;
        finite("output width", out_max - out_min)?;

        Ok(Self {
            in_min,
            in_max,
            out_min,
            out_max,
            clamp: false,
        })
    }

    /// Returns the same mapping with input clamping enabled.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.clamp = true;
        self
    }

    /// Whether inputs are clamped before mapping.
    pub fn is_clamped(&self) -> bool {
        self.clamp
    }

    /// Input bounds as `(min, max)`.
    pub fn input(&self) -> (f64, f64) {
        (self.in_min, self.in_max)
    }

    /// Output bounds as `(min, max)`.
    pub fn output(&self) -> (f64, f64) {
        (self.out_min, self.out_max)
    }

    /// Maps `x` through the range. NaN propagates unless clamped, in which
    /// case it lands on the lower input bound.
    #[inline]
    pub fn apply(&self, x: f64) -> f64 {
        // max/min rather than f64::clamp: reversed bounds must not panic
        let x = if self.clamp {
            x.max(self.in_min).min(self.in_max)
        } else {
            x
        };
        let t = (x - self.in_min) / (self.in_max - self.in_min);
        let t = if self.clamp { t.max(0.0).min(1.0) } else { t };
        lerp(t, self.out_min, self.out_max)
    }

    /// Like [`apply`](Self::apply), but rejects a non-finite input or a
    /// result that overflowed.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::NonFinite`] naming `x` or `result`.
    pub fn try_apply(&self, x: f64) -> Result<f64, MappingError> {
        let x = finite("x", x)?;
        finite("result", self.apply(x))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawRangeMap {
    input: [f64; 2],
    output: [f64; 2],
    #[serde(default)]
    clamp: bool,
}

impl TryFrom<RawRangeMap> for RangeMap {
    type Error = MappingError;

    fn try_from(raw: RawRangeMap) -> Result<Self, Self::Error> {
        let [in_min, in_max] = raw.input;
        let [out_min, out_max] = raw.output;
        let map = Self::new(in_min, in_max, out_min, out_max)?;
        Ok(if raw.clamp { map.clamped() } else { map })
    }
}

impl From<RangeMap> for RawRangeMap {
    fn from(map: RangeMap) -> Self {
        Self {
            input: [map.in_min, map.in_max],
            output: [map.out_min, map.out_max],
            clamp: map.clamp,
        }
    }
}

/// Converts a gain percentage (`0..=100`) to device-native gain
/// (`0..=10000`), clamping out-of-range input. NaN maps to zero.
///
/// ```
/// use forcelink_mapping::gain_percent_to_native;
///
/// assert_eq!(gain_percent_to_native(50.0), 5000);
/// assert_eq!(gain_percent_to_native(150.0), 10000);
/// assert_eq!(gain_percent_to_native(-3.0), 0);
/// ```
pub fn gain_percent_to_native(percent: f64) -> i32 {
    if percent.is_nan() {
        return 0;
    }
    let scale = f64::from(NOMINAL_MAX) / 100.0;
    // Saturating float-to-int cast; the clamp keeps it within 0..=NOMINAL_MAX.
    (percent.clamp(0.0, 100.0) * scale).round() as i32
}
