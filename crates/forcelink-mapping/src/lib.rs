//! Numeric range mapping for forcelink
//!
//! Force feedback drivers speak in device-native integer units (DirectInput
//! effects use a nominal range of `-10000..=10000`), while hosts usually
//! produce a logical force signal in whatever range their physics model
//! uses. This crate converts between the two.
//!
//! # Overview
//!
//! - [`rescale`]: one-shot linear mapping with optional input clamping
//! - [`RangeMap`]: a pre-validated mapping for the per-tick hot path
//! - [`gain_percent_to_native`]: percentage gain to device-native gain
//!
//! # RT Safety
//!
//! `RangeMap::apply()` performs no allocation and cannot fail; the
//! degenerate-range check happens once at construction.
//!
//! # Example
//!
//! ```
//! use forcelink_mapping::{rescale, RangeMap};
//!
//! // -1.0..1.0 logical force onto the DirectInput nominal range
//! let native = rescale(0.5, -1.0, 1.0, -10000.0, 10000.0, false)?;
//! assert!((native - 5000.0).abs() < 1e-9);
//!
//! let map = RangeMap::new(-1.0, 1.0, -10000.0, 10000.0)?.clamped();
//! assert_eq!(map.apply(3.0), 10000.0);
//! # Ok::<(), forcelink_mapping::MappingError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod range;

pub use error::MappingError;
pub use range::{RangeMap, gain_percent_to_native, rescale};
