//! Native force feedback driver boundary for forcelink
//!
//! This crate defines the contract a platform FFB driver shim implements
//! ([`NativeFfb`]), the descriptor records discovery and axis enumeration
//! produce, and an in-memory [`sim::SimDriver`] used by tests and the CLI.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod descriptor;
pub mod driver;
pub mod sim;

pub use descriptor::*;
pub use driver::*;

pub use forcelink_errors::{NativeError, NativeOp, NativeResult, NativeStatus};
