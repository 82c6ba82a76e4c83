//! Error types for forcelink
//!
//! # Architecture
//!
//! - [`native`]: raw driver status codes, the failing call, and the
//!   per-call [`NativeError`]
//! - [`ffb`]: the session-level [`FfbError`] taxonomy and lifecycle [`Phase`]
//! - [`common`]: severity classification used to pick log levels
//!
//! # RT Safety
//!
//! Everything a per-tick call can produce (`NativeError`, the `Device`
//! and `Unavailable` variants of `FfbError`) is `Copy` data with no heap
//! allocation.
//!
//! # Example
//!
//! ```
//! use forcelink_errors::prelude::*;
//!
//! fn acquire(code: i32) -> FfbResult<()> {
//!     NativeStatus::check(code).map_err(|e| FfbError::native(NativeOp::AcquireDevice, e))
//! }
//!
//! let err = acquire(0x8007_000C_u32 as i32).unwrap_err();
//! assert!(err.is_fatal());
//! assert_eq!(err.to_string(), "acquire device failed: 0x8007000c (device not acquired)");
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod common;
pub mod ffb;
pub mod native;
pub mod prelude;

pub use common::ErrorSeverity;
pub use ffb::{FfbError, Phase};
pub use native::{NativeError, NativeOp, NativeResult, NativeStatus};

/// A specialized `Result` type for session operations.
pub type FfbResult<T> = std::result::Result<T, FfbError>;
