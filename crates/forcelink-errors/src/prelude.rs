//! Prelude module for convenient error handling imports.

pub use crate::{
    FfbResult,
    common::ErrorSeverity,
    ffb::{FfbError, Phase},
    native::{NativeError, NativeOp, NativeResult, NativeStatus},
};
