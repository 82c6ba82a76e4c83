//! Force feedback session management for forcelink
//!
//! An [`EffectSession`] owns one native driver and walks a single device
//! through its lifecycle: subsystem start, discovery, acquisition, axis and
//! effect provisioning, per-tick force streaming and teardown. The
//! [`ForceController`] is the host-facing per-tick driver.
//!
//! # Example
//!
//! ```
//! use forcelink_native::sim::{SimDevice, SimDriver};
//! use forcelink_session::{EffectSession, ForceController, SessionConfig};
//!
//! let driver = SimDriver::new().with_device(SimDevice::wheel("{W1}", "Sim Wheel"));
//! let config = SessionConfig::default();
//! let mut session = EffectSession::new(driver, config.clone());
//! session.enable_force_feedback()?;
//! assert!(session.constant_force_enabled());
//!
//! let mut controller = ForceController::from_config(&config);
//! controller.set_force(2500.0);
//! assert!(controller.tick(&mut session));
//!
//! session.release();
//! assert!(!session.ffb_enabled());
//! # Ok::<(), forcelink_errors::FfbError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_debug_implementations)]

pub mod catalog;
pub mod config;
pub mod controller;
pub mod diagnostics;
pub mod session;

pub use catalog::{AxisSet, DeviceCatalog};
pub use config::{ConfigError, SessionConfig};
pub use controller::ForceController;
pub use diagnostics::{DiagnosticsSink, RecordingDiagnostics, TracingDiagnostics};
pub use session::EffectSession;

pub use forcelink_errors::{FfbError, FfbResult, Phase};
