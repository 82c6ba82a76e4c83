//! Per-tick force controller
//!
//! The host owns the logical force signal and calls [`ForceController::tick`]
//! once per fixed step. The controller never discovers or acquires devices;
//! it only streams magnitudes into an already provisioned session.

use forcelink_ffb::magnitude_from_signal;
use forcelink_mapping::RangeMap;
use forcelink_native::NativeFfb;

use crate::config::SessionConfig;
use crate::diagnostics::DiagnosticsSink;
use crate::session::EffectSession;

/// Converts a logical force signal into constant-force updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceController {
    force: f64,
    sensitivity: f64,
    signal_map: Option<RangeMap>,
}

impl Default for ForceController {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl ForceController {
    pub fn new(sensitivity: f64) -> Self {
        Self {
            force: 0.0,
            sensitivity,
            signal_map: None,
        }
    }

    /// Seeds sensitivity and signal mapping from a session config.
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            force: 0.0,
            sensitivity: config.sensitivity,
            signal_map: config.signal_map,
        }
    }

    /// Maps the logical force through `map` before applying sensitivity.
    pub fn with_signal_map(mut self, map: RangeMap) -> Self {
        self.signal_map = Some(map);
        self
    }

    pub fn set_force(&mut self, force: f64) {
        self.force = force;
    }

    pub fn force(&self) -> f64 {
        self.force
    }

    pub fn set_sensitivity(&mut self, sensitivity: f64) {
        self.sensitivity = sensitivity;
    }

    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    pub fn signal_map(&self) -> Option<&RangeMap> {
        self.signal_map.as_ref()
    }

    /// Device-native magnitude for the current signal.
    #[inline]
    pub fn magnitude(&self) -> i32 {
        let force = match &self.signal_map {
            Some(map) => map.apply(self.force),
            None => self.force,
        };
        magnitude_from_signal(force, self.sensitivity)
    }

    /// Pushes the current magnitude if the session has an enabled
    /// constant-force effect. Returns whether an update was issued.
    pub fn tick<N: NativeFfb, D: DiagnosticsSink>(&self, session: &mut EffectSession<N, D>) -> bool {
        if !session.constant_force_enabled() {
            return false;
        }
        session.push_constant_force(self.magnitude());
        true
    }
}
