//! The native force feedback driver boundary
//!
//! This trait is the only seam between the session state machine and the
//! platform driver (DirectInput on Windows). Implementations own the raw
//! device and effect handles and translate buffer layouts into descriptor
//! vectors; the session only sees statuses and descriptors.

use forcelink_errors::NativeResult;
use forcelink_ffb::{EffectKind, SpringCondition};

use crate::{AxisDescriptor, DeviceDescriptor};

/// Native FFB driver.
///
/// Every method is synchronous and bounded by the driver itself. An
/// implementation that cannot load its library returns
/// [`NativeError::Unavailable`](forcelink_errors::NativeError::Unavailable)
/// from every call.
pub trait NativeFfb {
    /// Bootstrap the native subsystem.
    fn start_subsystem(&mut self) -> NativeResult;

    /// Tear the native subsystem down, releasing the device and its effects.
    fn stop_subsystem(&mut self) -> NativeResult;

    /// List FFB-capable devices. May be empty.
    fn enumerate_devices(&mut self) -> NativeResult<Vec<DeviceDescriptor>>;

    /// Create and acquire the device handle for `instance_id`.
    fn acquire_device(&mut self, instance_id: &str) -> NativeResult;

    fn set_auto_center(&mut self, enabled: bool) -> NativeResult;

    /// List force axes of the acquired device.
    fn enumerate_axes(&mut self) -> NativeResult<Vec<AxisDescriptor>>;

    fn create_effect(&mut self, kind: EffectKind) -> NativeResult;

    /// Push a new constant-force magnitude with one direction weight per axis.
    ///
    /// Called once per host tick; implementations must not block.
    fn update_constant_force(&mut self, magnitude: i32, directions: &[i32]) -> NativeResult;

    /// Push one spring condition per axis.
    fn update_spring_conditions(&mut self, conditions: &[SpringCondition]) -> NativeResult;

    fn set_effect_gain(&mut self, kind: EffectKind, gain_percent: f32) -> NativeResult;

    fn start_all_effects(&mut self) -> NativeResult;

    fn stop_all_effects(&mut self) -> NativeResult;
}

impl<N: NativeFfb + ?Sized> NativeFfb for Box<N> {
    fn start_subsystem(&mut self) -> NativeResult {
        (**self).start_subsystem()
    }

    fn stop_subsystem(&mut self) -> NativeResult {
        (**self).stop_subsystem()
    }

    fn enumerate_devices(&mut self) -> NativeResult<Vec<DeviceDescriptor>> {
        (**self).enumerate_devices()
    }

    fn acquire_device(&mut self, instance_id: &str) -> NativeResult {
        (**self).acquire_device(instance_id)
    }

    fn set_auto_center(&mut self, enabled: bool) -> NativeResult {
        (**self).set_auto_center(enabled)
    }

    fn enumerate_axes(&mut self) -> NativeResult<Vec<AxisDescriptor>> {
        (**self).enumerate_axes()
    }

    fn create_effect(&mut self, kind: EffectKind) -> NativeResult {
        (**self).create_effect(kind)
    }

    fn update_constant_force(&mut self, magnitude: i32, directions: &[i32]) -> NativeResult {
        (**self).update_constant_force(magnitude, directions)
    }

    fn update_spring_conditions(&mut self, conditions: &[SpringCondition]) -> NativeResult {
        (**self).update_spring_conditions(conditions)
    }

    fn set_effect_gain(&mut self, kind: EffectKind, gain_percent: f32) -> NativeResult {
        (**self).set_effect_gain(kind, gain_percent)
    }

    fn start_all_effects(&mut self) -> NativeResult {
        (**self).start_all_effects()
    }

    fn stop_all_effects(&mut self) -> NativeResult {
        (**self).stop_all_effects()
    }
}
