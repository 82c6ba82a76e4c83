//! In-memory simulated driver
//!
//! [`SimDriver`] behaves like a DirectInput FFB driver with a fixed set of
//! devices: calls made out of order fail with the status codes the real
//! driver uses, failures can be scripted per call, and the whole library
//! can be made "unavailable". Every call is counted per [`NativeOp`] and,
//! unless disabled with [`SimDriver::without_call_log`], logged with its
//! arguments; a [`SimHandle`] keeps access to both after the driver has been
//! moved into a session.

use std::collections::HashMap;
use std::sync::Arc;

use forcelink_errors::{NativeError, NativeOp, NativeResult, NativeStatus};
use forcelink_ffb::{EffectKind, SpringCondition};
use forcelink_mapping::gain_percent_to_native;
use parking_lot::Mutex;

use crate::{AxisDescriptor, DeviceDescriptor, NativeFfb};

/// A logged native call with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeCall {
    StartSubsystem,
    StopSubsystem,
    EnumerateDevices,
    AcquireDevice(String),
    SetAutoCenter(bool),
    EnumerateAxes,
    CreateEffect(EffectKind),
    UpdateConstantForce { magnitude: i32, directions: Vec<i32> },
    UpdateSpringConditions(Vec<SpringCondition>),
    SetEffectGain { kind: EffectKind, gain_percent: f32 },
    StartAllEffects,
    StopAllEffects,
}

impl NativeCall {
    pub fn op(&self) -> NativeOp {
        match self {
            NativeCall::StartSubsystem => NativeOp::StartSubsystem,
            NativeCall::StopSubsystem => NativeOp::StopSubsystem,
            NativeCall::EnumerateDevices => NativeOp::EnumerateDevices,
            NativeCall::AcquireDevice(_) => NativeOp::AcquireDevice,
            NativeCall::SetAutoCenter(_) => NativeOp::SetAutoCenter,
            NativeCall::EnumerateAxes => NativeOp::EnumerateAxes,
            NativeCall::CreateEffect(kind) => NativeOp::CreateEffect(*kind),
            NativeCall::UpdateConstantForce { .. } => NativeOp::UpdateConstantForce,
            NativeCall::UpdateSpringConditions(_) => NativeOp::UpdateSpringConditions,
            NativeCall::SetEffectGain { kind, .. } => NativeOp::SetEffectGain(*kind),
            NativeCall::StartAllEffects => NativeOp::StartAllEffects,
            NativeCall::StopAllEffects => NativeOp::StopAllEffects,
        }
    }
}

/// A simulated device and its force axes.
#[derive(Debug, Clone)]
pub struct SimDevice {
    pub descriptor: DeviceDescriptor,
    pub axes: Vec<AxisDescriptor>,
}

impl SimDevice {
    pub fn new(descriptor: DeviceDescriptor) -> Self {
        Self {
            descriptor,
            axes: Vec::new(),
        }
    }

    /// Appends an axis; offsets follow the `DIJOFS_X`, `DIJOFS_Y`, ... layout.
    pub fn with_axis(mut self, name: impl Into<String>) -> Self {
        let index = self.axes.len() as u32;
        self.axes.push(AxisDescriptor::new(name, index, index * 4));
        self
    }

    /// A steering wheel with a single force axis.
    pub fn wheel(instance_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(DeviceDescriptor::new(instance_id, name)).with_axis("X Axis")
    }

    /// A two-axis force feedback joystick.
    pub fn joystick(instance_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(DeviceDescriptor::new(instance_id, name))
            .with_axis("X Axis")
            .with_axis("Y Axis")
    }
}

#[derive(Debug, Clone, Copy)]
struct ScriptedFailure {
    error: NativeError,
    /// `None` fails forever.
    remaining: Option<u32>,
}

#[derive(Debug, Default)]
struct SimState {
    calls: Vec<NativeCall>,
    call_counts: HashMap<NativeOp, usize>,
    log_disabled: bool,
    failures: HashMap<NativeOp, ScriptedFailure>,
    unavailable: bool,
    started: bool,
    acquired: Option<usize>,
    auto_center: bool,
    effects: Vec<EffectKind>,
    playing: bool,
    last_magnitude: Option<i32>,
    last_spring: Vec<SpringCondition>,
    gains: HashMap<EffectKind, i32>,
}

impl SimState {
    fn take_failure(&mut self, op: NativeOp) -> Option<NativeError> {
        let failure = self.failures.get_mut(&op)?;
        let error = failure.error;
        let exhausted = match &mut failure.remaining {
            None => false,
            Some(n) => {
                *n = n.saturating_sub(1);
                *n == 0
            }
        };
        if exhausted {
            self.failures.remove(&op);
        }
        Some(error)
    }

    fn require_started(&self) -> NativeResult {
        if self.started {
            Ok(())
        } else {
            Err(NativeError::Status(NativeStatus::NOT_INITIALIZED))
        }
    }

    fn require_acquired<'a>(&self, devices: &'a [SimDevice]) -> NativeResult<&'a SimDevice> {
        self.require_started()?;
        self.acquired
            .and_then(|index| devices.get(index))
            .ok_or(NativeError::Status(NativeStatus::NOT_ACQUIRED))
    }

    fn require_effect(&self, kind: EffectKind) -> NativeResult {
        if self.effects.contains(&kind) {
            Ok(())
        } else {
            Err(NativeError::Status(NativeStatus::NOT_DOWNLOADED))
        }
    }

    fn reset_device(&mut self) {
        self.acquired = None;
        self.auto_center = false;
        self.effects.clear();
        self.playing = false;
        self.last_magnitude = None;
        self.last_spring.clear();
        self.gains.clear();
    }
}

/// Simulated native driver.
#[derive(Debug)]
pub struct SimDriver {
    devices: Vec<SimDevice>,
    state: Arc<Mutex<SimState>>,
}

impl SimDriver {
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
            state: Arc::new(Mutex::new(SimState::default())),
        }
    }

    pub fn with_device(mut self, device: SimDevice) -> Self {
        self.devices.push(device);
        self
    }

    /// A driver whose library "failed to load": every call is `Unavailable`.
    pub fn unavailable() -> Self {
        let driver = Self::new();
        driver.handle().set_unavailable(true);
        driver
    }

    /// Keeps per-op call counts only, so long-running hosts do not grow an
    /// unbounded argument log.
    pub fn without_call_log(self) -> Self {
        self.handle().set_call_log(false);
        self
    }

    /// Shared handle for inspection and fault injection.
    pub fn handle(&self) -> SimHandle {
        SimHandle {
            state: Arc::clone(&self.state),
        }
    }

    pub fn devices(&self) -> &[SimDevice] {
        &self.devices
    }

    fn call<T>(
        &self,
        call: NativeCall,
        f: impl FnOnce(&mut SimState, &[SimDevice]) -> NativeResult<T>,
    ) -> NativeResult<T> {
        let mut state = self.state.lock();
        let op = call.op();
        *state.call_counts.entry(op).or_default() += 1;
        if !state.log_disabled {
            state.calls.push(call);
        }
        if state.unavailable {
            return Err(NativeError::Unavailable);
        }
        if let Some(error) = state.take_failure(op) {
            return Err(error);
        }
        f(&mut *state, &self.devices)
    }
}

impl Default for SimDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeFfb for SimDriver {
    fn start_subsystem(&mut self) -> NativeResult {
        self.call(NativeCall::StartSubsystem, |state, _| {
            state.started = true;
            Ok(())
        })
    }

    fn stop_subsystem(&mut self) -> NativeResult {
        self.call(NativeCall::StopSubsystem, |state, _| {
            state.reset_device();
            state.started = false;
            Ok(())
        })
    }

    fn enumerate_devices(&mut self) -> NativeResult<Vec<DeviceDescriptor>> {
        self.call(NativeCall::EnumerateDevices, |state, devices| {
            state.require_started()?;
            Ok(devices.iter().map(|d| d.descriptor.clone()).collect())
        })
    }

    fn acquire_device(&mut self, instance_id: &str) -> NativeResult {
        self.call(
            NativeCall::AcquireDevice(instance_id.to_string()),
            |state, devices| {
                state.require_started()?;
                let index = devices
                    .iter()
                    .position(|d| d.descriptor.matches(instance_id))
                    .ok_or(NativeError::Status(NativeStatus::DEVICE_NOT_REGISTERED))?;
                state.reset_device();
                state.acquired = Some(index);
                state.auto_center = true;
                Ok(())
            },
        )
    }

    fn set_auto_center(&mut self, enabled: bool) -> NativeResult {
        self.call(NativeCall::SetAutoCenter(enabled), |state, devices| {
            state.require_acquired(devices)?;
            state.auto_center = enabled;
            Ok(())
        })
    }

    fn enumerate_axes(&mut self) -> NativeResult<Vec<AxisDescriptor>> {
        self.call(NativeCall::EnumerateAxes, |state, devices| {
            Ok(state.require_acquired(devices)?.axes.clone())
        })
    }

    fn create_effect(&mut self, kind: EffectKind) -> NativeResult {
        self.call(NativeCall::CreateEffect(kind), |state, devices| {
            let device = state.require_acquired(devices)?;
            if device.axes.is_empty() {
                return Err(NativeError::Status(NativeStatus::INVALID_PARAM));
            }
            if !state.effects.contains(&kind) {
                state.effects.push(kind);
            }
            state.playing = true;
            Ok(())
        })
    }

    fn update_constant_force(&mut self, magnitude: i32, directions: &[i32]) -> NativeResult {
        let call = NativeCall::UpdateConstantForce {
            magnitude,
            directions: directions.to_vec(),
        };
        self.call(call, |state, devices| {
            let device = state.require_acquired(devices)?;
            if directions.len() != device.axes.len() {
                return Err(NativeError::Status(NativeStatus::INVALID_PARAM));
            }
            state.require_effect(EffectKind::ConstantForce)?;
            state.last_magnitude = Some(magnitude);
            Ok(())
        })
    }

    fn update_spring_conditions(&mut self, conditions: &[SpringCondition]) -> NativeResult {
        let call = NativeCall::UpdateSpringConditions(conditions.to_vec());
        self.call(call, |state, devices| {
            let device = state.require_acquired(devices)?;
            if conditions.len() != device.axes.len() {
                return Err(NativeError::Status(NativeStatus::INVALID_PARAM));
            }
            state.require_effect(EffectKind::Spring)?;
            state.last_spring = conditions.to_vec();
            Ok(())
        })
    }

    fn set_effect_gain(&mut self, kind: EffectKind, gain_percent: f32) -> NativeResult {
        let call = NativeCall::SetEffectGain { kind, gain_percent };
        self.call(call, |state, devices| {
            state.require_acquired(devices)?;
            state.require_effect(kind)?;
            state
                .gains
                .insert(kind, gain_percent_to_native(f64::from(gain_percent)));
            Ok(())
        })
    }

    fn start_all_effects(&mut self) -> NativeResult {
        self.call(NativeCall::StartAllEffects, |state, devices| {
            state.require_acquired(devices)?;
            state.playing = true;
            Ok(())
        })
    }

    fn stop_all_effects(&mut self) -> NativeResult {
        self.call(NativeCall::StopAllEffects, |state, devices| {
            state.require_acquired(devices)?;
            state.playing = false;
            Ok(())
        })
    }
}

/// Inspection and fault-injection handle shared with a [`SimDriver`].
#[derive(Debug, Clone)]
pub struct SimHandle {
    state: Arc<Mutex<SimState>>,
}

impl SimHandle {
    /// Every call made so far, in order. Empty while the log is disabled.
    pub fn calls(&self) -> Vec<NativeCall> {
        self.state.lock().calls.clone()
    }

    /// Number of `op` calls made so far, counted even without the log.
    pub fn call_count(&self, op: NativeOp) -> usize {
        self.state
            .lock()
            .call_counts
            .get(&op)
            .copied()
            .unwrap_or_default()
    }

    pub fn clear_calls(&self) {
        let mut state = self.state.lock();
        state.calls.clear();
        state.call_counts.clear();
    }

    /// Turns argument logging on or off. Counts are always kept.
    pub fn set_call_log(&self, enabled: bool) {
        self.state.lock().log_disabled = !enabled;
    }

    /// Makes every future `op` call fail with `error`.
    pub fn fail(&self, op: NativeOp, error: NativeError) {
        self.state.lock().failures.insert(
            op,
            ScriptedFailure {
                error,
                remaining: None,
            },
        );
    }

    /// Makes the next `op` call fail with `error`.
    pub fn fail_once(&self, op: NativeOp, error: NativeError) {
        self.state.lock().failures.insert(
            op,
            ScriptedFailure {
                error,
                remaining: Some(1),
            },
        );
    }

    pub fn clear_failures(&self) {
        self.state.lock().failures.clear();
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.lock().unavailable = unavailable;
    }

    pub fn is_started(&self) -> bool {
        self.state.lock().started
    }

    pub fn is_acquired(&self) -> bool {
        self.state.lock().acquired.is_some()
    }

    pub fn auto_center(&self) -> bool {
        self.state.lock().auto_center
    }

    /// Effects currently created on the acquired device.
    pub fn effects(&self) -> Vec<EffectKind> {
        self.state.lock().effects.clone()
    }

    pub fn effects_playing(&self) -> bool {
        self.state.lock().playing
    }

    pub fn last_magnitude(&self) -> Option<i32> {
        self.state.lock().last_magnitude
    }

    pub fn last_spring_conditions(&self) -> Vec<SpringCondition> {
        self.state.lock().last_spring.clone()
    }

    /// Device-native gain last applied to `kind`.
    pub fn native_gain(&self, kind: EffectKind) -> Option<i32> {
        self.state.lock().gains.get(&kind).copied()
    }
}
