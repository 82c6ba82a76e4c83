//! The effect session state machine
//!
//! ```text
//! Uninitialized --start--> Started --acquire--> DeviceAcquired
//!       ^                     |                      |
//!       +-------release-------+----------------------+
//!
//! any phase --native library unavailable--> Failed (terminal)
//! ```
//!
//! Setup and teardown report every failure to the [`DiagnosticsSink`] and
//! only return `Err` for state violations and core acquisition failures.
//! The per-tick operations never return errors and allocate nothing.

use forcelink_errors::{FfbError, FfbResult, NativeError, NativeOp, Phase};
use forcelink_ffb::{EffectKind, SpringCondition};
use forcelink_native::{AxisDescriptor, DeviceDescriptor, NativeFfb, NativeResult};
use tracing::{debug, info, warn};

use crate::catalog::{AxisSet, DeviceCatalog};
use crate::config::SessionConfig;
use crate::diagnostics::{DiagnosticsSink, TracingDiagnostics};

/// Effects created on the active device, independent of whether they are
/// currently enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Provisioned {
    constant_force: bool,
    /// Spring effect created and its conditions accepted by the device.
    spring: bool,
    /// Spring effect created, whether or not a condition push succeeded.
    spring_created: bool,
}

/// Lifecycle of one force feedback device on top of a native driver.
///
/// The session owns its driver exclusively. Dropping it releases the
/// subsystem if it is still running.
#[derive(Debug)]
pub struct EffectSession<N: NativeFfb, D: DiagnosticsSink = TracingDiagnostics> {
    native: N,
    diagnostics: D,
    config: SessionConfig,
    phase: Phase,
    devices: DeviceCatalog,
    active_device: Option<DeviceDescriptor>,
    axis_set: AxisSet,
    provisioned: Provisioned,
    constant_force_enabled: bool,
    spring_force_enabled: bool,
}

impl<N: NativeFfb> EffectSession<N> {
    /// Creates a session that logs its diagnostics through `tracing`.
    pub fn new(native: N, config: SessionConfig) -> Self {
        Self::with_diagnostics(native, config, TracingDiagnostics)
    }
}

impl<N: NativeFfb, D: DiagnosticsSink> EffectSession<N, D> {
    /// Creates a session in [`Phase::Uninitialized`]. No native call is made.
    pub fn with_diagnostics(native: N, config: SessionConfig, diagnostics: D) -> Self {
        Self {
            native,
            diagnostics,
            config,
            phase: Phase::Uninitialized,
            devices: DeviceCatalog::default(),
            active_device: None,
            axis_set: AxisSet::default(),
            provisioned: Provisioned::default(),
            constant_force_enabled: false,
            spring_force_enabled: false,
        }
    }

    // ----- accessors -------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the native subsystem is running.
    pub fn ffb_enabled(&self) -> bool {
        matches!(self.phase, Phase::Started | Phase::DeviceAcquired)
    }

    pub fn is_failed(&self) -> bool {
        self.phase == Phase::Failed
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn devices(&self) -> &DeviceCatalog {
        &self.devices
    }

    pub fn active_device(&self) -> Option<&DeviceDescriptor> {
        self.active_device.as_ref()
    }

    pub fn axis_set(&self) -> &AxisSet {
        &self.axis_set
    }

    pub fn axes(&self) -> &[AxisDescriptor] {
        self.axis_set.axes()
    }

    pub fn axis_directions(&self) -> &[i32] {
        self.axis_set.directions()
    }

    pub fn spring_conditions(&self) -> &[SpringCondition] {
        self.axis_set.spring_conditions()
    }

    pub fn constant_force_enabled(&self) -> bool {
        self.constant_force_enabled
    }

    pub fn spring_force_enabled(&self) -> bool {
        self.spring_force_enabled
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut D {
        &mut self.diagnostics
    }

    pub fn native(&self) -> &N {
        &self.native
    }

    // ----- lifecycle -------------------------------------------------------

    /// Host start hook: runs [`enable_force_feedback`](Self::enable_force_feedback)
    /// when `enable_on_start` is set.
    ///
    /// # Errors
    ///
    /// Propagates the errors of `enable_force_feedback`.
    pub fn bring_up(&mut self) -> FfbResult<()> {
        if self.config.enable_on_start {
            self.enable_force_feedback()
        } else {
            debug!("enable_on_start is off; skipping force feedback bring-up");
            Ok(())
        }
    }

    /// Starts the native subsystem. Returns whether it is running.
    ///
    /// A failed start is reported and leaves the session uninitialized.
    /// Calling this while already started is a no-op.
    pub fn start(&mut self) -> bool {
        match self.phase {
            Phase::Failed => false,
            Phase::Started | Phase::DeviceAcquired => true,
            Phase::Uninitialized => {
                if self
                    .call(NativeOp::StartSubsystem, |native, _| native.start_subsystem())
                    .is_err()
                {
                    return false;
                }
                self.phase = Phase::Started;
                info!("force feedback subsystem started");
                true
            }
        }
    }

    /// Enumerates FFB devices and replaces the catalog with the result.
    ///
    /// A failed enumeration is reported and keeps the previous catalog.
    ///
    /// # Errors
    ///
    /// [`FfbError::InvalidState`] before [`start`](Self::start),
    /// [`FfbError::Device`] when enumeration fails, and
    /// [`FfbError::Unavailable`] from the call that finds the driver missing.
    pub fn discover_devices(&mut self) -> FfbResult<&DeviceCatalog> {
        match self.phase {
            Phase::Failed => return Ok(&self.devices),
            Phase::Uninitialized => return Err(self.reject("discover devices")),
            Phase::Started | Phase::DeviceAcquired => {}
        }
        let devices = self.call(NativeOp::EnumerateDevices, |native, _| {
            native.enumerate_devices()
        })?;
        self.devices = DeviceCatalog::new(devices);
        info!(count = self.devices.len(), "force feedback devices discovered");
        for device in &self.devices {
            debug!(
                instance_id = %device.instance_id,
                product_id = %device.product_id,
                name = %device.label(),
                "device"
            );
        }
        Ok(&self.devices)
    }

    /// Starts the subsystem, discovers devices and, with
    /// `auto_select_first_device`, acquires the first one.
    ///
    /// A failed start is reported and ends bring-up without an error. An
    /// empty catalog leaves the session started without a device. Once a
    /// device is active this is a no-op.
    ///
    /// # Errors
    ///
    /// Propagates [`discover_devices`](Self::discover_devices) and
    /// [`acquire_device`](Self::acquire_device) errors.
    pub fn enable_force_feedback(&mut self) -> FfbResult<()> {
        if matches!(self.phase, Phase::Failed | Phase::DeviceAcquired) {
            return Ok(());
        }
        if !self.start() {
            return Ok(());
        }
        let first = self
            .discover_devices()?
            .first()
            .map(|d| d.instance_id.clone());
        if !self.config.auto_select_first_device {
            return Ok(());
        }
        let Some(first) = first else {
            info!("no force feedback devices found; nothing to acquire");
            return Ok(());
        };
        self.acquire_device(&first)
    }

    /// Acquires the catalog device `instance_id` and provisions its axes
    /// and effects according to the session config.
    ///
    /// A previously active device is stopped and dropped first. Failures
    /// after the core acquisition (auto-center, axis enumeration, effect
    /// creation) are reported and leave the device acquired with whatever
    /// was provisioned.
    ///
    /// # Errors
    ///
    /// [`FfbError::InvalidState`] before [`start`](Self::start),
    /// [`FfbError::UnknownDevice`] for an id missing from the catalog,
    /// [`FfbError::Device`] when the native acquisition fails, and
    /// [`FfbError::Unavailable`] from the call that finds the driver missing.
    pub fn acquire_device(&mut self, instance_id: &str) -> FfbResult<()> {
        match self.phase {
            Phase::Failed => return Ok(()),
            Phase::Uninitialized => return Err(self.reject("acquire device")),
            Phase::Started | Phase::DeviceAcquired => {}
        }
        let Some(device) = self.devices.get(instance_id).cloned() else {
            let err = FfbError::UnknownDevice(instance_id.to_string());
            self.diagnostics.report(&err);
            return Err(err);
        };

        if self.active_device.is_some() {
            self.deactivate();
            self.ensure_live()?;
        }

        if let Err(err) = self.call(NativeOp::AcquireDevice, |native, _| {
            native.acquire_device(instance_id)
        }) {
            if !self.is_failed() {
                self.phase = Phase::Started;
                self.clear_device();
            }
            return Err(err);
        }

        self.phase = Phase::DeviceAcquired;
        info!(
            instance_id = %device.instance_id,
            name = %device.label(),
            "force feedback device acquired"
        );
        self.active_device = Some(device);
        self.provision()
    }

    /// Auto-center, axis and effect steps of an acquisition.
    fn provision(&mut self) -> FfbResult<()> {
        if self.config.disable_auto_center {
            self.attempt(NativeOp::SetAutoCenter, |native, _| {
                native.set_auto_center(false)
            });
            self.ensure_live()?;
        }

        let axes = self.attempt(NativeOp::EnumerateAxes, |native, _| native.enumerate_axes());
        self.ensure_live()?;
        let Some(axes) = axes else {
            return Ok(());
        };
        self.axis_set = AxisSet::new(axes);
        info!(count = self.axis_set.len(), "force axes enumerated");
        for axis in self.axis_set.axes() {
            debug!(
                name = %axis.name,
                index = axis.axis_index,
                offset = axis.offset,
                "axis"
            );
        }
        if self.axis_set.is_empty() {
            warn!("device reports no force axes; no effects provisioned");
            return Ok(());
        }

        if self.config.enable_constant_force {
            let created = self
                .attempt(NativeOp::CreateEffect(EffectKind::ConstantForce), |native, _| {
                    native.create_effect(EffectKind::ConstantForce)
                })
                .is_some();
            self.ensure_live()?;
            if created {
                self.provisioned.constant_force = true;
                self.constant_force_enabled = true;
                self.attempt(NativeOp::UpdateConstantForce, |native, axes| {
                    native.update_constant_force(0, axes.directions())
                });
                self.ensure_live()?;
            }
        }

        if self.config.enable_spring {
            self.axis_set.reset_spring_conditions();
            let created = self
                .attempt(NativeOp::CreateEffect(EffectKind::Spring), |native, _| {
                    native.create_effect(EffectKind::Spring)
                })
                .is_some();
            self.ensure_live()?;
            if created {
                self.provisioned.spring_created = true;
                self.push_spring_conditions();
                self.ensure_live()?;
            }
        }

        debug!(
            constant_force = self.constant_force_enabled,
            spring = self.spring_force_enabled,
            "effects provisioned"
        );
        Ok(())
    }

    /// Stops the subsystem and clears all device state, whatever the native
    /// result. A no-op when nothing is running.
    pub fn release(&mut self) {
        if !self.ffb_enabled() {
            return;
        }
        self.attempt(NativeOp::StopSubsystem, |native, _| native.stop_subsystem());
        if self.is_failed() {
            return;
        }
        self.clear_device();
        self.devices = DeviceCatalog::default();
        self.phase = Phase::Uninitialized;
        info!("force feedback released");
    }

    // ----- per-tick operations --------------------------------------------

    /// Pushes a constant-force magnitude with explicit direction weights.
    ///
    /// A no-op unless the constant-force effect is enabled and `directions`
    /// has one entry per axis.
    pub fn update_constant_force(&mut self, magnitude: i32, directions: &[i32]) {
        if !self.constant_force_enabled || directions.len() != self.axis_set.len() {
            return;
        }
        self.attempt(NativeOp::UpdateConstantForce, |native, _| {
            native.update_constant_force(magnitude, directions)
        });
    }

    /// Pushes a constant-force magnitude using the stored direction weights.
    pub fn push_constant_force(&mut self, magnitude: i32) {
        if !self.constant_force_enabled {
            return;
        }
        self.attempt(NativeOp::UpdateConstantForce, |native, axes| {
            native.update_constant_force(magnitude, axes.directions())
        });
    }

    /// Applies a gain percentage to an enabled effect. A no-op otherwise.
    pub fn set_effect_gain(&mut self, kind: EffectKind, gain_percent: f32) {
        if !self.effect_enabled(kind) {
            return;
        }
        self.attempt(NativeOp::SetEffectGain(kind), |native, _| {
            native.set_effect_gain(kind, gain_percent)
        });
    }

    /// Replaces the stored direction weights used by
    /// [`push_constant_force`](Self::push_constant_force).
    ///
    /// # Errors
    ///
    /// [`FfbError::InvalidState`] when the length differs from the axis count.
    pub fn set_axis_directions(&mut self, directions: &[i32]) -> FfbResult<()> {
        if self.is_failed() {
            return Ok(());
        }
        if !self.axis_set.copy_directions(directions) {
            return Err(self.reject("set axis directions"));
        }
        Ok(())
    }

    /// Replaces the stored spring conditions and pushes them when the spring
    /// effect is enabled, or when it was created but never accepted a push.
    /// Push failures are reported.
    ///
    /// # Errors
    ///
    /// [`FfbError::InvalidState`] when the length differs from the axis
    /// count, and [`FfbError::Unavailable`] from the call that finds the
    /// driver missing.
    pub fn set_spring_conditions(&mut self, conditions: &[SpringCondition]) -> FfbResult<()> {
        if self.is_failed() {
            return Ok(());
        }
        if !self.axis_set.copy_spring_conditions(conditions) {
            return Err(self.reject("set spring conditions"));
        }
        // A spring whose initial push failed is retried here.
        if self.spring_force_enabled
            || (self.provisioned.spring_created && !self.provisioned.spring)
        {
            self.push_spring_conditions();
        }
        self.ensure_live()
    }

    /// Starts every created effect and re-enables the ones provisioned on
    /// this device.
    pub fn start_all_effects(&mut self) {
        if self.phase != Phase::DeviceAcquired {
            return;
        }
        if self
            .attempt(NativeOp::StartAllEffects, |native, _| native.start_all_effects())
            .is_some()
        {
            self.constant_force_enabled = self.provisioned.constant_force;
            self.spring_force_enabled = self.provisioned.spring;
        }
    }

    /// Stops every created effect without destroying them.
    pub fn stop_all_effects(&mut self) {
        if self.phase != Phase::DeviceAcquired {
            return;
        }
        self.attempt(NativeOp::StopAllEffects, |native, _| native.stop_all_effects());
        self.constant_force_enabled = false;
        self.spring_force_enabled = false;
    }

    // ----- internals -------------------------------------------------------

    /// Pushes the stored conditions. The spring counts as provisioned and
    /// enabled only once the device has accepted them.
    fn push_spring_conditions(&mut self) {
        let pushed = self
            .attempt(NativeOp::UpdateSpringConditions, |native, axes| {
                native.update_spring_conditions(axes.spring_conditions())
            })
            .is_some();
        if pushed {
            self.provisioned.spring = true;
            self.spring_force_enabled = true;
        }
    }

    fn effect_enabled(&self, kind: EffectKind) -> bool {
        match kind {
            EffectKind::ConstantForce => self.constant_force_enabled,
            EffectKind::Spring => self.spring_force_enabled,
            _ => false,
        }
    }

    /// Runs one native call. `Unavailable` latches [`Phase::Failed`]; every
    /// failure is reported exactly once here.
    fn call<T>(
        &mut self,
        op: NativeOp,
        f: impl FnOnce(&mut N, &AxisSet) -> NativeResult<T>,
    ) -> FfbResult<T> {
        match f(&mut self.native, &self.axis_set) {
            Ok(value) => Ok(value),
            Err(NativeError::Unavailable) => {
                self.latch_unavailable();
                Err(FfbError::Unavailable)
            }
            Err(err @ NativeError::Status(_)) => {
                let err = FfbError::native(op, err);
                self.diagnostics.report(&err);
                Err(err)
            }
        }
    }

    /// A non-fatal native call; `None` means the failure was reported.
    fn attempt<T>(
        &mut self,
        op: NativeOp,
        f: impl FnOnce(&mut N, &AxisSet) -> NativeResult<T>,
    ) -> Option<T> {
        self.call(op, f).ok()
    }

    fn ensure_live(&self) -> FfbResult<()> {
        if self.is_failed() {
            Err(FfbError::Unavailable)
        } else {
            Ok(())
        }
    }

    fn reject(&mut self, op: &'static str) -> FfbError {
        let err = FfbError::invalid_state(op, self.phase);
        self.diagnostics.report(&err);
        err
    }

    fn latch_unavailable(&mut self) {
        self.diagnostics.report(&FfbError::Unavailable);
        self.clear_device();
        self.devices = DeviceCatalog::default();
        self.phase = Phase::Failed;
    }

    /// Stops the active device's effects and forgets it; the subsystem keeps
    /// running.
    fn deactivate(&mut self) {
        self.attempt(NativeOp::StopAllEffects, |native, _| native.stop_all_effects());
        if self.is_failed() {
            return;
        }
        if let Some(device) = self.active_device.as_ref() {
            debug!(instance_id = %device.instance_id, "releasing active device");
        }
        self.clear_device();
        self.phase = Phase::Started;
    }

    fn clear_device(&mut self) {
        self.active_device = None;
        self.axis_set = AxisSet::default();
        self.provisioned = Provisioned::default();
        self.constant_force_enabled = false;
        self.spring_force_enabled = false;
    }
}

impl<N: NativeFfb, D: DiagnosticsSink> Drop for EffectSession<N, D> {
    fn drop(&mut self) {
        self.release();
    }
}
