//! End-to-end lifecycle scenarios against the simulated driver.

use forcelink_errors::{FfbError, NativeError, NativeOp, NativeStatus, Phase};
use forcelink_ffb::EffectKind;
use forcelink_native::sim::{NativeCall, SimDevice, SimDriver, SimHandle};
use forcelink_session::{EffectSession, ForceController, RecordingDiagnostics, SessionConfig};

type TestResult = Result<(), FfbError>;
type SimSession = EffectSession<SimDriver, RecordingDiagnostics>;

fn build(driver: SimDriver, config: SessionConfig) -> (SimSession, SimHandle) {
    let handle = driver.handle();
    let session = EffectSession::with_diagnostics(driver, config, RecordingDiagnostics::new());
    (session, handle)
}

fn two_devices() -> SimDriver {
    SimDriver::new()
        .with_device(SimDevice::wheel("{D1}", "First Wheel"))
        .with_device(SimDevice::joystick("{D2}", "Second Stick"))
}

#[test]
fn auto_select_acquires_first_device() -> TestResult {
    let (mut session, handle) = build(two_devices(), SessionConfig::default());
    session.enable_force_feedback()?;

    assert_eq!(session.phase(), Phase::DeviceAcquired);
    assert_eq!(session.devices().len(), 2);
    assert_eq!(
        session.active_device().map(|d| d.instance_id.as_str()),
        Some("{D1}")
    );
    assert_eq!(handle.call_count(NativeOp::AcquireDevice), 1);
    assert!(
        handle
            .calls()
            .contains(&NativeCall::AcquireDevice("{D1}".to_string()))
    );
    Ok(())
}

#[test]
fn provisioning_pushes_zero_across_every_axis() -> TestResult {
    let driver = SimDriver::new().with_device(SimDevice::joystick("{J1}", "Stick"));
    let (mut session, handle) = build(driver, SessionConfig::default());
    session.enable_force_feedback()?;

    assert_eq!(session.axes().len(), 2);
    assert_eq!(session.axis_directions(), &[0, 0]);
    assert!(session.constant_force_enabled());
    assert!(handle.calls().contains(&NativeCall::UpdateConstantForce {
        magnitude: 0,
        directions: vec![0, 0],
    }));
    Ok(())
}

#[test]
fn failed_core_acquisition_is_reported_once() -> TestResult {
    let (mut session, handle) = build(two_devices(), SessionConfig::default());
    let status = NativeStatus(0x8007_0005_u32 as i32);
    handle.fail_once(NativeOp::AcquireDevice, NativeError::Status(status));

    let result = session.enable_force_feedback();
    assert_eq!(
        result,
        Err(FfbError::Device {
            op: NativeOp::AcquireDevice,
            status,
        })
    );
    assert_eq!(session.phase(), Phase::Started);
    assert!(session.active_device().is_none());
    assert!(session.axes().is_empty());
    assert!(!session.constant_force_enabled());
    assert_eq!(session.diagnostics().len(), 1);
    assert_eq!(
        session
            .diagnostics()
            .count(|e| e.native_status() == Some(status)),
        1
    );
    assert_eq!(handle.call_count(NativeOp::EnumerateAxes), 0);

    // A retry succeeds on the same catalog.
    session.acquire_device("{D1}")?;
    assert_eq!(session.phase(), Phase::DeviceAcquired);
    Ok(())
}

#[test]
fn updates_before_acquisition_make_no_native_call() {
    let (mut session, handle) = build(two_devices(), SessionConfig::default());
    session.update_constant_force(5000, &[0]);
    session.push_constant_force(5000);
    session.set_effect_gain(EffectKind::ConstantForce, 80.0);
    assert!(handle.calls().is_empty());

    assert!(session.start());
    handle.clear_calls();
    session.update_constant_force(5000, &[0]);
    session.set_effect_gain(EffectKind::ConstantForce, 80.0);
    assert!(handle.calls().is_empty());
    assert!(session.diagnostics().is_empty());
}

#[test]
fn mismatched_direction_slice_is_ignored() -> TestResult {
    let (mut session, handle) = build(two_devices(), SessionConfig::default());
    session.enable_force_feedback()?;
    handle.clear_calls();
    session.update_constant_force(100, &[0, 0, 0]);
    assert!(handle.calls().is_empty());
    session.update_constant_force(100, &[10000]);
    assert_eq!(handle.last_magnitude(), Some(100));
    Ok(())
}

#[test]
fn release_clears_all_state() -> TestResult {
    let (mut session, handle) = build(two_devices(), SessionConfig::default().with_spring(true));
    session.enable_force_feedback()?;
    assert!(session.spring_force_enabled());

    session.release();
    assert_eq!(session.phase(), Phase::Uninitialized);
    assert!(!session.ffb_enabled());
    assert!(session.active_device().is_none());
    assert!(session.devices().is_empty());
    assert!(session.axes().is_empty());
    assert!(session.axis_directions().is_empty());
    assert!(session.spring_conditions().is_empty());
    assert!(!session.constant_force_enabled());
    assert!(!session.spring_force_enabled());
    assert!(!handle.is_started());
    Ok(())
}

#[test]
fn release_clears_state_even_when_stop_fails() -> TestResult {
    let (mut session, handle) = build(two_devices(), SessionConfig::default());
    session.enable_force_feedback()?;
    handle.fail_once(
        NativeOp::StopSubsystem,
        NativeError::Status(NativeStatus::GENERIC_FAILURE),
    );
    session.release();
    assert_eq!(session.phase(), Phase::Uninitialized);
    assert!(session.active_device().is_none());
    assert!(!session.constant_force_enabled());
    assert_eq!(session.diagnostics().len(), 1);
    Ok(())
}

#[test]
fn start_and_release_are_idempotent() -> TestResult {
    let (mut session, handle) = build(two_devices(), SessionConfig::default());
    assert!(session.start());
    assert!(session.start());
    assert_eq!(handle.call_count(NativeOp::StartSubsystem), 1);

    session.enable_force_feedback()?;
    session.release();
    let after_first = handle.calls().len();
    session.release();
    assert_eq!(handle.calls().len(), after_first);
    assert_eq!(handle.call_count(NativeOp::StopSubsystem), 1);
    Ok(())
}

#[test]
fn empty_catalog_with_auto_select_stays_started() -> TestResult {
    let (mut session, handle) = build(SimDriver::new(), SessionConfig::default());
    session.enable_force_feedback()?;
    assert_eq!(session.phase(), Phase::Started);
    assert!(session.devices().is_empty());
    assert_eq!(handle.call_count(NativeOp::AcquireDevice), 0);
    assert!(session.diagnostics().is_empty());
    Ok(())
}

#[test]
fn manual_selection_without_auto_select() -> TestResult {
    let config = SessionConfig::default().with_auto_select_first_device(false);
    let (mut session, handle) = build(two_devices(), config);
    session.enable_force_feedback()?;
    assert_eq!(session.phase(), Phase::Started);
    assert_eq!(handle.call_count(NativeOp::AcquireDevice), 0);

    session.acquire_device("{D2}")?;
    assert_eq!(
        session.active_device().map(|d| d.display_name.as_str()),
        Some("Second Stick")
    );
    Ok(())
}

#[test]
fn rediscovery_replaces_catalog_wholesale() -> TestResult {
    let (mut session, _handle) = build(two_devices(), SessionConfig::default());
    session.start();
    let first: Vec<String> = session
        .discover_devices()?
        .iter()
        .map(|d| d.instance_id.clone())
        .collect();
    assert_eq!(first, vec!["{D1}".to_string(), "{D2}".to_string()]);
    assert_eq!(session.discover_devices()?.len(), 2);
    Ok(())
}

#[test]
fn unavailable_library_latches_and_silences() {
    let (mut session, handle) = build(SimDriver::unavailable(), SessionConfig::default());

    assert!(!session.start());
    assert_eq!(session.phase(), Phase::Failed);
    assert_eq!(session.diagnostics().reports(), &[FfbError::Unavailable]);
    let calls_after_latch = handle.calls().len();

    for _ in 0..10 {
        session.update_constant_force(1000, &[0]);
        session.set_effect_gain(EffectKind::ConstantForce, 50.0);
    }
    assert_eq!(session.diagnostics().len(), 1);
    assert_eq!(handle.calls().len(), calls_after_latch);

    assert_eq!(session.enable_force_feedback(), Ok(()));
    assert_eq!(session.acquire_device("{D1}"), Ok(()));
    assert!(
        session
            .discover_devices()
            .map(|c| c.is_empty())
            .unwrap_or(false)
    );
    session.release();
    assert_eq!(session.phase(), Phase::Failed);
    assert_eq!(session.diagnostics().len(), 1);
    assert_eq!(handle.calls().len(), calls_after_latch);
}

#[test]
fn library_lost_mid_session_latches_on_first_call() -> TestResult {
    let (mut session, handle) = build(two_devices(), SessionConfig::default());
    session.enable_force_feedback()?;
    let mut controller = ForceController::default();
    controller.set_force(1200.0);
    assert!(controller.tick(&mut session));

    handle.set_unavailable(true);
    controller.tick(&mut session);
    assert_eq!(session.phase(), Phase::Failed);
    assert!(session.active_device().is_none());
    assert!(!session.constant_force_enabled());

    let calls = handle.calls().len();
    for _ in 0..10 {
        assert!(!controller.tick(&mut session));
    }
    assert_eq!(handle.calls().len(), calls);
    assert_eq!(
        session
            .diagnostics()
            .count(|e| matches!(e, FfbError::Unavailable)),
        1
    );
    drop(session);
    assert_eq!(handle.calls().len(), calls);
    Ok(())
}

#[test]
fn unavailable_during_provisioning_is_returned_once() -> TestResult {
    let (mut session, handle) = build(two_devices(), SessionConfig::default());
    session.start();
    session.discover_devices()?;
    handle.fail_once(NativeOp::EnumerateAxes, NativeError::Unavailable);
    assert_eq!(session.acquire_device("{D1}"), Err(FfbError::Unavailable));
    assert!(session.is_failed());
    assert_eq!(handle.call_count(NativeOp::CreateEffect(EffectKind::ConstantForce)), 0);
    assert_eq!(session.diagnostics().len(), 1);
    Ok(())
}

#[test]
fn host_loop_streams_until_release() -> TestResult {
    let config = SessionConfig::default().with_sensitivity(0.5);
    let (mut session, handle) = build(two_devices(), config.clone());
    session.bring_up()?;

    let mut controller = ForceController::from_config(&config);
    for step in 0..60 {
        controller.set_force(f64::from(step) * 100.0);
        controller.tick(&mut session);
    }
    // One zero push from provisioning plus one per tick.
    assert_eq!(handle.call_count(NativeOp::UpdateConstantForce), 61);
    assert_eq!(handle.last_magnitude(), Some(2950));

    session.release();
    assert!(!controller.tick(&mut session));
    assert_eq!(handle.call_count(NativeOp::UpdateConstantForce), 61);
    Ok(())
}
