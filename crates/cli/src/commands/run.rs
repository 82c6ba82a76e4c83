//! `ffbctl run`: a fixed-rate host loop driving the force controller

use std::time::{Duration, Instant};

use anyhow::Result;
use forcelink_errors::NativeOp;
use forcelink_ffb::{EffectKind, direction_weight};
use forcelink_session::{EffectSession, ForceController, RecordingDiagnostics, SessionConfig};
use serde::Serialize;
use tracing::{debug, info};

use crate::commands::{RunArgs, SimScenario, start_session};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub device: String,
    pub instance_id: String,
    pub axes: usize,
    pub ticks: u64,
    pub updates: usize,
    pub peak_magnitude: i32,
    pub last_magnitude: Option<i32>,
    pub reports: Vec<String>,
    pub phase: String,
}

fn validate(args: &RunArgs) -> Result<(), CliError> {
    if !args.rate_hz.is_finite() || args.rate_hz <= 0.0 {
        return Err(CliError::InvalidConfiguration(format!(
            "rate must be a positive number of Hz, got {}",
            args.rate_hz
        )));
    }
    if !args.amplitude.is_finite() {
        return Err(CliError::InvalidConfiguration(format!(
            "amplitude must be finite, got {}",
            args.amplitude
        )));
    }
    if !args.direction.is_finite() {
        return Err(CliError::InvalidConfiguration(format!(
            "direction must be finite, got {}",
            args.direction
        )));
    }
    Ok(())
}

pub fn execute(args: &RunArgs, scenario: SimScenario, json: bool) -> Result<()> {
    validate(args)?;
    let config = match &args.config {
        Some(path) => SessionConfig::load(path).map_err(CliError::from)?,
        None => SessionConfig::default(),
    };
    let auto_select = args.device.is_none() && config.auto_select_first_device;

    let driver = scenario.driver();
    let handle = driver.handle();
    let mut session = EffectSession::with_diagnostics(
        driver,
        config.clone().with_auto_select_first_device(auto_select),
        RecordingDiagnostics::new().echoing(),
    );
    start_session(&mut session)?;
    session.enable_force_feedback().map_err(CliError::from)?;

    if let Some(id) = &args.device {
        if !session.devices().contains(id) {
            return Err(CliError::DeviceNotFound(id.clone()).into());
        }
        session.acquire_device(id).map_err(CliError::from)?;
    }
    let Some(device) = session.active_device().cloned() else {
        return Err(CliError::DeviceNotFound("no force feedback device attached".into()).into());
    };

    let directions = vec![direction_weight(args.direction); session.axes().len()];
    session
        .set_axis_directions(&directions)
        .map_err(CliError::from)?;
    if let Some(gain) = args.gain {
        session.set_effect_gain(EffectKind::ConstantForce, gain);
    }

    let mut controller = ForceController::from_config(&config);
    let updates_before = handle.call_count(NativeOp::UpdateConstantForce);
    let period = Duration::try_from_secs_f64(1.0 / args.rate_hz).map_err(|e| {
        CliError::InvalidConfiguration(format!("rate {} Hz is out of range: {e}", args.rate_hz))
    })?;
    let mut deadline = Instant::now();
    let mut peak = 0i32;
    info!(
        device = %device.label(),
        ticks = args.ticks,
        rate_hz = args.rate_hz,
        "starting host loop"
    );

    for tick in 0..args.ticks {
        controller.set_force(args.signal.sample(tick, args.rate_hz, args.amplitude));
        if controller.tick(&mut session) {
            let magnitude = controller.magnitude();
            if magnitude.unsigned_abs() > peak.unsigned_abs() {
                peak = magnitude;
            }
        }
        deadline += period;
        if let Some(wait) = deadline.checked_duration_since(Instant::now()) {
            std::thread::sleep(wait);
        }
    }

    let updates = handle
        .call_count(NativeOp::UpdateConstantForce)
        .saturating_sub(updates_before);
    let last_magnitude = handle.last_magnitude();
    debug!(updates, "host loop finished");
    session.release();

    let summary = RunSummary {
        device: device.label().to_string(),
        instance_id: device.instance_id.clone(),
        axes: directions.len(),
        ticks: args.ticks,
        updates,
        peak_magnitude: peak,
        last_magnitude,
        reports: session
            .diagnostics()
            .reports()
            .iter()
            .map(ToString::to_string)
            .collect(),
        phase: session.phase().to_string(),
    };
    output::print_run_summary(&summary, json);
    Ok(())
}
