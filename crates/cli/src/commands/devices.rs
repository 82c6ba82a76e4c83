//! `ffbctl devices`

use anyhow::Result;
use forcelink_native::{AxisDescriptor, DeviceDescriptor};
use forcelink_session::{EffectSession, RecordingDiagnostics, SessionConfig};
use serde::Serialize;
use tracing::debug;

use crate::commands::{SimScenario, start_session};
use crate::error::CliError;
use crate::output;

/// One discovered device, with its axes when probed.
#[derive(Debug, Serialize)]
pub struct DeviceReport {
    #[serde(flatten)]
    pub descriptor: DeviceDescriptor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axes: Option<Vec<AxisDescriptor>>,
}

pub fn execute(scenario: SimScenario, json: bool, detailed: bool) -> Result<()> {
    // Probing only; no effects are created on the devices we visit.
    let config = SessionConfig::default()
        .with_auto_select_first_device(false)
        .with_constant_force(false)
        .with_spring(false)
        .with_disable_auto_center(false);
    let mut session = EffectSession::with_diagnostics(
        scenario.driver(),
        config,
        RecordingDiagnostics::new().echoing(),
    );
    start_session(&mut session)?;

    let devices: Vec<DeviceDescriptor> = session
        .discover_devices()
        .map_err(CliError::from)?
        .iter()
        .cloned()
        .collect();

    let mut reports = Vec::with_capacity(devices.len());
    for descriptor in devices {
        let axes = if detailed {
            debug!(instance_id = %descriptor.instance_id, "probing axes");
            session
                .acquire_device(&descriptor.instance_id)
                .map_err(CliError::from)?;
            Some(session.axes().to_vec())
        } else {
            None
        };
        reports.push(DeviceReport { descriptor, axes });
    }
    session.release();

    output::print_devices(&reports, json);
    Ok(())
}
