//! Command implementations for ffbctl

pub mod config;
pub mod devices;
pub mod run;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use forcelink_errors::FfbError;
use forcelink_native::DeviceDescriptor;
use forcelink_native::sim::{SimDevice, SimDriver};
use forcelink_session::{EffectSession, RecordingDiagnostics};

use crate::error::CliError;

/// Which simulated hardware the session talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SimScenario {
    /// A single-axis wheel and a two-axis joystick
    #[default]
    Standard,
    /// No FFB devices attached
    Empty,
    /// The native FFB runtime is not installed
    Unavailable,
}

impl SimScenario {
    /// Builds the scenario's driver. Only call counts are kept, so a long
    /// `run` stays in constant memory.
    pub fn driver(self) -> SimDriver {
        let driver = match self {
            SimScenario::Standard => SimDriver::new()
                .with_device(
                    SimDevice::new(
                        DeviceDescriptor::new(
                            "{6F1D2B60-D5A0-11CF-BFC7-444553540000}",
                            "Sim Racing Wheel",
                        )
                        .with_product_id("{C29B046D-0000-0000-0000-504944564944}"),
                    )
                    .with_axis("X Axis"),
                )
                .with_device(SimDevice::joystick(
                    "{6F1D2B61-D5A0-11CF-BFC7-444553540000}",
                    "Sim Force Stick",
                )),
            SimScenario::Empty => SimDriver::new(),
            SimScenario::Unavailable => SimDriver::unavailable(),
        };
        driver.without_call_log()
    }
}

/// Session type every command drives.
pub type HostSession = EffectSession<SimDriver, RecordingDiagnostics>;

/// Starts the subsystem, turning a failed start into the reported error.
pub fn start_session(session: &mut HostSession) -> Result<(), CliError> {
    if session.start() {
        return Ok(());
    }
    let err = session
        .diagnostics()
        .reports()
        .last()
        .cloned()
        .unwrap_or(FfbError::Unavailable);
    Err(CliError::Session(err))
}

/// Shape of the logical force signal fed to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SignalKind {
    /// Constant amplitude
    #[default]
    Constant,
    /// 1 Hz sine wave
    Sine,
    /// Zero for the first half second, then full amplitude
    Step,
}

impl SignalKind {
    /// Signal value at `tick` for a loop running at `rate_hz`.
    pub fn sample(self, tick: u64, rate_hz: f64, amplitude: f64) -> f64 {
        let seconds = tick as f64 / rate_hz;
        match self {
            SignalKind::Constant => amplitude,
            SignalKind::Sine => amplitude * (std::f64::consts::TAU * seconds).sin(),
            SignalKind::Step => {
                if seconds < 0.5 {
                    0.0
                } else {
                    amplitude
                }
            }
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Session config file (.yaml, .yml or .json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Instance id of the device to acquire (default: first discovered)
    #[arg(short, long)]
    pub device: Option<String>,

    /// Number of host ticks to run
    #[arg(short, long, default_value_t = 100)]
    pub ticks: u64,

    /// Host tick rate in Hz
    #[arg(long, default_value_t = 100.0)]
    pub rate_hz: f64,

    /// Logical force signal shape
    #[arg(long, value_enum, default_value_t = SignalKind::Constant)]
    pub signal: SignalKind,

    /// Signal amplitude in logical force units
    #[arg(long, default_value_t = 5000.0, allow_negative_numbers = true)]
    pub amplitude: f64,

    /// Direction in [-1, 1] applied to every axis
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub direction: f64,

    /// Constant-force gain in percent
    #[arg(long)]
    pub gain: Option<f32>,
}
