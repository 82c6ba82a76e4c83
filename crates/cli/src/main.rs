//! ffbctl - Force Feedback Host CLI
//!
//! Drives a forcelink effect session against simulated hardware: lists
//! devices, runs a paced host loop and validates session configs.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod completion;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{RunArgs, SimScenario};
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "ffbctl")]
#[command(about = "Force Feedback Host CLI - Discover devices and drive force feedback effects")]
#[command(version)]
#[command(long_about = "
ffbctl hosts a force feedback effect session the way a game loop would.
It discovers FFB devices, acquires one, provisions its constant-force and
spring effects and pushes a logical force signal at a fixed tick rate.

Use --json flag for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Simulated hardware scenario (for testing)
    #[arg(
        long,
        global = true,
        value_enum,
        env = "FFBCTL_SIM",
        default_value_t = SimScenario::Standard,
        hide = true
    )]
    sim: SimScenario,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List force feedback devices
    Devices {
        /// Acquire each device and list its force axes
        #[arg(short, long)]
        detailed: bool,
    },

    /// Run a paced host loop against a device
    Run(RunArgs),

    /// Print the effective session config
    Config {
        /// Config file to validate (.yaml, .yml or .json)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Logs go to stderr so --json stdout stays parseable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("ffbctl={log_level},forcelink_session={log_level}").into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(exit_code)
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Devices { detailed } => commands::devices::execute(cli.sim, cli.json, *detailed),
        Commands::Run(args) => commands::run::execute(args, cli.sim, cli.json),
        Commands::Config { file } => commands::config::execute(file.as_deref(), cli.json),
        Commands::Completion { shell } => {
            completion::generate_completion(*shell);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::SignalKind;
    use clap::Parser;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    // --- Global flag parsing ---

    #[test]
    fn parse_devices_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["ffbctl", "devices"])?;
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
        assert!(matches!(cli.command, Commands::Devices { detailed: false }));
        Ok(())
    }

    #[test]
    fn parse_global_json_flag_before_subcommand() -> TestResult {
        let cli = Cli::try_parse_from(["ffbctl", "--json", "devices"])?;
        assert!(cli.json);
        Ok(())
    }

    #[test]
    fn parse_global_json_flag_after_subcommand() -> TestResult {
        let cli = Cli::try_parse_from(["ffbctl", "devices", "--json"])?;
        assert!(cli.json);
        Ok(())
    }

    #[test]
    fn parse_verbose_levels() -> TestResult {
        let cli1 = Cli::try_parse_from(["ffbctl", "-v", "devices"])?;
        assert_eq!(cli1.verbose, 1);

        let cli3 = Cli::try_parse_from(["ffbctl", "-vvv", "devices"])?;
        assert_eq!(cli3.verbose, 3);
        Ok(())
    }

    #[test]
    fn parse_sim_scenario() -> TestResult {
        let cli = Cli::try_parse_from(["ffbctl", "--sim", "empty", "devices"])?;
        assert_eq!(cli.sim, SimScenario::Empty);
        Ok(())
    }

    // --- Run ---

    #[test]
    fn parse_run_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["ffbctl", "run"])?;
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.ticks, 100);
                assert_eq!(args.signal, SignalKind::Constant);
                assert!(args.device.is_none());
                assert!(args.gain.is_none());
            }
            _ => return Err("expected run".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_run_negative_direction() -> TestResult {
        let cli = Cli::try_parse_from([
            "ffbctl",
            "run",
            "--direction",
            "-0.5",
            "--signal",
            "sine",
            "-t",
            "10",
        ])?;
        match cli.command {
            Commands::Run(args) => {
                assert!((args.direction + 0.5).abs() < f64::EPSILON);
                assert_eq!(args.signal, SignalKind::Sine);
                assert_eq!(args.ticks, 10);
            }
            _ => return Err("expected run".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_run_rejects_unknown_signal() {
        let result = Cli::try_parse_from(["ffbctl", "run", "--signal", "square"]);
        assert!(result.is_err());
    }

    // --- Config / completion ---

    #[test]
    fn parse_config_file() -> TestResult {
        let cli = Cli::try_parse_from(["ffbctl", "config", "--file", "session.yaml"])?;
        match cli.command {
            Commands::Config { file } => {
                assert_eq!(file, Some(PathBuf::from("session.yaml")));
            }
            _ => return Err("expected config".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_completion_shell() -> TestResult {
        let cli = Cli::try_parse_from(["ffbctl", "completion", "bash"])?;
        assert!(matches!(
            cli.command,
            Commands::Completion {
                shell: clap_complete::Shell::Bash
            }
        ));
        Ok(())
    }

    #[test]
    fn missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["ffbctl"]).is_err());
    }
}
