//! Output formatting for CLI responses

use anyhow::{Error, Result};
use colored::*;
use forcelink_session::SessionConfig;
use serde_json::json;

use crate::commands::devices::DeviceReport;
use crate::commands::run::RunSummary;
use crate::error::CliError;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": error_type_name(error)
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to format error as JSON: {}", e),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

fn error_type_name(error: &Error) -> &'static str {
    match error.downcast_ref::<CliError>() {
        Some(CliError::DeviceNotFound(_)) => "DeviceNotFound",
        Some(CliError::InvalidConfiguration(_)) => "InvalidConfiguration",
        Some(CliError::Config(_)) => "Config",
        Some(CliError::Session(_)) => "Session",
        None => "Unknown",
    }
}

/// Print discovered devices in specified format
pub fn print_devices(devices: &[DeviceReport], json: bool) {
    if json {
        let output = json!({
            "success": true,
            "devices": devices
        });
        match serde_json::to_string_pretty(&output) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("Failed to format device list as JSON: {}", e),
        }
        return;
    }

    if devices.is_empty() {
        println!("{}", "No devices found".yellow());
        return;
    }

    println!("{}", "Force Feedback Devices:".bold());
    for device in devices {
        println!(
            "  {} {} ({})",
            "●".green(),
            device.descriptor.label().bold(),
            device.descriptor.instance_id.dimmed()
        );
        if !device.descriptor.product_id.is_empty() {
            println!("    Product: {}", device.descriptor.product_id);
        }
        if let Some(axes) = &device.axes {
            if axes.is_empty() {
                println!("    Axes: {}", "none".yellow());
            }
            for axis in axes {
                println!(
                    "    Axis {}: {} (offset {})",
                    axis.axis_index, axis.name, axis.offset
                );
            }
        }
    }
}

/// Print a session config as YAML, or as JSON when requested
pub fn print_config(config: &SessionConfig, json: bool) -> Result<()> {
    let rendered = if json {
        config.to_json_string()?
    } else {
        config.to_yaml_string()?
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

/// Print the outcome of a host loop run
pub fn print_run_summary(summary: &RunSummary, json: bool) {
    if json {
        let output = json!({
            "success": true,
            "run": summary
        });
        match serde_json::to_string_pretty(&output) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("Failed to format run summary as JSON: {}", e),
        }
        return;
    }

    println!(
        "{} {} ({})",
        "Ran".bold(),
        summary.device.bold(),
        summary.instance_id.dimmed()
    );
    println!("  Axes: {}", summary.axes);
    println!("  Ticks: {}", summary.ticks);
    println!("  Force updates: {}", summary.updates);
    println!("  Peak magnitude: {}", summary.peak_magnitude);
    match summary.last_magnitude {
        Some(magnitude) => println!("  Last magnitude: {}", magnitude),
        None => println!("  Last magnitude: {}", "none".dimmed()),
    }
    println!("  Final phase: {}", summary.phase);

    if summary.reports.is_empty() {
        println!("  {} no errors reported", "✓".green());
    } else {
        println!("  {} {} error(s) reported:", "⚠".yellow(), summary.reports.len());
        for report in &summary.reports {
            println!("    {}", report);
        }
    }
}
