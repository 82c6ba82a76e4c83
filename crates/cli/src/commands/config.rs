//! `ffbctl config`

use std::path::Path;

use anyhow::Result;
use forcelink_session::SessionConfig;

use crate::error::CliError;
use crate::output;

/// Prints `path` after validation, or the default config.
pub fn execute(path: Option<&Path>, json: bool) -> Result<()> {
    let config = match path {
        Some(path) => SessionConfig::load(path).map_err(CliError::from)?,
        None => SessionConfig::default(),
    };
    output::print_config(&config, json)
}
