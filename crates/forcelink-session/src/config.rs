//! Session configuration
//!
//! A [`SessionConfig`] is read once when a session is built. It can be
//! loaded from YAML or JSON; missing fields take their defaults.

use std::path::{Path, PathBuf};

use forcelink_mapping::RangeMap;
use serde::{Deserialize, Serialize};

/// Failure to load or validate a [`SessionConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported config format: {} (expected .yaml, .yml or .json)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("sensitivity must be finite and non-negative, got {0}")]
    InvalidSensitivity(f64),
}

/// Behaviour switches and tuning for an effect session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Run [`enable_force_feedback`](crate::EffectSession::enable_force_feedback)
    /// from [`bring_up`](crate::EffectSession::bring_up).
    pub enable_on_start: bool,
    /// Acquire the first discovered device during bring-up.
    pub auto_select_first_device: bool,
    /// Turn the device's built-in auto-centering spring off on acquisition.
    pub disable_auto_center: bool,
    /// Provision a constant-force effect on acquisition.
    pub enable_constant_force: bool,
    /// Provision a spring effect on acquisition.
    pub enable_spring: bool,
    /// Multiplier applied to the logical force signal each tick.
    pub sensitivity: f64,
    /// Optional mapping applied to the logical force before `sensitivity`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal_map: Option<RangeMap>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            enable_on_start: true,
            auto_select_first_device: true,
            disable_auto_center: true,
            enable_constant_force: true,
            enable_spring: false,
            sensitivity: 1.0,
            signal_map: None,
        }
    }
}

impl SessionConfig {
    /// Parses and validates a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] on malformed input and
    /// [`ConfigError::InvalidSensitivity`] when validation fails.
    pub fn from_yaml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] on malformed input and
    /// [`ConfigError::InvalidSensitivity`] when validation fails.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config file, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::UnsupportedFormat`] for unknown extensions, and the
    /// parse/validation errors of the matching `from_*_str`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Self, ConfigError> = match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str,
            Some("json") => Self::from_json_str,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse(&contents)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSensitivity`] for a NaN, infinite or
    /// negative sensitivity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sensitivity.is_finite() || self.sensitivity < 0.0 {
            return Err(ConfigError::InvalidSensitivity(self.sensitivity));
        }
        Ok(())
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_enable_on_start(mut self, enabled: bool) -> Self {
        self.enable_on_start = enabled;
        self
    }

    pub fn with_auto_select_first_device(mut self, enabled: bool) -> Self {
        self.auto_select_first_device = enabled;
        self
    }

    pub fn with_disable_auto_center(mut self, disabled: bool) -> Self {
        self.disable_auto_center = disabled;
        self
    }

    pub fn with_constant_force(mut self, enabled: bool) -> Self {
        self.enable_constant_force = enabled;
        self
    }

    pub fn with_spring(mut self, enabled: bool) -> Self {
        self.enable_spring = enabled;
        self
    }

    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn with_signal_map(mut self, map: RangeMap) -> Self {
        self.signal_map = Some(map);
        self
    }
}
