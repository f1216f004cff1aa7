//! Driver configuration management

use crate::transmitter::{DEFAULT_TIMEOUT, TransmitSettings};
use anyhow::{Context, Result, anyhow};
use protocol::DeviceIdentity;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DriverConfig {
    #[serde(default)]
    pub driver: DriverSettings,
    #[serde(default)]
    pub device: DeviceSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverSettings {
    #[serde(default = "DriverSettings::default_log_level")]
    pub log_level: String,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
        }
    }
}

impl DriverSettings {
    fn default_log_level() -> String {
        "info".to_string()
    }
}

/// Target device settings
///
/// # Example Configuration
/// ```toml
/// [device]
/// identity = "0x0483:0x5703"
/// timeout_ms = 1000
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceSettings {
    /// USB identity as VID:PID, e.g. "0x0483:0x5703"
    #[serde(default)]
    pub identity: DeviceIdentity,
    /// Bulk write timeout in milliseconds
    #[serde(default = "DeviceSettings::default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            identity: DeviceIdentity::MOOER_RADAR,
            timeout_ms: Self::default_timeout_ms(),
        }
    }
}

impl DeviceSettings {
    fn default_timeout_ms() -> u64 {
        DEFAULT_TIMEOUT.as_millis() as u64
    }
}

/// Where the active configuration came from
#[derive(Debug)]
pub enum ConfigSource {
    /// Read from this file
    File(PathBuf),
    /// No usable file was found, built-in defaults are in effect
    Defaults(anyhow::Error),
}

impl ConfigSource {
    /// Report the source; only meaningful once logging is installed
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => {
                tracing::info!("Loaded configuration from: {}", path.display())
            }
            ConfigSource::Defaults(e) => {
                tracing::warn!("Failed to load config: {:#}, using defaults", e)
            }
        }
    }
}

impl DriverConfig {
    /// Load configuration from the specified path
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::locate(Self::candidates())?,
        };
        Self::read(&config_path)
    }

    /// Parse and validate a TOML document
    pub fn parse(content: &str) -> Result<Self> {
        let config: DriverConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the standard locations or fall back to defaults
    ///
    /// Nothing is logged here: the returned [`ConfigSource`] is reported by
    /// the caller after the configured log level has been applied.
    pub fn load_or_default() -> (Self, ConfigSource) {
        Self::load_first(Self::candidates())
    }

    fn load_first(candidates: Vec<PathBuf>) -> (Self, ConfigSource) {
        let loaded =
            Self::locate(candidates).and_then(|path| Ok((Self::read(&path)?, path)));

        match loaded {
            Ok((config, path)) => (config, ConfigSource::File(path)),
            Err(e) => (Self::default(), ConfigSource::Defaults(e)),
        }
    }

    // Standard locations, in lookup order
    fn candidates() -> Vec<PathBuf> {
        vec![
            Self::default_path(),
            PathBuf::from("/etc/mooer-radar/driver.toml"),
        ]
    }

    fn locate(candidates: Vec<PathBuf>) -> Result<PathBuf> {
        candidates
            .into_iter()
            .find(|p| p.exists())
            .ok_or_else(|| anyhow!("No configuration file found"))
    }

    fn read(config_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
    }

    /// Save configuration to the specified path
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!("Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("mooer-radar").join("driver.toml")
        } else {
            PathBuf::from(".config/mooer-radar/driver.toml")
        }
    }

    /// Transmitter settings described by this configuration
    pub fn transmit_settings(&self) -> TransmitSettings {
        TransmitSettings {
            identity: self.device.identity,
            timeout: Duration::from_millis(self.device.timeout_ms),
        }
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.driver.log_level.as_str()) {
            return Err(anyhow!(
                "Invalid log level '{}', must be one of: {}",
                self.driver.log_level,
                valid_levels.join(", ")
            ));
        }

        if self.device.timeout_ms == 0 {
            return Err(anyhow!("timeout_ms must be greater than zero"));
        }

        Ok(())
    }
}

/// Load configuration from a user-supplied path, expanding `~`
pub fn load_config(path: &str) -> Result<(DriverConfig, ConfigSource)> {
    let path_buf = PathBuf::from(shellexpand::tilde(path).as_ref());
    let config = DriverConfig::load(Some(path_buf.clone()))?;
    Ok((config, ConfigSource::File(path_buf)))
}
