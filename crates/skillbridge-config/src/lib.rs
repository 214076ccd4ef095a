//! Configuration for skillbridge hosts.
//!
//! TOML file + environment layering via figment, and translation to
//! `skillbridge_core::BridgeConfig`. The CLI adds `--config` handling on top.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use skillbridge_core::devices::ThermostatState;
use skillbridge_core::{
    BridgeConfig, CatalogSource, DeviceSettings, PowerState, SensorSource, ThermostatMode,
};

/// Environment variable prefix; nested keys are separated by `__`.
pub const ENV_PREFIX: &str = "SKILLBRIDGE_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub catalog: CatalogSection,

    #[serde(default)]
    pub sensor: SensorSection,

    #[serde(default)]
    pub device: DeviceSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    /// Output format used when `--output` is not given.
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
        }
    }
}

fn default_output() -> String {
    "json".into()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogSection {
    /// JSON appliance list in legacy discovery syntax. Unset means the
    /// built-in sample catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SensorSection {
    /// Reading store file (`{"<partition>": {"temperature": ..}}`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<PathBuf>,

    #[serde(default = "default_partition")]
    pub partition: String,

    /// Constant reading used when no store is configured.
    #[serde(default = "default_celsius")]
    pub fixed_celsius: f64,
}

impl Default for SensorSection {
    fn default() -> Self {
        Self {
            store: None,
            partition: default_partition(),
            fixed_celsius: default_celsius(),
        }
    }
}

fn default_partition() -> String {
    "default".into()
}
fn default_celsius() -> f64 {
    20.0
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DeviceSection {
    /// Persist simulated device state here between runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_file: Option<PathBuf>,

    #[serde(default = "default_celsius")]
    pub initial_celsius: f64,

    #[serde(default)]
    pub initial_mode: ThermostatMode,
}

impl Default for DeviceSection {
    fn default() -> Self {
        Self {
            state_file: None,
            initial_celsius: default_celsius(),
            initial_mode: ThermostatMode::default(),
        }
    }
}

// ── Translation to core ─────────────────────────────────────────────

impl Config {
    /// Validate and build the core `BridgeConfig`.
    pub fn to_bridge_config(&self) -> Result<BridgeConfig, ConfigError> {
        require_finite("sensor.fixed_celsius", self.sensor.fixed_celsius)?;
        require_finite("device.initial_celsius", self.device.initial_celsius)?;

        let catalog = self
            .catalog
            .path
            .clone()
            .map_or(CatalogSource::Sample, CatalogSource::File);

        let sensor = match &self.sensor.store {
            Some(path) => {
                if self.sensor.partition.trim().is_empty() {
                    return Err(ConfigError::Validation {
                        field: "sensor.partition".into(),
                        reason: "must not be empty when sensor.store is set".into(),
                    });
                }
                SensorSource::Store {
                    path: path.clone(),
                    partition: self.sensor.partition.clone(),
                }
            }
            None => SensorSource::Fixed {
                celsius: self.sensor.fixed_celsius,
            },
        };

        let device = DeviceSettings {
            state_file: self.device.state_file.clone(),
            initial: ThermostatState {
                power: PowerState::Off,
                target_celsius: self.device.initial_celsius,
                mode: self.device.initial_mode,
            },
        };

        Ok(BridgeConfig {
            catalog,
            sensor,
            device,
        })
    }
}

fn require_finite(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Validation {
            field: field.into(),
            reason: format!("expected a finite temperature, got {value}"),
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("rs", "skillbridge", "skillbridge").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("skillbridge");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// The provider stack: defaults, then the TOML file, then environment.
pub fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load from an explicit path (missing files fall back to defaults).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = figment_for(path).extract()?;
    Ok(config)
}

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn defaults_use_sample_catalog_and_fixed_reading() {
        let bridge = Config::default().to_bridge_config().unwrap();
        assert_eq!(bridge.catalog, CatalogSource::Sample);
        assert_eq!(bridge.sensor, SensorSource::Fixed { celsius: 20.0 });
        assert_eq!(bridge.device.initial.mode, ThermostatMode::Cool);
        assert!(bridge.device.state_file.is_none());
    }

    #[test]
    fn file_then_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [sensor]
                store = "readings.json"
                partition = "living"

                [device]
                initial_mode = "HEAT"
                "#,
            )?;
            jail.set_env("SKILLBRIDGE_SENSOR__PARTITION", "attic");
            jail.set_env("SKILLBRIDGE_DEVICE__INITIAL_CELSIUS", "17.5");

            let config = load_config_from(Path::new("config.toml")).map_err(|e| e.to_string())?;
            assert_eq!(config.sensor.partition, "attic");
            assert_eq!(config.device.initial_mode, ThermostatMode::Heat);
            assert!((config.device.initial_celsius - 17.5).abs() < f64::EPSILON);

            let bridge = config.to_bridge_config().map_err(|e| e.to_string())?;
            assert_eq!(
                bridge.sensor,
                SensorSource::Store {
                    path: PathBuf::from("readings.json"),
                    partition: "attic".into(),
                }
            );
            Ok(())
        });
    }

    #[test]
    fn empty_partition_with_store_is_rejected() {
        let mut config = Config::default();
        config.sensor.store = Some("readings.json".into());
        config.sensor.partition = "  ".into();
        let err = config.to_bridge_config().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "sensor.partition"));
    }

    #[test]
    fn non_finite_temperatures_are_rejected() {
        let mut config = Config::default();
        config.device.initial_celsius = f64::INFINITY;
        assert!(config.to_bridge_config().is_err());
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");
        let mut config = Config::default();
        config.catalog.path = Some("/etc/skillbridge/catalog.json".into());
        config.device.state_file = Some("/var/lib/skillbridge/device.json".into());
        save_config_to(&config, &path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("[catalog]"));
        let loaded: Config = toml::from_str(&raw).unwrap();
        assert_eq!(loaded, config);
    }
}
