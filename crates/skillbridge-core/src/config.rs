// ── Runtime bridge configuration ──
//
// Describes which catalog and which collaborators a `Bridge` is wired to.
// Core never reads config files; the CLI builds a `BridgeConfig` from
// `skillbridge-config` and hands it in.

use std::path::PathBuf;
use std::sync::Arc;

use crate::catalog::ApplianceCatalog;
use crate::devices::{FixedReading, ReadingStore, SimulatedThermostat, ThermostatState};
use crate::error::CoreError;
use crate::ports::{DeviceControl, EnvironmentSensor};

/// Where the appliance catalog comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogSource {
    /// The built-in single-thermostat catalog.
    #[default]
    Sample,
    /// A JSON array of legacy-syntax appliances.
    File(PathBuf),
}

/// Where ambient temperature readings come from.
#[derive(Debug, Clone, PartialEq)]
pub enum SensorSource {
    Fixed { celsius: f64 },
    Store { path: PathBuf, partition: String },
}

impl Default for SensorSource {
    fn default() -> Self {
        Self::Fixed { celsius: 20.0 }
    }
}

/// Simulated device settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceSettings {
    /// Persist device state here between runs.
    pub state_file: Option<PathBuf>,
    /// State used when no state file exists yet.
    pub initial: ThermostatState,
}

/// Everything needed to assemble a [`Bridge`](crate::Bridge).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BridgeConfig {
    pub catalog: CatalogSource,
    pub sensor: SensorSource,
    pub device: DeviceSettings,
}

impl CatalogSource {
    pub fn load(&self) -> Result<ApplianceCatalog, CoreError> {
        match self {
            Self::Sample => Ok(ApplianceCatalog::sample()),
            Self::File(path) => ApplianceCatalog::from_json_file(path),
        }
    }
}

impl SensorSource {
    pub fn build(&self) -> Arc<dyn EnvironmentSensor> {
        match self {
            Self::Fixed { celsius } => Arc::new(FixedReading(*celsius)),
            Self::Store { path, partition } => {
                Arc::new(ReadingStore::new(path.clone(), partition.clone()))
            }
        }
    }
}

impl DeviceSettings {
    pub fn build(&self) -> Result<Arc<dyn DeviceControl>, CoreError> {
        let device = match &self.state_file {
            Some(path) => SimulatedThermostat::with_state_file(path, self.initial)?,
            None => SimulatedThermostat::new(self.initial),
        };
        Ok(Arc::new(device))
    }
}
