// ── Simulated thermostat ──

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::{PowerState, ThermostatMode};
use crate::ports::{DeviceControl, DeviceError};

/// Everything the simulated unit remembers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThermostatState {
    pub power: PowerState,
    pub target_celsius: f64,
    pub mode: ThermostatMode,
}

impl Default for ThermostatState {
    fn default() -> Self {
        Self {
            power: PowerState::Off,
            target_celsius: 20.0,
            mode: ThermostatMode::Cool,
        }
    }
}

/// In-memory `DeviceControl`, optionally persisted after every mutation.
#[derive(Debug)]
pub struct SimulatedThermostat {
    state: Mutex<ThermostatState>,
    state_file: Option<PathBuf>,
}

impl SimulatedThermostat {
    pub fn new(initial: ThermostatState) -> Self {
        Self {
            state: Mutex::new(initial),
            state_file: None,
        }
    }

    /// Load state from `path` if it exists, else start from `initial`.
    /// Subsequent mutations are written back to `path`.
    pub fn with_state_file(path: impl Into<PathBuf>, initial: ThermostatState) -> Result<Self, DeviceError> {
        let path = path.into();
        let state = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                DeviceError::InvalidData(format!("{}: {e}", path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no saved device state, using initial state");
                initial
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            state: Mutex::new(state),
            state_file: Some(path),
        })
    }

    pub fn state_file(&self) -> Option<&Path> {
        self.state_file.as_deref()
    }

    pub fn snapshot(&self) -> ThermostatState {
        *self.lock()
    }

    fn lock(&self) -> MutexGuard<'_, ThermostatState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, f: impl FnOnce(&mut ThermostatState)) -> Result<(), DeviceError> {
        let mut state = self.lock();
        let mut next = *state;
        f(&mut next);
        if let Some(path) = &self.state_file {
            persist(path, &next)?;
        }
        *state = next;
        debug!(?next, "simulated thermostat updated");
        Ok(())
    }
}

impl Default for SimulatedThermostat {
    fn default() -> Self {
        Self::new(ThermostatState::default())
    }
}

fn persist(path: &Path, state: &ThermostatState) -> Result<(), DeviceError> {
    let raw = serde_json::to_string_pretty(state)
        .map_err(|e| DeviceError::InvalidData(e.to_string()))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, raw).map_err(|e| {
        warn!(path = %path.display(), error = %e, "failed to persist device state");
        DeviceError::from(e)
    })
}

impl DeviceControl for SimulatedThermostat {
    fn set_power_on(&self) -> Result<(), DeviceError> {
        self.update(|s| s.power = PowerState::On)
    }

    fn set_power_off(&self) -> Result<(), DeviceError> {
        self.update(|s| s.power = PowerState::Off)
    }

    fn power(&self) -> Result<PowerState, DeviceError> {
        Ok(self.lock().power)
    }

    fn set_temperature(&self, celsius: f64) -> Result<(), DeviceError> {
        if !celsius.is_finite() {
            return Err(DeviceError::InvalidData(format!(
                "refusing non-finite setpoint {celsius}"
            )));
        }
        self.update(|s| s.target_celsius = celsius)
    }

    fn temperature(&self) -> Result<f64, DeviceError> {
        Ok(self.lock().target_celsius)
    }

    fn set_mode_heat(&self) -> Result<(), DeviceError> {
        self.update(|s| s.mode = ThermostatMode::Heat)
    }

    fn set_mode_cool(&self) -> Result<(), DeviceError> {
        self.update(|s| s.mode = ThermostatMode::Cool)
    }

    fn mode(&self) -> Result<ThermostatMode, DeviceError> {
        Ok(self.lock().mode)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn mutations_are_visible() {
        let device = SimulatedThermostat::default();
        device.set_power_on().unwrap();
        device.set_temperature(23.5).unwrap();
        device.set_mode_heat().unwrap();
        assert_eq!(
            device.snapshot(),
            ThermostatState {
                power: PowerState::On,
                target_celsius: 23.5,
                mode: ThermostatMode::Heat,
            }
        );
    }

    #[test]
    fn non_finite_setpoint_is_rejected() {
        let device = SimulatedThermostat::default();
        assert!(matches!(
            device.set_temperature(f64::NAN),
            Err(DeviceError::InvalidData(_))
        ));
        assert!((device.temperature().unwrap() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn state_file_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("device.json");

        let first = SimulatedThermostat::with_state_file(&path, ThermostatState::default()).unwrap();
        first.set_temperature(18.0).unwrap();
        first.set_power_on().unwrap();
        drop(first);

        let second = SimulatedThermostat::with_state_file(&path, ThermostatState::default()).unwrap();
        assert_eq!(second.power().unwrap(), PowerState::On);
        assert!((second.temperature().unwrap() - 18.0).abs() < f64::EPSILON);
    }

    #[test]
    fn corrupt_state_file_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("device.json");
        std::fs::write(&path, "[]").unwrap();
        let err = SimulatedThermostat::with_state_file(&path, ThermostatState::default()).unwrap_err();
        assert!(matches!(err, DeviceError::InvalidData(_)));
    }
}
