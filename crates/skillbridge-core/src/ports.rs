//! Port traits: the boundary between the directive translator and the
//! hardware it drives.
//!
//! ```text
//!   Bridge ──▶ Dispatcher ──▶ DeviceControl / EnvironmentSensor ──▶ adapter
//! ```
//!
//! Adapters (IR remotes, simulated devices, reading stores) implement these
//! traits and are injected into [`Dispatcher`](crate::dispatch::Dispatcher).
//! Nothing in the core reaches a collaborator through global state.
//!
//! Every method is synchronous and may fail with a [`DeviceError`]. Methods
//! take `&self`; adapters that hold mutable state use interior mutability,
//! since one device instance is shared by every concurrent request.

use thiserror::Error;

use crate::model::{PowerState, ThermostatMode};

/// Failure talking to a device or sensor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeviceError {
    #[error("device unreachable: {0}")]
    Unreachable(String),

    #[error("no reading stored for partition '{partition}'")]
    NoReading { partition: String },

    #[error("device returned invalid data: {0}")]
    InvalidData(String),

    #[error("device I/O failed: {0}")]
    Io(String),
}

impl From<std::io::Error> for DeviceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

// ───────────────────────────────────────────────────────────────
// Device control port (domain → device)
// ───────────────────────────────────────────────────────────────

/// Live state and commands of the one physical thermostat/AC unit.
pub trait DeviceControl: Send + Sync {
    fn set_power_on(&self) -> Result<(), DeviceError>;

    fn set_power_off(&self) -> Result<(), DeviceError>;

    fn power(&self) -> Result<PowerState, DeviceError>;

    /// Set the target temperature, in Celsius.
    fn set_temperature(&self, celsius: f64) -> Result<(), DeviceError>;

    /// Current target temperature, in Celsius.
    fn temperature(&self) -> Result<f64, DeviceError>;

    fn set_mode_heat(&self) -> Result<(), DeviceError>;

    fn set_mode_cool(&self) -> Result<(), DeviceError>;

    fn mode(&self) -> Result<ThermostatMode, DeviceError>;
}

// ───────────────────────────────────────────────────────────────
// Environment sensor port (sensor → domain)
// ───────────────────────────────────────────────────────────────

/// Ambient temperature source.
pub trait EnvironmentSensor: Send + Sync {
    /// Most recent stored reading for the configured partition, in Celsius.
    fn temperature(&self) -> Result<f64, DeviceError>;
}

// ───────────────────────────────────────────────────────────────
// Authorization grant port (domain → token service)
// ───────────────────────────────────────────────────────────────

/// Receives authorization grants from `Alexa.Authorization/AcceptGrant`.
pub trait GrantRecorder: Send + Sync {
    fn record(&self, grant: &crate::directive::Grant) -> Result<(), DeviceError>;
}
