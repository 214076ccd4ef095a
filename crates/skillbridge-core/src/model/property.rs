// ── Device state and property readings ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::endpoint::Interface;

/// Power state reported under `Alexa.PowerController/powerState`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PowerState {
    On,
    #[default]
    Off,
}

/// Thermostat modes the controlled device understands.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThermostatMode {
    Heat,
    #[default]
    Cool,
}

/// Endpoint liveness reported under `Alexa.EndpointHealth/connectivity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Connectivity {
    Ok,
    Unreachable,
}

impl Connectivity {
    pub fn from_reachable(reachable: bool) -> Self {
        if reachable { Self::Ok } else { Self::Unreachable }
    }
}

/// Temperature scale on inbound setpoints. State is kept in Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemperatureScale {
    #[default]
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureScale {
    /// Convert an absolute temperature on this scale into Celsius.
    pub fn to_celsius(self, value: f64) -> f64 {
        match self {
            Self::Celsius => value,
            Self::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            Self::Kelvin => value - 273.15,
        }
    }

    /// Convert a temperature *difference* on this scale into Celsius.
    pub fn delta_to_celsius(self, delta: f64) -> f64 {
        match self {
            Self::Celsius | Self::Kelvin => delta,
            Self::Fahrenheit => delta * 5.0 / 9.0,
        }
    }
}

// ── Readings ─────────────────────────────────────────────────────────

pub const POWER_STATE: &str = "powerState";
pub const THERMOSTAT_MODE: &str = "thermostatMode";
pub const TARGET_SETPOINT: &str = "targetSetpoint";
pub const TEMPERATURE: &str = "temperature";
pub const CONNECTIVITY: &str = "connectivity";

/// A value read from a collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ReadingValue {
    Power(PowerState),
    Mode(ThermostatMode),
    /// Always Celsius.
    Temperature(f64),
    Connectivity(Connectivity),
}

/// One property read after a directive ran, not yet timestamped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyReading {
    pub interface: Interface,
    pub name: &'static str,
    pub value: ReadingValue,
}

impl PropertyReading {
    pub fn power_state(state: PowerState) -> Self {
        Self {
            interface: Interface::PowerController,
            name: POWER_STATE,
            value: ReadingValue::Power(state),
        }
    }

    pub fn thermostat_mode(mode: ThermostatMode) -> Self {
        Self {
            interface: Interface::ThermostatController,
            name: THERMOSTAT_MODE,
            value: ReadingValue::Mode(mode),
        }
    }

    pub fn target_setpoint(celsius: f64) -> Self {
        Self {
            interface: Interface::ThermostatController,
            name: TARGET_SETPOINT,
            value: ReadingValue::Temperature(celsius),
        }
    }

    pub fn temperature(celsius: f64) -> Self {
        Self {
            interface: Interface::TemperatureSensor,
            name: TEMPERATURE,
            value: ReadingValue::Temperature(celsius),
        }
    }

    pub fn connectivity(connectivity: Connectivity) -> Self {
        Self {
            interface: Interface::EndpointHealth,
            name: CONNECTIVITY,
            value: ReadingValue::Connectivity(connectivity),
        }
    }
}
