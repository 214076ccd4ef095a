//! Test doubles for the collaborator ports.
//!
//! `RecordingDevice` wraps the simulated thermostat and records every
//! command so tests can assert on the exact call history.

#![allow(dead_code, clippy::unwrap_used)]

use std::sync::{Arc, Mutex, mpsc};
use std::time::Duration;

use serde_json::{Value, json};
use skillbridge_core::devices::SimulatedThermostat;
use skillbridge_core::{
    ApplianceCatalog, Bridge, DeviceControl, DeviceError, EnvironmentSensor, PowerState,
    ThermostatMode,
};

// ── Device call record ────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    PowerOn,
    PowerOff,
    SetTemperature(f64),
    ModeHeat,
    ModeCool,
}

// ── RecordingDevice ───────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RecordingDevice {
    inner: SimulatedThermostat,
    calls: Mutex<Vec<DeviceCall>>,
}

impl RecordingDevice {
    pub fn calls(&self) -> Vec<DeviceCall> {
        self.calls.lock().unwrap().clone()
    }

    fn push(&self, call: DeviceCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl DeviceControl for RecordingDevice {
    fn set_power_on(&self) -> Result<(), DeviceError> {
        self.push(DeviceCall::PowerOn);
        self.inner.set_power_on()
    }

    fn set_power_off(&self) -> Result<(), DeviceError> {
        self.push(DeviceCall::PowerOff);
        self.inner.set_power_off()
    }

    fn power(&self) -> Result<PowerState, DeviceError> {
        self.inner.power()
    }

    fn set_temperature(&self, celsius: f64) -> Result<(), DeviceError> {
        self.push(DeviceCall::SetTemperature(celsius));
        self.inner.set_temperature(celsius)
    }

    fn temperature(&self) -> Result<f64, DeviceError> {
        self.inner.temperature()
    }

    fn set_mode_heat(&self) -> Result<(), DeviceError> {
        self.push(DeviceCall::ModeHeat);
        self.inner.set_mode_heat()
    }

    fn set_mode_cool(&self) -> Result<(), DeviceError> {
        self.push(DeviceCall::ModeCool);
        self.inner.set_mode_cool()
    }

    fn mode(&self) -> Result<ThermostatMode, DeviceError> {
        self.inner.mode()
    }
}

// ── SlowPowerOff ──────────────────────────────────────────────

/// Switches off immediately, then holds the call open for `hold` after
/// signalling that it has started.
pub struct SlowPowerOff {
    inner: SimulatedThermostat,
    hold: Duration,
    started: Mutex<Option<mpsc::Sender<()>>>,
}

impl SlowPowerOff {
    pub fn new(hold: Duration) -> (Self, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel();
        let device = Self {
            inner: SimulatedThermostat::default(),
            hold,
            started: Mutex::new(Some(tx)),
        };
        (device, rx)
    }
}

impl DeviceControl for SlowPowerOff {
    fn set_power_on(&self) -> Result<(), DeviceError> {
        self.inner.set_power_on()
    }

    fn set_power_off(&self) -> Result<(), DeviceError> {
        self.inner.set_power_off()?;
        if let Some(tx) = self.started.lock().unwrap().take() {
            tx.send(()).unwrap();
        }
        std::thread::sleep(self.hold);
        Ok(())
    }

    fn power(&self) -> Result<PowerState, DeviceError> {
        self.inner.power()
    }

    fn set_temperature(&self, celsius: f64) -> Result<(), DeviceError> {
        self.inner.set_temperature(celsius)
    }

    fn temperature(&self) -> Result<f64, DeviceError> {
        self.inner.temperature()
    }

    fn set_mode_heat(&self) -> Result<(), DeviceError> {
        self.inner.set_mode_heat()
    }

    fn set_mode_cool(&self) -> Result<(), DeviceError> {
        self.inner.set_mode_cool()
    }

    fn mode(&self) -> Result<ThermostatMode, DeviceError> {
        self.inner.mode()
    }
}

// ── Failing collaborators ─────────────────────────────────────

pub struct UnreachableDevice;

impl DeviceControl for UnreachableDevice {
    fn set_power_on(&self) -> Result<(), DeviceError> {
        Err(DeviceError::Unreachable("ir blaster offline".into()))
    }
    fn set_power_off(&self) -> Result<(), DeviceError> {
        self.set_power_on()
    }
    fn power(&self) -> Result<PowerState, DeviceError> {
        Err(DeviceError::Unreachable("ir blaster offline".into()))
    }
    fn set_temperature(&self, _celsius: f64) -> Result<(), DeviceError> {
        self.set_power_on()
    }
    fn temperature(&self) -> Result<f64, DeviceError> {
        Err(DeviceError::Unreachable("ir blaster offline".into()))
    }
    fn set_mode_heat(&self) -> Result<(), DeviceError> {
        self.set_power_on()
    }
    fn set_mode_cool(&self) -> Result<(), DeviceError> {
        self.set_power_on()
    }
    fn mode(&self) -> Result<ThermostatMode, DeviceError> {
        Err(DeviceError::Unreachable("ir blaster offline".into()))
    }
}

pub struct EmptySensor;

impl EnvironmentSensor for EmptySensor {
    fn temperature(&self) -> Result<f64, DeviceError> {
        Err(DeviceError::NoReading {
            partition: "default".into(),
        })
    }
}

pub struct Sensor(pub f64);

impl EnvironmentSensor for Sensor {
    fn temperature(&self) -> Result<f64, DeviceError> {
        Ok(self.0)
    }
}

// ── Fixtures ──────────────────────────────────────────────────

pub struct Harness {
    pub bridge: Bridge,
    pub device: Arc<RecordingDevice>,
}

pub fn harness() -> Harness {
    harness_with_sensor(Arc::new(Sensor(24.0)))
}

pub fn harness_with_sensor(sensor: Arc<dyn EnvironmentSensor>) -> Harness {
    let device = Arc::new(RecordingDevice::default());
    let bridge = Bridge::new(
        Arc::new(ApplianceCatalog::sample()),
        device.clone(),
        sensor,
    );
    Harness { bridge, device }
}

pub fn v3_directive(namespace: &str, name: &str, payload: Value) -> Value {
    json!({
        "directive": {
            "header": {
                "namespace": namespace,
                "name": name,
                "payloadVersion": "3",
                "messageId": "inbound-message",
                "correlationToken": "tok-1"
            },
            "endpoint": {
                "scope": {"type": "BearerToken", "token": "access-token-from-amazon"},
                "endpointId": "endpoint-004",
                "cookie": {}
            },
            "payload": payload
        }
    })
}

pub fn v3_discover() -> Value {
    json!({
        "directive": {
            "header": {
                "namespace": "Alexa.Discovery",
                "name": "Discover",
                "payloadVersion": "3",
                "messageId": "inbound-message"
            },
            "payload": {"scope": {"type": "BearerToken", "token": "access-token-from-amazon"}}
        }
    })
}

pub fn v2_directive(namespace: &str, name: &str) -> Value {
    json!({
        "header": {
            "namespace": namespace,
            "name": name,
            "payloadVersion": "2",
            "messageId": "inbound-message"
        },
        "payload": {"accessToken": "access-token-from-amazon"}
    })
}

/// v2 control request naming `appliance_id`.
pub fn v2_control(name: &str, appliance_id: &str) -> Value {
    let mut directive = v2_directive("Alexa.ConnectedHome.Control", name);
    directive["payload"]["appliance"] = json!({"applianceId": appliance_id});
    directive
}
