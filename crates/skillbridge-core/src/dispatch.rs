// ── Directive dispatch ──
//
// Runs a decoded directive against the injected collaborators and returns
// what happened plus the post-action state snapshot. Nothing here builds
// wire envelopes; `crate::response` turns a `Dispatched` into one.

use std::sync::Arc;

use tracing::{debug, info};

use crate::catalog::ApplianceCatalog;
use crate::directive::{
    CurrentAction, CurrentDirective, Directive, LegacyAction, LegacyDirective, RequestedMode,
};
use crate::error::CoreError;
use crate::model::{Appliance, Connectivity, Endpoint, PropertyReading, ThermostatMode};
use crate::ports::{DeviceControl, EnvironmentSensor, GrantRecorder};

/// What a directive produced, before it is wrapped in a response.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// `Alexa.Discovery/Discover`: every catalog endpoint, in order.
    Discovery(Vec<Endpoint>),
    /// A v3 control directive ran.
    Response,
    /// `Alexa/ReportState`.
    StateReport,
    /// `Alexa.Authorization/AcceptGrant`.
    AcceptGrant,
    /// Legacy discovery: every catalog appliance, in order.
    LegacyDiscovery(Vec<Appliance>),
    /// A legacy control request ran.
    LegacyConfirmation(LegacyAction),
}

/// Dispatch result: the outcome and the readings to report, in report
/// order. Readings are not yet timestamped.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatched {
    pub outcome: Outcome,
    pub properties: Vec<PropertyReading>,
}

impl Dispatched {
    fn bare(outcome: Outcome) -> Self {
        Self {
            outcome,
            properties: Vec::new(),
        }
    }
}

/// Routes directives to device actions. Cheap to clone.
#[derive(Clone)]
pub struct Dispatcher {
    catalog: Arc<ApplianceCatalog>,
    device: Arc<dyn DeviceControl>,
    sensor: Arc<dyn EnvironmentSensor>,
    grants: Option<Arc<dyn GrantRecorder>>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("catalog", &self.catalog)
            .field("grants", &self.grants.is_some())
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn new(
        catalog: Arc<ApplianceCatalog>,
        device: Arc<dyn DeviceControl>,
        sensor: Arc<dyn EnvironmentSensor>,
    ) -> Self {
        Self {
            catalog,
            device,
            sensor,
            grants: None,
        }
    }

    #[must_use]
    pub fn with_grant_recorder(mut self, recorder: Arc<dyn GrantRecorder>) -> Self {
        self.grants = Some(recorder);
        self
    }

    pub fn catalog(&self) -> &Arc<ApplianceCatalog> {
        &self.catalog
    }

    pub fn dispatch(&self, directive: &Directive) -> Result<Dispatched, CoreError> {
        match directive {
            Directive::Current(d) => self.dispatch_current(d),
            Directive::Legacy(d) => self.dispatch_legacy(d),
        }
    }

    // ── Current (v3) ─────────────────────────────────────────────

    fn dispatch_current(&self, directive: &CurrentDirective) -> Result<Dispatched, CoreError> {
        let action = &directive.action;
        let appliance = if action.addresses_endpoint() {
            Some(self.addressed_appliance(directive)?)
        } else {
            None
        };

        match action {
            CurrentAction::Discover => {
                let endpoints = self.catalog.endpoints();
                debug!(count = endpoints.len(), "projected catalog for discovery");
                Ok(Dispatched::bare(Outcome::Discovery(endpoints)))
            }

            CurrentAction::TurnOn => {
                self.device.set_power_on()?;
                self.power_report()
            }

            CurrentAction::TurnOff => {
                self.device.set_power_off()?;
                self.power_report()
            }

            CurrentAction::SetTargetTemperature { target_celsius } => {
                self.device.set_temperature(*target_celsius)?;
                self.thermostat_report()
            }

            CurrentAction::AdjustTargetTemperature { delta_celsius } => {
                let current = self.device.temperature()?;
                self.device.set_temperature(current + delta_celsius)?;
                self.thermostat_report()
            }

            CurrentAction::SetThermostatMode { mode } => {
                match mode {
                    RequestedMode::Supported(ThermostatMode::Heat) => self.device.set_mode_heat()?,
                    RequestedMode::Supported(ThermostatMode::Cool) => self.device.set_mode_cool()?,
                    RequestedMode::Unsupported(raw) => {
                        debug!(mode = %raw, "ignoring unsupported thermostat mode");
                    }
                }
                self.thermostat_report()
            }

            CurrentAction::ReportState => {
                let reachable = appliance.is_some_and(|a| a.reachable);
                Ok(Dispatched {
                    outcome: Outcome::StateReport,
                    properties: vec![
                        PropertyReading::thermostat_mode(self.device.mode()?),
                        PropertyReading::target_setpoint(self.device.temperature()?),
                        PropertyReading::power_state(self.device.power()?),
                        PropertyReading::temperature(self.sensor.temperature()?),
                        PropertyReading::connectivity(Connectivity::from_reachable(reachable)),
                    ],
                })
            }

            CurrentAction::AcceptGrant(grant) => {
                if let Some(recorder) = &self.grants {
                    recorder.record(grant)?;
                    info!(grant_type = %grant.grant_type, "authorization grant recorded");
                } else {
                    info!(
                        grant_type = %grant.grant_type,
                        "authorization grant accepted; no recorder configured"
                    );
                }
                Ok(Dispatched::bare(Outcome::AcceptGrant))
            }
        }
    }

    fn addressed_appliance(&self, directive: &CurrentDirective) -> Result<&Appliance, CoreError> {
        let endpoint_id = directive
            .endpoint
            .as_ref()
            .map(|e| e.endpoint_id.as_str())
            .ok_or_else(|| CoreError::malformed("directive.endpoint is missing"))?;
        self.catalog
            .get(endpoint_id)
            .ok_or_else(|| CoreError::EndpointNotFound {
                endpoint_id: endpoint_id.to_owned(),
            })
    }

    fn power_report(&self) -> Result<Dispatched, CoreError> {
        Ok(Dispatched {
            outcome: Outcome::Response,
            properties: vec![PropertyReading::power_state(self.device.power()?)],
        })
    }

    /// Mode, setpoint, then ambient temperature.
    fn thermostat_report(&self) -> Result<Dispatched, CoreError> {
        Ok(Dispatched {
            outcome: Outcome::Response,
            properties: vec![
                PropertyReading::thermostat_mode(self.device.mode()?),
                PropertyReading::target_setpoint(self.device.temperature()?),
                PropertyReading::temperature(self.sensor.temperature()?),
            ],
        })
    }

    // ── Legacy (v2) ──────────────────────────────────────────────

    fn dispatch_legacy(&self, directive: &LegacyDirective) -> Result<Dispatched, CoreError> {
        let unknown_appliance = directive
            .appliance_id()
            .filter(|id| directive.action.controls_device() && !self.catalog.contains(id));
        if let Some(id) = unknown_appliance {
            return Err(CoreError::EndpointNotFound {
                endpoint_id: id.to_owned(),
            });
        }

        let outcome = match directive.action {
            LegacyAction::DiscoverAppliances => {
                Outcome::LegacyDiscovery(self.catalog.appliances().cloned().collect())
            }
            LegacyAction::TurnOn => {
                self.device.set_power_on()?;
                Outcome::LegacyConfirmation(LegacyAction::TurnOn)
            }
            LegacyAction::TurnOff => {
                self.device.set_power_off()?;
                Outcome::LegacyConfirmation(LegacyAction::TurnOff)
            }
        };
        Ok(Dispatched::bare(outcome))
    }
}
