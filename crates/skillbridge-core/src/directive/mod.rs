//! Typed inbound directives.
//!
//! Decoding happens in two steps. [`skillbridge_api::detect`] first picks
//! the generation from the raw JSON, then [`CurrentDirective::decode`] or
//! [`LegacyDirective::decode`] parses the envelope and matches the
//! `(namespace, name)` pair into an action enum. A pair outside the
//! dispatch tables becomes [`CoreError::UnsupportedDirective`] here, so the
//! dispatcher only ever sees actions it knows how to run.

pub mod requests;

use std::str::FromStr;

use secrecy::SecretString;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use skillbridge_api::{current, legacy};

use crate::error::CoreError;
use crate::model::{EndpointId, Interface, ThermostatMode};

use self::requests::{
    AcceptGrantRequest, AdjustTargetTemperatureRequest, SetTargetTemperatureRequest,
    SetThermostatModeRequest,
};

/// A decoded directive of either generation.
#[derive(Debug)]
pub enum Directive {
    Current(CurrentDirective),
    Legacy(LegacyDirective),
}

impl Directive {
    pub fn namespace(&self) -> &str {
        match self {
            Self::Current(d) => &d.header.namespace,
            Self::Legacy(d) => &d.header.namespace,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Current(d) => &d.header.name,
            Self::Legacy(d) => &d.header.name,
        }
    }

    /// The endpoint this directive mutates or reads, if any.
    pub fn endpoint_id(&self) -> Option<&str> {
        match self {
            Self::Current(d) => d.endpoint.as_ref().map(|e| e.endpoint_id.as_str()),
            Self::Legacy(d) => d.appliance_id(),
        }
    }
}

// ── Current (v3) ───────────────────────────────────────────────────

/// An authorization grant handed over by `AcceptGrant`.
#[derive(Debug)]
pub struct Grant {
    pub grant_type: String,
    pub code: SecretString,
    pub grantee_type: Option<String>,
    pub grantee_token: Option<SecretString>,
}

/// Requested thermostat mode; anything but HEAT or COOL is accepted and
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestedMode {
    Supported(ThermostatMode),
    Unsupported(String),
}

impl RequestedMode {
    fn parse(raw: &str) -> Self {
        ThermostatMode::from_str(raw)
            .map_or_else(|_| Self::Unsupported(raw.to_owned()), Self::Supported)
    }
}

#[derive(Debug)]
pub enum CurrentAction {
    Discover,
    TurnOn,
    TurnOff,
    SetTargetTemperature { target_celsius: f64 },
    AdjustTargetTemperature { delta_celsius: f64 },
    SetThermostatMode { mode: RequestedMode },
    ReportState,
    AcceptGrant(Grant),
}

impl CurrentAction {
    /// Whether the directive must name a target endpoint.
    pub fn addresses_endpoint(&self) -> bool {
        !matches!(self, Self::Discover | Self::AcceptGrant(_))
    }

    fn parse(header: &current::Header, payload: &Map<String, Value>) -> Result<Self, CoreError> {
        let interface = Interface::from_str(&header.namespace).ok();
        let action = match (interface, header.name.as_str()) {
            (Some(Interface::Discovery), "Discover") => Self::Discover,
            (Some(Interface::PowerController), "TurnOn") => Self::TurnOn,
            (Some(Interface::PowerController), "TurnOff") => Self::TurnOff,
            (Some(Interface::ThermostatController), "SetTargetTemperature") => {
                let req: SetTargetTemperatureRequest = payload_as(header, payload)?;
                let setpoint = req.target_setpoint;
                Self::SetTargetTemperature {
                    target_celsius: setpoint.scale().to_celsius(setpoint.value),
                }
            }
            (Some(Interface::ThermostatController), "AdjustTargetTemperature") => {
                let req: AdjustTargetTemperatureRequest = payload_as(header, payload)?;
                let delta = req.target_setpoint_delta;
                Self::AdjustTargetTemperature {
                    delta_celsius: delta.scale().delta_to_celsius(delta.value),
                }
            }
            (Some(Interface::ThermostatController), "SetThermostatMode") => {
                let req: SetThermostatModeRequest = payload_as(header, payload)?;
                Self::SetThermostatMode {
                    mode: RequestedMode::parse(&req.thermostat_mode.value),
                }
            }
            (Some(Interface::Alexa), "ReportState") => Self::ReportState,
            (Some(Interface::Authorization), "AcceptGrant") => {
                let req: AcceptGrantRequest = payload_as(header, payload)?;
                Self::AcceptGrant(Grant {
                    grant_type: req.grant.kind,
                    code: SecretString::from(req.grant.code),
                    grantee_type: req.grantee.as_ref().map(|g| g.kind.clone()),
                    grantee_token: req.grantee.map(|g| SecretString::from(g.token)),
                })
            }
            _ => {
                return Err(CoreError::unsupported(
                    current::PAYLOAD_VERSION,
                    &header.namespace,
                    &header.name,
                ));
            }
        };
        Ok(action)
    }
}

/// A current-generation directive, routed to an action.
#[derive(Debug)]
pub struct CurrentDirective {
    pub header: current::Header,
    pub endpoint: Option<current::EndpointAddress>,
    pub action: CurrentAction,
}

impl CurrentDirective {
    pub fn decode(raw: &Value) -> Result<Self, CoreError> {
        let envelope: current::DirectiveEnvelope = skillbridge_api::decode(raw)?;
        let current::Directive {
            header,
            endpoint,
            payload,
        } = envelope.directive;
        require_routing_fields(&header.namespace, &header.name)?;

        let action = CurrentAction::parse(&header, &payload)?;
        if action.addresses_endpoint() {
            match &endpoint {
                None => {
                    return Err(CoreError::malformed(format!(
                        "{}/{} requires directive.endpoint",
                        header.namespace, header.name
                    )));
                }
                Some(e) if e.endpoint_id.trim().is_empty() => {
                    return Err(CoreError::malformed("directive.endpoint.endpointId is empty"));
                }
                Some(_) => {}
            }
        }

        Ok(Self {
            header,
            endpoint,
            action,
        })
    }

    pub fn endpoint_id(&self) -> Option<EndpointId> {
        self.endpoint
            .as_ref()
            .map(|e| EndpointId::from(e.endpoint_id.as_str()))
    }
}

// ── Legacy (v2) ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyAction {
    /// Any request in the discovery namespace.
    DiscoverAppliances,
    TurnOn,
    TurnOff,
}

impl LegacyAction {
    fn parse(header: &legacy::Header) -> Result<Self, CoreError> {
        match (header.namespace.as_str(), header.name.as_str()) {
            (legacy::DISCOVERY_NAMESPACE, _) => Ok(Self::DiscoverAppliances),
            (legacy::CONTROL_NAMESPACE, "TurnOnRequest") => Ok(Self::TurnOn),
            (legacy::CONTROL_NAMESPACE, "TurnOffRequest") => Ok(Self::TurnOff),
            (namespace, name) => Err(CoreError::unsupported(
                legacy::PAYLOAD_VERSION,
                namespace,
                name,
            )),
        }
    }

    /// Whether the request drives the device.
    pub fn controls_device(self) -> bool {
        matches!(self, Self::TurnOn | Self::TurnOff)
    }

    /// Confirmation event name, derived from the request name's stem.
    pub fn confirmation_name(self) -> Option<&'static str> {
        match self {
            Self::DiscoverAppliances => None,
            Self::TurnOn => Some("TurnOnConfirmation"),
            Self::TurnOff => Some("TurnOffConfirmation"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LegacyDirective {
    pub header: legacy::Header,
    pub payload: Map<String, Value>,
    pub action: LegacyAction,
}

impl LegacyDirective {
    pub fn decode(raw: &Value) -> Result<Self, CoreError> {
        let envelope: legacy::DirectiveEnvelope = skillbridge_api::decode(raw)?;
        require_routing_fields(&envelope.header.namespace, &envelope.header.name)?;
        let action = LegacyAction::parse(&envelope.header)?;
        Ok(Self {
            header: envelope.header,
            payload: envelope.payload,
            action,
        })
    }

    /// `payload.appliance.applianceId`, when the request names one.
    pub fn appliance_id(&self) -> Option<&str> {
        self.payload
            .get("appliance")
            .and_then(|a| a.get("applianceId"))
            .and_then(Value::as_str)
            .filter(|id| !id.trim().is_empty())
    }
}

// ── Helpers ────────────────────────────────────────────────────────

fn require_routing_fields(namespace: &str, name: &str) -> Result<(), CoreError> {
    if namespace.trim().is_empty() {
        return Err(CoreError::malformed("header.namespace is empty"));
    }
    if name.trim().is_empty() {
        return Err(CoreError::malformed("header.name is empty"));
    }
    Ok(())
}

fn payload_as<T: DeserializeOwned>(
    header: &current::Header,
    payload: &Map<String, Value>,
) -> Result<T, CoreError> {
    T::deserialize(Value::Object(payload.clone())).map_err(|e| {
        CoreError::malformed(format!(
            "invalid {}/{} payload: {e}",
            header.namespace, header.name
        ))
    })
}
