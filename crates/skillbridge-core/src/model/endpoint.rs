// ── Endpoint domain types ──
//
// An Endpoint is the current-generation view of exactly one Appliance.
// It is never stored; `crate::convert` derives it on demand.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{AsRefStr, Display, EnumString};

use super::entity_id::EndpointId;
use super::property::ThermostatMode;

/// Current-generation interfaces. Interface names double as directive
/// namespaces, so the same enum keys capability descriptors and dispatch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, Serialize, Deserialize,
)]
pub enum Interface {
    /// The base interface every endpoint declares; also the namespace of
    /// `ReportState` and of generic `Response` events.
    #[strum(serialize = "Alexa")]
    #[serde(rename = "Alexa")]
    Alexa,
    #[strum(serialize = "Alexa.Discovery")]
    #[serde(rename = "Alexa.Discovery")]
    Discovery,
    #[strum(serialize = "Alexa.Authorization")]
    #[serde(rename = "Alexa.Authorization")]
    Authorization,
    #[strum(serialize = "Alexa.PowerController")]
    #[serde(rename = "Alexa.PowerController")]
    PowerController,
    #[strum(serialize = "Alexa.ThermostatController")]
    #[serde(rename = "Alexa.ThermostatController")]
    ThermostatController,
    #[strum(serialize = "Alexa.TemperatureSensor")]
    #[serde(rename = "Alexa.TemperatureSensor")]
    TemperatureSensor,
    #[strum(serialize = "Alexa.EndpointHealth")]
    #[serde(rename = "Alexa.EndpointHealth")]
    EndpointHealth,
}

/// Display category shown by the voice assistant's companion app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisplayCategory {
    Thermostat,
    Other,
}

/// Reporting contract for a capability's properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reporting {
    /// Property names, in declaration order.
    pub supported: Vec<String>,
    pub proactively_reported: bool,
    pub retrievable: bool,
}

impl Reporting {
    /// Proactively reported and retrievable, as every non-base capability is.
    pub fn reported(supported: &[&str]) -> Self {
        Self {
            supported: supported.iter().map(|s| (*s).to_owned()).collect(),
            proactively_reported: true,
            retrievable: true,
        }
    }
}

/// Thermostat-specific capability configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThermostatConfiguration {
    pub supported_modes: Vec<ThermostatMode>,
    pub supports_scheduling: bool,
}

/// One interface descriptor on an endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capability {
    pub interface: Interface,
    pub version: String,
    /// `None` only for the base descriptor, which carries no properties and
    /// no reporting flags.
    pub reporting: Option<Reporting>,
    pub configuration: Option<ThermostatConfiguration>,
}

impl Capability {
    pub fn reported(interface: Interface, supported: &[&str]) -> Self {
        Self {
            interface,
            version: skillbridge_api::current::INTERFACE_VERSION.into(),
            reporting: Some(Reporting::reported(supported)),
            configuration: None,
        }
    }

    pub fn base() -> Self {
        Self {
            interface: Interface::Alexa,
            version: skillbridge_api::current::INTERFACE_VERSION.into(),
            reporting: None,
            configuration: None,
        }
    }

    #[must_use]
    pub fn with_configuration(mut self, configuration: ThermostatConfiguration) -> Self {
        self.configuration = Some(configuration);
        self
    }

    /// Supported property names; empty for the base descriptor.
    pub fn supported_properties(&self) -> &[String] {
        self.reporting.as_ref().map_or(&[], |r| r.supported.as_slice())
    }
}

/// The canonical current-generation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: EndpointId,
    pub manufacturer_name: String,
    pub friendly_name: String,
    pub description: String,
    /// Ordered, duplicate-free.
    pub display_categories: Vec<DisplayCategory>,
    pub capabilities: Vec<Capability>,
    pub cookie: Map<String, Value>,
}

impl Endpoint {
    pub fn capability(&self, interface: Interface) -> Option<&Capability> {
        self.capabilities.iter().find(|c| c.interface == interface)
    }

    pub fn interfaces(&self) -> impl Iterator<Item = Interface> + '_ {
        self.capabilities.iter().map(|c| c.interface)
    }
}
