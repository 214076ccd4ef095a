//! Current (v3) message types.
//!
//! Field names are camelCase on the wire. Struct field order is the
//! serialized field order, which keeps responses byte-stable.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ── Shared ───────────────────────────────────────────────────────────

/// Directive or event header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub namespace: String,
    pub name: String,
    #[serde(deserialize_with = "crate::version::deserialize_payload_version")]
    pub payload_version: String,
    #[serde(default)]
    pub message_id: String,
    /// Present on control and state-report directives; echoed in the response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_token: Option<String>,
}

/// Endpoint reference inside a directive or event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointAddress {
    /// Opaque authorization scope (e.g. `{"type": "BearerToken", ...}`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Value>,
    pub endpoint_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie: Option<Map<String, Value>>,
}

/// Serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyPayload {}

// ── Directive (inbound) ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectiveEnvelope {
    pub directive: Directive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directive {
    pub header: Header,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<EndpointAddress>,
    #[serde(default)]
    pub payload: Map<String, Value>,
}

// ── Event (outbound) ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    pub event: Event,
}

/// State snapshot attached to control and state-report responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub properties: Vec<PropertyState>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub header: Header,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<EndpointAddress>,
    pub payload: EventPayload,
}

/// Event payloads. The empty payload accepts any object, so it is tried last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventPayload {
    Discovery(DiscoveryPayload),
    Empty(EmptyPayload),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryPayload {
    pub endpoints: Vec<DiscoveredEndpoint>,
}

// ── Property reports ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyState {
    pub namespace: String,
    pub name: String,
    pub value: PropertyValue,
    /// UTC, `YYYY-MM-DDTHH:MM:SS.00Z`.
    pub time_of_sample: String,
    pub uncertainty_in_milliseconds: u32,
}

/// A reported property value: a bare scalar (`"ON"`), a scaled
/// measurement (`{"value": 21.5, "scale": "CELSIUS"}`), or a wrapped
/// status (`{"value": "OK"}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Scalar(String),
    Temperature(TemperatureValue),
    Status(StatusValue),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureValue {
    pub value: f64,
    pub scale: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusValue {
    pub value: String,
}

// ── Discovery ────────────────────────────────────────────────────────

/// Endpoint description returned by `Discover.Response`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredEndpoint {
    pub endpoint_id: String,
    pub manufacturer_name: String,
    pub friendly_name: String,
    pub description: String,
    pub display_categories: Vec<String>,
    pub cookie: Map<String, Value>,
    pub capabilities: Vec<CapabilityDescriptor>,
}

/// One interface an endpoint implements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    pub interface: String,
    pub version: String,
    /// Absent on the base `Alexa` descriptor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<CapabilityProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityProperties {
    pub supported: Vec<SupportedProperty>,
    pub proactively_reported: bool,
    pub retrievable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedProperty {
    pub name: String,
}
