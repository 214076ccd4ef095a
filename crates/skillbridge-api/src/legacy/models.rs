// Legacy (v2) message types
//
// Requests and responses share the `{ "header": ..., "payload": ... }`
// envelope. Appliance fields use `#[serde(default)]` where the schema
// treats them as optional, since catalogs are often hand-written.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ── Header ───────────────────────────────────────────────────────────

/// Message header, identical in shape for requests and responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub namespace: String,
    pub name: String,
    #[serde(deserialize_with = "crate::version::deserialize_payload_version")]
    pub payload_version: String,
    #[serde(default)]
    pub message_id: String,
}

// ── Request ──────────────────────────────────────────────────────────

/// Inbound legacy directive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectiveEnvelope {
    pub header: Header,
    /// Request-specific payload (access token, appliance reference, ...).
    #[serde(default)]
    pub payload: Map<String, Value>,
}

// ── Appliance ────────────────────────────────────────────────────────

/// Appliance description as returned by `DiscoverAppliancesResponse`.
///
/// This is also the on-disk catalog format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredAppliance {
    pub appliance_id: String,
    pub manufacturer_name: String,
    pub model_name: String,
    #[serde(default = "default_appliance_version")]
    pub version: String,
    pub friendly_name: String,
    #[serde(default)]
    pub friendly_description: String,
    #[serde(default = "default_reachable")]
    pub is_reachable: bool,
    #[serde(default)]
    pub actions: Vec<String>,
    /// Opaque details handed back verbatim on every request for this appliance.
    #[serde(default)]
    pub additional_appliance_details: Map<String, Value>,
}

fn default_appliance_version() -> String {
    "1".into()
}

fn default_reachable() -> bool {
    true
}

// ── Response ─────────────────────────────────────────────────────────

/// Outbound legacy response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub header: Header,
    pub payload: ResponsePayload,
}

/// Legacy response payloads. Variant order matters for decoding: the empty
/// payload accepts any object, so it is tried last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponsePayload {
    Discovery(DiscoverAppliancesPayload),
    Empty(EmptyPayload),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverAppliancesPayload {
    pub discovered_appliances: Vec<DiscoveredAppliance>,
}

/// Serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyPayload {}
