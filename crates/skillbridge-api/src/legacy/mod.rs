//! Legacy (v2) appliance-centric schema.

pub mod models;

pub use models::{
    DirectiveEnvelope, DiscoverAppliancesPayload, DiscoveredAppliance, EmptyPayload, Header,
    ResponseEnvelope, ResponsePayload,
};

/// Payload version carried by every legacy message.
pub const PAYLOAD_VERSION: &str = "2";

/// Namespace of legacy discovery requests and responses.
pub const DISCOVERY_NAMESPACE: &str = "Alexa.ConnectedHome.Discovery";

/// Namespace of legacy control requests and confirmations.
pub const CONTROL_NAMESPACE: &str = "Alexa.ConnectedHome.Control";

/// Response name for a legacy discovery request.
pub const DISCOVER_APPLIANCES_RESPONSE: &str = "DiscoverAppliancesResponse";
