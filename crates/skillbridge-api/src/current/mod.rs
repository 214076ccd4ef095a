//! Current (v3) endpoint/capability-centric schema.

pub mod types;

pub use types::{
    CapabilityDescriptor, CapabilityProperties, Context, Directive, DirectiveEnvelope,
    DiscoveredEndpoint, DiscoveryPayload, EmptyPayload, EndpointAddress, Event, EventEnvelope,
    EventPayload, Header, PropertyState, PropertyValue, StatusValue, SupportedProperty,
    TemperatureValue,
};

/// Payload version carried by every current-generation message.
pub const PAYLOAD_VERSION: &str = "3";

/// Capability `type` tag shared by every interface descriptor.
pub const INTERFACE_TYPE: &str = "AlexaInterface";

/// Capability interface version advertised for every descriptor.
pub const INTERFACE_VERSION: &str = "3";
