//! Version-bridging directive translator for smart home skills.
//!
//! A skill backend receives directives in two API generations: the legacy
//! appliance-centric v2 and the current endpoint-centric v3. This crate
//! turns either into a device action and a schema-correct response:
//!
//! - **[`Bridge`]**: Request facade. [`Bridge::handle`] runs version
//!   detection, decoding, dispatch, and response synthesis, serializing
//!   directives that target the same endpoint.
//!
//! - **[`ApplianceCatalog`]**: The read-only appliance registry. Endpoints
//!   are never stored; [`convert::project`] derives them on demand.
//!
//! - **[`Directive`] / [`Dispatcher`]**: Typed directives, matched on
//!   `(namespace, name)` into action enums and run against the injected
//!   [`DeviceControl`] and [`EnvironmentSensor`] ports.
//!
//! - **[`ResponseSynthesizer`]**: Builds [`ResponseEnvelope`]s with fresh
//!   message ids, echoed correlation tokens, and timestamped state reports.
//!
//! - **Adapters** ([`devices`]): A simulated thermostat and file-backed
//!   temperature readings, so the bridge runs without hardware.

pub mod bridge;
pub mod catalog;
pub mod config;
pub mod convert;
pub mod devices;
pub mod directive;
pub mod dispatch;
pub mod error;
pub mod model;
pub mod ports;
pub mod response;

// ── Primary re-exports ──────────────────────────────────────────────
pub use bridge::Bridge;
pub use catalog::ApplianceCatalog;
pub use config::{BridgeConfig, CatalogSource, DeviceSettings, SensorSource};
pub use directive::{CurrentAction, CurrentDirective, Directive, Grant, LegacyAction, LegacyDirective};
pub use dispatch::{Dispatched, Dispatcher, Outcome};
pub use error::CoreError;
pub use ports::{DeviceControl, DeviceError, EnvironmentSensor, GrantRecorder};
pub use response::{ResponseEnvelope, ResponseSynthesizer};

pub use model::{
    Appliance, Capability, Connectivity, DisplayCategory, Endpoint, EndpointId, Interface,
    PowerState, PropertyReading, ReadingValue, TemperatureScale, ThermostatMode,
};

pub use skillbridge_api::DirectiveVersion;
