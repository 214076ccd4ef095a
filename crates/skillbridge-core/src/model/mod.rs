// ── Domain model ──
//
// Canonical types shared by both API generations. The legacy `Appliance`
// is the only model the catalog stores; `Endpoint` is always derived from
// one via `crate::convert`.

pub mod appliance;
pub mod endpoint;
pub mod entity_id;
pub mod property;

pub use appliance::{Appliance, ApplianceModel, SMART_THERMOSTAT_MODEL};
pub use endpoint::{
    Capability, DisplayCategory, Endpoint, Interface, Reporting, ThermostatConfiguration,
};
pub use entity_id::{EndpointId, MessageId};
pub use property::{
    CONNECTIVITY, Connectivity, POWER_STATE, PowerState, PropertyReading, ReadingValue,
    TARGET_SETPOINT, TEMPERATURE, THERMOSTAT_MODE, TemperatureScale, ThermostatMode,
};
