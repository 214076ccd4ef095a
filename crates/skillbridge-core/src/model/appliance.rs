// ── Appliance domain type ──

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entity_id::EndpointId;

/// Model name that selects the thermostat capability set.
pub const SMART_THERMOSTAT_MODEL: &str = "Smart Thermostat";

/// Capability family inferred from an appliance's `modelName`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplianceModel {
    SmartThermostat,
    /// Anything else; projected as a plain on/off device.
    Other,
}

impl ApplianceModel {
    pub fn from_model_name(model_name: &str) -> Self {
        if model_name == SMART_THERMOSTAT_MODEL {
            Self::SmartThermostat
        } else {
            Self::Other
        }
    }
}

/// Legacy appliance record. Immutable once placed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appliance {
    pub id: EndpointId,
    pub manufacturer_name: String,
    pub model_name: String,
    /// Appliance firmware/model version from the legacy schema.
    pub version: String,
    pub friendly_name: String,
    pub friendly_description: String,
    pub reachable: bool,
    /// Legacy action names, in declaration order.
    pub actions: IndexSet<String>,
    /// Opaque details; becomes the endpoint `cookie`.
    pub additional_details: Map<String, Value>,
}

impl Appliance {
    pub fn model(&self) -> ApplianceModel {
        ApplianceModel::from_model_name(&self.model_name)
    }

    pub fn supports_action(&self, action: &str) -> bool {
        self.actions.contains(action)
    }
}
