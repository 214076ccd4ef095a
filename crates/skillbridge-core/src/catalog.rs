// ── Appliance catalog ──
//
// Read-only registry of every appliance the bridge exposes. Built once at
// startup and shared behind an `Arc`; iteration order is insertion order,
// which is also discovery order.

use std::path::Path;

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde_json::Map;
use skillbridge_api::legacy::DiscoveredAppliance;

use crate::error::CoreError;
use crate::model::{Appliance, Endpoint, EndpointId, SMART_THERMOSTAT_MODEL};

/// Insertion-ordered appliance registry keyed by appliance id.
#[derive(Debug, Clone, Default)]
pub struct ApplianceCatalog {
    appliances: IndexMap<EndpointId, Appliance>,
}

impl ApplianceCatalog {
    /// Build a catalog, rejecting empty and duplicate ids.
    pub fn new(appliances: impl IntoIterator<Item = Appliance>) -> Result<Self, CoreError> {
        let mut map = IndexMap::new();
        for appliance in appliances {
            if appliance.id.is_empty() {
                return Err(CoreError::Catalog {
                    message: format!("appliance '{}' has an empty id", appliance.friendly_name),
                });
            }
            match map.entry(appliance.id.clone()) {
                Entry::Occupied(_) => {
                    return Err(CoreError::Catalog {
                        message: format!("duplicate appliance id: {}", appliance.id),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(appliance);
                }
            }
        }
        Ok(Self { appliances: map })
    }

    /// The built-in single-thermostat catalog.
    pub fn sample() -> Self {
        let thermostat = Appliance {
            id: EndpointId::from("endpoint-004"),
            manufacturer_name: "IR TEST (AC remote)".into(),
            model_name: SMART_THERMOSTAT_MODEL.into(),
            version: "1".into(),
            friendly_name: "エアコン".into(),
            friendly_description: "自宅のエアコンのリモコン制御が可能".into(),
            reachable: true,
            actions: [
                "setTargetTemperature",
                "incrementTargetTemperature",
                "decrementTargetTemperature",
                "getTargetTemperature",
                "getTemperatureReading",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            additional_details: Map::new(),
        };
        let mut appliances = IndexMap::new();
        appliances.insert(thermostat.id.clone(), thermostat);
        Self { appliances }
    }

    /// Load a JSON array of appliances written in legacy discovery syntax.
    pub fn from_json_file(path: &Path) -> Result<Self, CoreError> {
        let raw = std::fs::read_to_string(path).map_err(|e| CoreError::Catalog {
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        Self::from_json_str(&raw).map_err(|e| match e {
            CoreError::Catalog { message } => CoreError::Catalog {
                message: format!("{}: {message}", path.display()),
            },
            other => other,
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CoreError> {
        let wire: Vec<DiscoveredAppliance> =
            serde_json::from_str(raw).map_err(|e| CoreError::Catalog {
                message: format!("invalid appliance list: {e}"),
            })?;
        Self::new(wire.into_iter().map(Appliance::from))
    }

    pub fn appliances(&self) -> impl ExactSizeIterator<Item = &Appliance> {
        self.appliances.values()
    }

    pub fn get(&self, id: &str) -> Option<&Appliance> {
        self.appliances.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.appliances.contains_key(id)
    }

    /// Project a single appliance into its endpoint view.
    pub fn endpoint(&self, id: &str) -> Option<Endpoint> {
        self.get(id).map(Endpoint::from)
    }

    /// Project every appliance, in catalog order.
    pub fn endpoints(&self) -> Vec<Endpoint> {
        self.appliances().map(Endpoint::from).collect()
    }

    pub fn len(&self) -> usize {
        self.appliances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appliances.is_empty()
    }
}
