// ── Domain/wire conversions ──
//
// The endpoint projector lives here: `From<&Appliance> for Endpoint` is the
// single rule turning a legacy appliance into its current-generation view.
// The remaining impls move domain types on and off the two wire schemas.

use serde_json::{Map, Value};
use skillbridge_api::current::{
    self, CapabilityDescriptor, CapabilityProperties, DiscoveredEndpoint, PropertyValue,
    StatusValue, SupportedProperty, TemperatureValue,
};
use skillbridge_api::legacy::DiscoveredAppliance;

use crate::model::{
    Appliance, ApplianceModel, Capability, DisplayCategory, Endpoint, EndpointId, Interface,
    PropertyReading, ReadingValue, TemperatureScale, ThermostatConfiguration, ThermostatMode,
    CONNECTIVITY, POWER_STATE, TARGET_SETPOINT, TEMPERATURE, THERMOSTAT_MODE,
};

// ── Projector ──────────────────────────────────────────────────────

/// Project an appliance into its endpoint view. Pure and total.
pub fn project(appliance: &Appliance) -> Endpoint {
    Endpoint::from(appliance)
}

impl From<&Appliance> for Endpoint {
    fn from(appliance: &Appliance) -> Self {
        let (display_categories, mut capabilities) = match appliance.model() {
            ApplianceModel::SmartThermostat => (
                vec![DisplayCategory::Thermostat],
                vec![
                    Capability::reported(
                        Interface::ThermostatController,
                        &[TARGET_SETPOINT, THERMOSTAT_MODE],
                    )
                    .with_configuration(ThermostatConfiguration {
                        supported_modes: vec![ThermostatMode::Heat, ThermostatMode::Cool],
                        supports_scheduling: false,
                    }),
                    Capability::reported(Interface::PowerController, &[POWER_STATE]),
                    Capability::reported(Interface::TemperatureSensor, &[TEMPERATURE]),
                ],
            ),
            ApplianceModel::Other => (
                vec![DisplayCategory::Other],
                vec![Capability::reported(Interface::PowerController, &[POWER_STATE])],
            ),
        };
        capabilities.push(Capability::reported(Interface::EndpointHealth, &[CONNECTIVITY]));
        capabilities.push(Capability::base());

        Self {
            id: appliance.id.clone(),
            manufacturer_name: appliance.manufacturer_name.clone(),
            friendly_name: appliance.friendly_name.clone(),
            description: appliance.friendly_description.clone(),
            display_categories,
            capabilities,
            cookie: appliance.additional_details.clone(),
        }
    }
}

// ── Current (v3) wire ──────────────────────────────────────────────

impl From<&Capability> for CapabilityDescriptor {
    fn from(capability: &Capability) -> Self {
        let properties = capability.reporting.as_ref().map(|r| CapabilityProperties {
            supported: r
                .supported
                .iter()
                .map(|name| SupportedProperty { name: name.clone() })
                .collect(),
            proactively_reported: r.proactively_reported,
            retrievable: r.retrievable,
        });
        let configuration = capability.configuration.as_ref().map(|c| {
            let mut map = Map::new();
            map.insert(
                "supportedModes".into(),
                Value::Array(
                    c.supported_modes
                        .iter()
                        .map(|m| Value::String(m.to_string()))
                        .collect(),
                ),
            );
            map.insert(
                "supportsScheduling".into(),
                Value::Bool(c.supports_scheduling),
            );
            map
        });

        Self {
            kind: current::INTERFACE_TYPE.into(),
            interface: capability.interface.to_string(),
            version: capability.version.clone(),
            properties,
            configuration,
        }
    }
}

impl From<&Endpoint> for DiscoveredEndpoint {
    fn from(endpoint: &Endpoint) -> Self {
        Self {
            endpoint_id: endpoint.id.to_string(),
            manufacturer_name: endpoint.manufacturer_name.clone(),
            friendly_name: endpoint.friendly_name.clone(),
            description: endpoint.description.clone(),
            display_categories: endpoint
                .display_categories
                .iter()
                .map(ToString::to_string)
                .collect(),
            cookie: endpoint.cookie.clone(),
            capabilities: endpoint.capabilities.iter().map(Into::into).collect(),
        }
    }
}

/// Wire value for a reading. Temperatures are always reported in Celsius.
pub(crate) fn property_value(value: &ReadingValue) -> PropertyValue {
    match value {
        ReadingValue::Power(state) => PropertyValue::Scalar(state.to_string()),
        ReadingValue::Mode(mode) => PropertyValue::Scalar(mode.to_string()),
        ReadingValue::Temperature(celsius) => PropertyValue::Temperature(TemperatureValue {
            value: *celsius,
            scale: TemperatureScale::Celsius.to_string(),
        }),
        ReadingValue::Connectivity(c) => PropertyValue::Status(StatusValue {
            value: c.to_string(),
        }),
    }
}

/// Stamp a reading with its sample time.
pub(crate) fn property_state(reading: &PropertyReading, time_of_sample: &str) -> current::PropertyState {
    current::PropertyState {
        namespace: reading.interface.to_string(),
        name: reading.name.to_owned(),
        value: property_value(&reading.value),
        time_of_sample: time_of_sample.to_owned(),
        uncertainty_in_milliseconds: 0,
    }
}

// ── Legacy (v2) wire ───────────────────────────────────────────────

impl From<&Appliance> for DiscoveredAppliance {
    fn from(appliance: &Appliance) -> Self {
        Self {
            appliance_id: appliance.id.to_string(),
            manufacturer_name: appliance.manufacturer_name.clone(),
            model_name: appliance.model_name.clone(),
            version: appliance.version.clone(),
            friendly_name: appliance.friendly_name.clone(),
            friendly_description: appliance.friendly_description.clone(),
            is_reachable: appliance.reachable,
            actions: appliance.actions.iter().cloned().collect(),
            additional_appliance_details: appliance.additional_details.clone(),
        }
    }
}

impl From<DiscoveredAppliance> for Appliance {
    fn from(wire: DiscoveredAppliance) -> Self {
        Self {
            id: EndpointId::from(wire.appliance_id),
            manufacturer_name: wire.manufacturer_name,
            model_name: wire.model_name,
            version: wire.version,
            friendly_name: wire.friendly_name,
            friendly_description: wire.friendly_description,
            reachable: wire.is_reachable,
            actions: wire.actions.into_iter().collect(),
            additional_details: wire.additional_appliance_details,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::catalog::ApplianceCatalog;
    use crate::model::{Connectivity, PowerState};

    fn thermostat() -> Appliance {
        ApplianceCatalog::sample().get("endpoint-004").cloned().unwrap()
    }

    fn plug() -> Appliance {
        Appliance {
            model_name: "Smart Plug".into(),
            ..thermostat()
        }
    }

    #[test]
    fn thermostat_projection_has_fixed_capability_order() {
        let endpoint = project(&thermostat());
        assert_eq!(endpoint.display_categories, [DisplayCategory::Thermostat]);
        let interfaces: Vec<_> = endpoint.interfaces().collect();
        assert_eq!(
            interfaces,
            [
                Interface::ThermostatController,
                Interface::PowerController,
                Interface::TemperatureSensor,
                Interface::EndpointHealth,
                Interface::Alexa,
            ]
        );
        let thermo = endpoint.capability(Interface::ThermostatController).unwrap();
        assert_eq!(thermo.supported_properties(), [TARGET_SETPOINT, THERMOSTAT_MODE]);
        let config = thermo.configuration.as_ref().unwrap();
        assert_eq!(config.supported_modes, [ThermostatMode::Heat, ThermostatMode::Cool]);
        assert!(!config.supports_scheduling);
    }

    #[test]
    fn other_models_are_plain_power_devices() {
        let endpoint = project(&plug());
        assert_eq!(endpoint.display_categories, [DisplayCategory::Other]);
        let interfaces: Vec<_> = endpoint.interfaces().collect();
        assert_eq!(
            interfaces,
            [Interface::PowerController, Interface::EndpointHealth, Interface::Alexa]
        );
    }

    #[test]
    fn every_projection_ends_with_health_then_base() {
        for appliance in [thermostat(), plug()] {
            let endpoint = project(&appliance);
            let n = endpoint.capabilities.len();
            assert_eq!(endpoint.capabilities[n - 2].interface, Interface::EndpointHealth);
            assert_eq!(endpoint.capabilities[n - 1], Capability::base());
            for capability in &endpoint.capabilities[..n - 1] {
                let reporting = capability.reporting.as_ref().unwrap();
                assert!(reporting.proactively_reported && reporting.retrievable);
            }
        }
    }

    #[test]
    fn projection_copies_identity_and_cookie() {
        let mut appliance = thermostat();
        appliance
            .additional_details
            .insert("room".into(), json!("living"));
        let endpoint = project(&appliance);
        assert_eq!(endpoint.id, appliance.id);
        assert_eq!(endpoint.description, appliance.friendly_description);
        assert_eq!(endpoint.cookie.get("room"), Some(&json!("living")));
        assert_eq!(project(&appliance), endpoint);
    }

    #[test]
    fn discovered_endpoint_wire_shape() {
        let wire = DiscoveredEndpoint::from(&project(&thermostat()));
        let value = serde_json::to_value(&wire).unwrap();
        assert_eq!(value["displayCategories"], json!(["THERMOSTAT"]));
        assert_eq!(
            value["capabilities"][0],
            json!({
                "type": "AlexaInterface",
                "interface": "Alexa.ThermostatController",
                "version": "3",
                "properties": {
                    "supported": [{"name": "targetSetpoint"}, {"name": "thermostatMode"}],
                    "proactivelyReported": true,
                    "retrievable": true
                },
                "configuration": {
                    "supportedModes": ["HEAT", "COOL"],
                    "supportsScheduling": false
                }
            })
        );
        assert_eq!(
            value["capabilities"][4],
            json!({"type": "AlexaInterface", "interface": "Alexa", "version": "3"})
        );
    }

    #[test]
    fn reading_values_on_the_wire() {
        let cases = [
            (ReadingValue::Power(PowerState::On), json!("ON")),
            (ReadingValue::Mode(ThermostatMode::Cool), json!("COOL")),
            (
                ReadingValue::Temperature(21.5),
                json!({"value": 21.5, "scale": "CELSIUS"}),
            ),
            (
                ReadingValue::Connectivity(Connectivity::Ok),
                json!({"value": "OK"}),
            ),
        ];
        for (reading, expected) in cases {
            assert_eq!(serde_json::to_value(property_value(&reading)).unwrap(), expected);
        }
    }

    #[test]
    fn appliance_survives_the_legacy_wire() {
        let appliance = thermostat();
        let wire = DiscoveredAppliance::from(&appliance);
        assert_eq!(wire.appliance_id, "endpoint-004");
        assert!(wire.is_reachable);
        assert_eq!(Appliance::from(wire), appliance);
    }
}
