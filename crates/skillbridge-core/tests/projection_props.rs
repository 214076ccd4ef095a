#![allow(clippy::unwrap_used)]

use indexmap::IndexSet;
use proptest::prelude::*;
use serde_json::{Map, Value, json};
use skillbridge_core::convert::project;
use skillbridge_core::model::SMART_THERMOSTAT_MODEL;
use skillbridge_core::{Appliance, DisplayCategory, EndpointId, Interface};

fn appliance(model_name: String) -> impl Strategy<Value = Appliance> {
    (
        "[a-z0-9-]{1,16}",
        "[A-Za-z ]{0,20}",
        "[A-Za-z ]{0,20}",
        any::<bool>(),
        proptest::collection::vec("[a-z]{1,10}", 0..4),
        proptest::collection::vec(("[a-z]{1,6}", any::<i32>()), 0..3),
    )
        .prop_map(move |(id, friendly, description, reachable, actions, details)| {
            let mut additional_details = Map::new();
            for (k, v) in details {
                additional_details.insert(k, Value::from(v));
            }
            Appliance {
                id: EndpointId::from(id),
                manufacturer_name: "Acme".into(),
                model_name: model_name.clone(),
                version: "1".into(),
                friendly_name: friendly,
                friendly_description: description,
                reachable,
                actions: actions.into_iter().collect::<IndexSet<_>>(),
                additional_details,
            }
        })
}

fn other_model() -> impl Strategy<Value = String> {
    "[A-Za-z ]{0,20}".prop_filter("must not be the thermostat model", |m| m != SMART_THERMOSTAT_MODEL)
}

proptest! {
    #[test]
    fn thermostats_project_to_five_capabilities(a in appliance(SMART_THERMOSTAT_MODEL.into())) {
        let endpoint = project(&a);
        prop_assert_eq!(endpoint.capabilities.len(), 5);
        prop_assert_eq!(&endpoint.display_categories, &vec![DisplayCategory::Thermostat]);
        prop_assert_eq!(endpoint.capabilities[3].interface, Interface::EndpointHealth);
        prop_assert_eq!(endpoint.capabilities[4].interface, Interface::Alexa);
    }

    #[test]
    fn other_models_project_to_three_capabilities(a in other_model().prop_flat_map(appliance)) {
        let endpoint = project(&a);
        let interfaces: Vec<_> = endpoint.interfaces().collect();
        prop_assert_eq!(
            interfaces,
            vec![Interface::PowerController, Interface::EndpointHealth, Interface::Alexa]
        );
        prop_assert_eq!(&endpoint.display_categories, &vec![DisplayCategory::Other]);
    }

    #[test]
    fn projection_is_idempotent(a in appliance(SMART_THERMOSTAT_MODEL.into())) {
        let first = project(&a);
        let second = project(&a);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.cookie, a.additional_details.clone());
        prop_assert_eq!(first.id, a.id.clone());
    }
}

#[test]
fn cookie_is_the_additional_details_map() {
    let mut details = Map::new();
    details.insert("extraDetail".into(), json!("value"));
    let a = Appliance {
        additional_details: details.clone(),
        ..skillbridge_core::ApplianceCatalog::sample()
            .get("endpoint-004")
            .cloned()
            .unwrap()
    };
    assert_eq!(project(&a).cookie, details);
}
