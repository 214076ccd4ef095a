#![allow(clippy::unwrap_used)]

mod common;

use proptest::prelude::*;
use serde_json::{Value, json};
use skillbridge_core::{CoreError, ResponseEnvelope};

use common::harness;

/// Known v3 pairs mixed with arbitrary ones.
fn current_pair() -> impl Strategy<Value = (String, String)> {
    prop_oneof![
        Just(("Alexa.Discovery".to_owned(), "Discover".to_owned())),
        Just(("Alexa.PowerController".to_owned(), "TurnOn".to_owned())),
        Just(("Alexa.PowerController".to_owned(), "TurnOff".to_owned())),
        Just(("Alexa.ThermostatController".to_owned(), "SetTargetTemperature".to_owned())),
        Just(("Alexa.ThermostatController".to_owned(), "AdjustTargetTemperature".to_owned())),
        Just(("Alexa.ThermostatController".to_owned(), "SetThermostatMode".to_owned())),
        Just(("Alexa".to_owned(), "ReportState".to_owned())),
        Just(("Alexa.Authorization".to_owned(), "AcceptGrant".to_owned())),
        ("[A-Za-z.]{1,24}", "[A-Za-z]{1,16}"),
    ]
}

/// Known v2 pairs mixed with arbitrary ones.
fn legacy_pair() -> impl Strategy<Value = (String, String)> {
    prop_oneof![
        Just((
            "Alexa.ConnectedHome.Discovery".to_owned(),
            "DiscoverAppliancesRequest".to_owned()
        )),
        Just(("Alexa.ConnectedHome.Control".to_owned(), "TurnOnRequest".to_owned())),
        Just(("Alexa.ConnectedHome.Control".to_owned(), "TurnOffRequest".to_owned())),
        ("[A-Za-z.]{1,24}", "[A-Za-z]{1,24}"),
    ]
}

/// A payload every known v3 action can decode.
fn current_payload() -> Value {
    json!({
        "targetSetpoint": {"value": 21.0, "scale": "CELSIUS"},
        "targetSetpointDelta": {"value": 1.0, "scale": "CELSIUS"},
        "thermostatMode": {"value": "HEAT"},
        "grant": {"type": "OAuth2.AuthorizationCode", "code": "code"},
        "grantee": {"type": "BearerToken", "token": "token"}
    })
}

fn is_expected_rejection(err: &CoreError, version: &str) -> bool {
    matches!(err, CoreError::UnsupportedDirective { version: v, .. } if v == version)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A directive whose version sits only in the v3 location is answered
    /// in the v3 shape or rejected as an unsupported v3 pair.
    #[test]
    fn current_location_routes_to_current_table((ns, name) in current_pair()) {
        let h = harness();
        let directive = json!({
            "directive": {
                "header": {"namespace": ns, "name": name, "payloadVersion": "3", "messageId": "m"},
                "endpoint": {"endpointId": "endpoint-004"},
                "payload": current_payload()
            }
        });
        match h.bridge.handle(&directive) {
            Ok(response) => prop_assert!(matches!(response, ResponseEnvelope::Current(_))),
            Err(err) => prop_assert!(is_expected_rejection(&err, "3"), "unexpected error: {err}"),
        }
    }

    /// Likewise for a directive versioned only in the legacy location.
    #[test]
    fn legacy_location_routes_to_legacy_table((ns, name) in legacy_pair()) {
        let h = harness();
        let directive = json!({
            "header": {"namespace": ns, "name": name, "payloadVersion": "2", "messageId": "m"},
            "payload": {"appliance": {"applianceId": "endpoint-004"}}
        });
        match h.bridge.handle(&directive) {
            Ok(response) => prop_assert!(matches!(response, ResponseEnvelope::Legacy(_))),
            Err(err) => prop_assert!(is_expected_rejection(&err, "2"), "unexpected error: {err}"),
        }
    }

    /// The version text must match its location; a swapped value is never
    /// routed to the other table.
    #[test]
    fn swapped_versions_are_unknown((ns, name) in current_pair()) {
        let h = harness();
        let current_with_two = json!({
            "directive": {
                "header": {"namespace": ns, "name": name, "payloadVersion": "2"},
                "payload": {}
            }
        });
        let legacy_with_three = json!({
            "header": {"namespace": ns, "name": name, "payloadVersion": "3"},
            "payload": {}
        });
        let first = h.bridge.handle(&current_with_two);
        let second = h.bridge.handle(&legacy_with_three);
        prop_assert!(matches!(first, Err(CoreError::UnknownVersion { .. })), "expected UnknownVersion for first");
        prop_assert!(matches!(second, Err(CoreError::UnknownVersion { .. })), "expected UnknownVersion for second");
    }
}
