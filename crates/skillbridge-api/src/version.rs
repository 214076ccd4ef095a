// ── Directive version detection ──
//
// Classifies an inbound request by *where* its payloadVersion lives, before
// any typed decoding. Absence of both locations is an expected outcome on
// malformed input, so detection degrades to `Unknown` and never fails.

use std::fmt;

use serde::{Deserialize, Deserializer, de};
use serde_json::Value;
use tracing::trace;

/// JSON pointer to the v3 payload version.
const CURRENT_POINTER: &str = "/directive/header/payloadVersion";
/// JSON pointer to the v2 payload version.
const LEGACY_POINTER: &str = "/header/payloadVersion";

/// Sentinel rendered for requests that carry no version field.
pub const UNKNOWN_VERSION: &str = "unknown";

/// The result of inspecting a request for its payload version.
///
/// The variant records which location held the field; the payload is the raw
/// value found there. Routing decisions use both, so a v3-shaped request is
/// never treated as v2 even when its version string is unexpected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveVersion {
    /// `directive.header.payloadVersion` was present (expected `"3"`).
    Current(String),
    /// Top-level `header.payloadVersion` was present (expected `"2"`).
    Legacy(String),
    /// Neither location carried a version.
    Unknown,
}

impl DirectiveVersion {
    /// The raw version string, or `"unknown"`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Current(v) | Self::Legacy(v) => v,
            Self::Unknown => UNKNOWN_VERSION,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for DirectiveVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detect the payload version of a raw request.
///
/// The v3 location is checked first; the legacy location is only consulted
/// when the v3 one is absent.
pub fn detect(request: &Value) -> DirectiveVersion {
    if let Some(version) = request.pointer(CURRENT_POINTER).and_then(version_text) {
        trace!(%version, "payload version found in directive header");
        return DirectiveVersion::Current(version);
    }
    if let Some(version) = request.pointer(LEGACY_POINTER).and_then(version_text) {
        trace!(%version, "payload version found in legacy header");
        return DirectiveVersion::Legacy(version);
    }
    trace!("no payload version present");
    DirectiveVersion::Unknown
}

/// Strings pass through; numbers are stringified. `null`, booleans and
/// containers count as absent.
fn version_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Header field decoder accepting exactly what [`detect`] accepts, so a
/// request that detects as `Current("3")` also decodes.
pub(crate) fn deserialize_payload_version<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    version_text(&value).ok_or_else(|| {
        de::Error::custom(format!("payloadVersion must be a string or number, got {value}"))
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn current_location_wins() {
        let request = json!({
            "directive": { "header": { "payloadVersion": "3" } },
            "header": { "payloadVersion": "2" }
        });
        assert_eq!(detect(&request), DirectiveVersion::Current("3".into()));
    }

    #[test]
    fn legacy_location_used_when_current_absent() {
        let request = json!({ "header": { "namespace": "x", "payloadVersion": "2" } });
        assert_eq!(detect(&request), DirectiveVersion::Legacy("2".into()));
    }

    #[test]
    fn missing_fields_degrade_to_unknown() {
        assert_eq!(detect(&json!({})), DirectiveVersion::Unknown);
        assert_eq!(detect(&json!({ "directive": {} })), DirectiveVersion::Unknown);
        assert_eq!(detect(&json!([1, 2, 3])), DirectiveVersion::Unknown);
        assert_eq!(detect(&json!("3")), DirectiveVersion::Unknown);
        assert_eq!(DirectiveVersion::Unknown.as_str(), "unknown");
    }

    #[test]
    fn numeric_version_is_stringified() {
        let request = json!({ "directive": { "header": { "payloadVersion": 3 } } });
        assert_eq!(detect(&request).as_str(), "3");
    }

    #[test]
    fn numeric_header_version_decodes_like_it_detects() {
        let header: crate::current::Header = serde_json::from_value(json!({
            "namespace": "Alexa.Discovery",
            "name": "Discover",
            "payloadVersion": 3
        }))
        .unwrap_or_else(|e| panic!("numeric version rejected: {e}"));
        assert_eq!(header.payload_version, "3");

        let legacy: crate::legacy::Header = serde_json::from_value(json!({
            "namespace": "Alexa.ConnectedHome.Discovery",
            "name": "DiscoverAppliancesRequest",
            "payloadVersion": 2
        }))
        .unwrap_or_else(|e| panic!("numeric version rejected: {e}"));
        assert_eq!(legacy.payload_version, "2");
    }

    #[test]
    fn boolean_header_version_is_rejected() {
        let result = serde_json::from_value::<crate::legacy::Header>(json!({
            "namespace": "x",
            "name": "y",
            "payloadVersion": true
        }));
        assert!(result.is_err());
    }

    #[test]
    fn null_version_counts_as_absent() {
        let request = json!({
            "directive": { "header": { "payloadVersion": null } },
            "header": { "payloadVersion": "2" }
        });
        assert_eq!(detect(&request), DirectiveVersion::Legacy("2".into()));
    }

    #[test]
    fn unexpected_value_keeps_its_location() {
        let request = json!({ "directive": { "header": { "payloadVersion": "2" } } });
        assert_eq!(detect(&request), DirectiveVersion::Current("2".into()));
    }
}
