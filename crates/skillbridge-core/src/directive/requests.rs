// ── Typed payloads for current-generation directives ──
//
// Each directive that carries data decodes its opaque payload map into one
// of these structs. Unknown payload fields are ignored.

use serde::Deserialize;

use crate::model::TemperatureScale;

/// A temperature or temperature delta with an optional scale.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Measurement {
    pub value: f64,
    /// Absent means Celsius.
    #[serde(default)]
    pub scale: Option<TemperatureScale>,
}

impl Measurement {
    pub fn scale(&self) -> TemperatureScale {
        self.scale.unwrap_or_default()
    }
}

// ── ThermostatController ───────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetTargetTemperatureRequest {
    pub target_setpoint: Measurement,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustTargetTemperatureRequest {
    pub target_setpoint_delta: Measurement,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetThermostatModeRequest {
    pub thermostat_mode: ModeValue,
}

/// Mode names are kept raw so unknown modes can be accepted as a no-op.
#[derive(Debug, Clone, Deserialize)]
pub struct ModeValue {
    pub value: String,
}

// ── Authorization ──────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct AcceptGrantRequest {
    pub grant: GrantBody,
    #[serde(default)]
    pub grantee: Option<GranteeBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GrantBody {
    #[serde(rename = "type")]
    pub kind: String,
    pub code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GranteeBody {
    #[serde(rename = "type")]
    pub kind: String,
    pub token: String,
}
