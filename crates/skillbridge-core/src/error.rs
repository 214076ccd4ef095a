// ── Core error types ──
//
// Request-boundary errors from skillbridge-core. Each variant aborts the
// current request only; nothing here retries. Wire decoding failures from
// `skillbridge_api` and collaborator failures from `crate::ports` are folded
// into domain-appropriate variants.

use thiserror::Error;

use crate::ports::DeviceError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Routing errors ───────────────────────────────────────────────
    #[error("Malformed directive: {reason}")]
    MalformedDirective { reason: String },

    #[error("Unsupported v{version} directive: {namespace}/{name}")]
    UnsupportedDirective {
        version: String,
        namespace: String,
        name: String,
    },

    #[error("Unknown directive version: {found}")]
    UnknownVersion { found: String },

    #[error("Endpoint not found: {endpoint_id}")]
    EndpointNotFound { endpoint_id: String },

    // ── Collaborator errors ──────────────────────────────────────────
    #[error("Device communication failed: {message}")]
    DeviceCommunication { message: String },

    // ── Catalog errors ───────────────────────────────────────────────
    #[error("Catalog error: {message}")]
    Catalog { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Stable short label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedDirective { .. } => "malformed_directive",
            Self::UnsupportedDirective { .. } => "unsupported_directive",
            Self::UnknownVersion { .. } => "unknown_version",
            Self::EndpointNotFound { .. } => "endpoint_not_found",
            Self::DeviceCommunication { .. } => "device_communication",
            Self::Catalog { .. } => "catalog",
            Self::Serialization(_) => "serialization",
            Self::Internal(_) => "internal",
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedDirective {
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported(version: &str, namespace: &str, name: &str) -> Self {
        Self::UnsupportedDirective {
            version: version.to_owned(),
            namespace: namespace.to_owned(),
            name: name.to_owned(),
        }
    }
}

// ── Conversion from lower-layer errors ───────────────────────────────

impl From<skillbridge_api::Error> for CoreError {
    fn from(err: skillbridge_api::Error) -> Self {
        match err {
            skillbridge_api::Error::Deserialization { message, body: _ } => {
                Self::MalformedDirective { reason: message }
            }
        }
    }
}

impl From<DeviceError> for CoreError {
    fn from(err: DeviceError) -> Self {
        Self::DeviceCommunication {
            message: err.to_string(),
        }
    }
}
