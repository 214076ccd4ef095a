//! Wire schema for voice-assistant smart home directives.
//!
//! Two API generations share the same transport but disagree on nearly
//! everything else:
//!
//! - **[`legacy`]**: the appliance-centric v2 schema
//!   (`{ "header": ..., "payload": ... }`).
//! - **[`current`]**: the endpoint/capability-centric v3 schema
//!   (`{ "directive": { "header": ..., "endpoint": ..., "payload": ... } }`
//!   inbound, `{ "context": ..., "event": ... }` outbound).
//!
//! [`version::detect`] classifies a raw JSON request before any typed
//! decoding happens. This crate does no I/O; it only knows shapes.

pub mod current;
pub mod error;
pub mod legacy;
pub mod version;

pub use error::Error;
pub use version::{DirectiveVersion, detect};

use serde::de::DeserializeOwned;

/// Decode a typed wire structure out of a raw JSON value.
///
/// On failure the offending document is kept (compact-serialized) in the
/// error so callers can log exactly what arrived.
pub fn decode<T: DeserializeOwned>(value: &serde_json::Value) -> Result<T, Error> {
    T::deserialize(value).map_err(|e| {
        tracing::debug!(error = %e, "wire decoding failed");
        Error::Deserialization {
            message: e.to_string(),
            body: value.to_string(),
        }
    })
}
