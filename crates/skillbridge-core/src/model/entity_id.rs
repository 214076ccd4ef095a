// ── Core identity types ──
//
// EndpointId names an appliance in the catalog and, identically, the
// endpoint projected from it. MessageId is the fresh identifier stamped on
// every outbound response.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── EndpointId ──────────────────────────────────────────────────────

/// Identifier shared by a legacy appliance (`applianceId`) and its current
/// endpoint (`endpointId`). Opaque; compared byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointId(String);

impl EndpointId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EndpointId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<String> for EndpointId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EndpointId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl Borrow<str> for EndpointId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// ── MessageId ───────────────────────────────────────────────────────

/// Random per-response message identifier (UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for MessageId {
    fn from(u: Uuid) -> Self {
        Self(u)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn endpoint_id_display_round_trips_raw_value() {
        let id: EndpointId = "endpoint-004".parse().unwrap();
        assert_eq!(id.to_string(), "endpoint-004");
    }

    #[test]
    fn endpoint_id_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(EndpointId::from("endpoint-004"), 1);
        assert_eq!(map.get("endpoint-004"), Some(&1));
    }

    #[test]
    fn blank_endpoint_id_is_empty() {
        assert!(EndpointId::from("  ").is_empty());
        assert!(!EndpointId::from("a").is_empty());
    }

    #[test]
    fn message_ids_are_fresh() {
        assert_ne!(MessageId::random(), MessageId::random());
    }

    #[test]
    fn message_id_serializes_as_hyphenated_uuid() {
        let uuid = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        let json = serde_json::to_string(&MessageId::from(uuid)).unwrap();
        assert_eq!(json, "\"550e8400-e29b-41d4-a716-446655440000\"");
    }
}
