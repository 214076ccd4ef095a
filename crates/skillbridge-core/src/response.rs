// ── Response synthesis ──
//
// Wraps a `Dispatched` result in the envelope its directive's generation
// expects. Every response gets a fresh message id; every reported property
// shares one synthesis-time sample timestamp.

use chrono::{DateTime, Utc};
use serde::Serialize;
use skillbridge_api::{current, legacy};

use crate::convert::property_state;
use crate::directive::{CurrentDirective, Directive, LegacyDirective};
use crate::dispatch::{Dispatched, Outcome};
use crate::error::CoreError;
use crate::model::{Interface, MessageId};

/// `timeOfSample` layout: whole seconds, literal `.00` fraction, UTC.
pub const TIME_OF_SAMPLE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.00Z";

pub fn format_time_of_sample(at: DateTime<Utc>) -> String {
    at.format(TIME_OF_SAMPLE_FORMAT).to_string()
}

/// A complete outbound response of either generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseEnvelope {
    Current(current::EventEnvelope),
    Legacy(legacy::ResponseEnvelope),
}

impl ResponseEnvelope {
    pub fn namespace(&self) -> &str {
        match self {
            Self::Current(e) => &e.event.header.namespace,
            Self::Legacy(e) => &e.header.namespace,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Current(e) => &e.event.header.name,
            Self::Legacy(e) => &e.header.name,
        }
    }

    pub fn message_id(&self) -> &str {
        match self {
            Self::Current(e) => &e.event.header.message_id,
            Self::Legacy(e) => &e.header.message_id,
        }
    }

    /// Reported properties; empty for responses without a context block.
    pub fn properties(&self) -> &[current::PropertyState] {
        match self {
            Self::Current(current::EventEnvelope {
                context: Some(context),
                ..
            }) => &context.properties,
            _ => &[],
        }
    }

    pub fn to_value(&self) -> Result<serde_json::Value, CoreError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builds response envelopes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseSynthesizer;

impl ResponseSynthesizer {
    pub fn build(directive: &Directive, dispatched: Dispatched) -> Result<ResponseEnvelope, CoreError> {
        Self::build_at(directive, dispatched, Utc::now())
    }

    /// Build with an explicit sample time.
    pub fn build_at(
        directive: &Directive,
        dispatched: Dispatched,
        now: DateTime<Utc>,
    ) -> Result<ResponseEnvelope, CoreError> {
        match directive {
            Directive::Current(d) => Self::build_current(d, dispatched, now).map(ResponseEnvelope::Current),
            Directive::Legacy(d) => Self::build_legacy(d, dispatched).map(ResponseEnvelope::Legacy),
        }
    }

    fn build_current(
        directive: &CurrentDirective,
        dispatched: Dispatched,
        now: DateTime<Utc>,
    ) -> Result<current::EventEnvelope, CoreError> {
        let Dispatched {
            outcome,
            properties,
        } = dispatched;

        let (namespace, name, payload, echo_endpoint) = match outcome {
            Outcome::Discovery(endpoints) => (
                Interface::Discovery,
                "Discover.Response",
                current::EventPayload::Discovery(current::DiscoveryPayload {
                    endpoints: endpoints.iter().map(Into::into).collect(),
                }),
                false,
            ),
            Outcome::Response => (Interface::Alexa, "Response", empty_current(), true),
            Outcome::StateReport => (Interface::Alexa, "StateReport", empty_current(), true),
            Outcome::AcceptGrant => (
                Interface::Authorization,
                "AcceptGrant.Response",
                empty_current(),
                false,
            ),
            Outcome::LegacyDiscovery(_) | Outcome::LegacyConfirmation(_) => {
                return Err(CoreError::Internal(format!(
                    "legacy outcome for v3 directive {}/{}",
                    directive.header.namespace, directive.header.name
                )));
            }
        };

        let context = if properties.is_empty() {
            None
        } else {
            let time_of_sample = format_time_of_sample(now);
            Some(current::Context {
                properties: properties
                    .iter()
                    .map(|p| property_state(p, &time_of_sample))
                    .collect(),
            })
        };

        let endpoint = if echo_endpoint {
            directive.endpoint.as_ref().map(|e| current::EndpointAddress {
                scope: e.scope.clone(),
                endpoint_id: e.endpoint_id.clone(),
                cookie: None,
            })
        } else {
            None
        };

        Ok(current::EventEnvelope {
            context,
            event: current::Event {
                header: current::Header {
                    namespace: namespace.to_string(),
                    name: name.to_owned(),
                    payload_version: current::PAYLOAD_VERSION.to_owned(),
                    message_id: MessageId::random().to_string(),
                    correlation_token: directive.header.correlation_token.clone(),
                },
                endpoint,
                payload,
            },
        })
    }

    fn build_legacy(
        directive: &LegacyDirective,
        dispatched: Dispatched,
    ) -> Result<legacy::ResponseEnvelope, CoreError> {
        let (namespace, name, payload) = match dispatched.outcome {
            Outcome::LegacyDiscovery(appliances) => (
                legacy::DISCOVERY_NAMESPACE,
                legacy::DISCOVER_APPLIANCES_RESPONSE,
                legacy::ResponsePayload::Discovery(legacy::DiscoverAppliancesPayload {
                    discovered_appliances: appliances.iter().map(Into::into).collect(),
                }),
            ),
            Outcome::LegacyConfirmation(action) => {
                let name = action.confirmation_name().ok_or_else(|| {
                    CoreError::Internal(format!("{action:?} has no confirmation"))
                })?;
                (
                    legacy::CONTROL_NAMESPACE,
                    name,
                    legacy::ResponsePayload::Empty(legacy::EmptyPayload {}),
                )
            }
            other => {
                return Err(CoreError::Internal(format!(
                    "v3 outcome {other:?} for legacy directive {}/{}",
                    directive.header.namespace, directive.header.name
                )));
            }
        };

        Ok(legacy::ResponseEnvelope {
            header: legacy::Header {
                namespace: namespace.to_owned(),
                name: name.to_owned(),
                payload_version: legacy::PAYLOAD_VERSION.to_owned(),
                message_id: MessageId::random().to_string(),
            },
            payload,
        })
    }
}

fn empty_current() -> current::EventPayload {
    current::EventPayload::Empty(current::EmptyPayload {})
}
