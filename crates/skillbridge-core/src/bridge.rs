// ── Request facade ──
//
// One call per directive: detect the generation, decode, dispatch, then
// synthesize the response. Same-endpoint directives are serialized so a
// state report always reflects the directive's own mutation.

use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;
use serde_json::Value;
use skillbridge_api::{DirectiveVersion, current, legacy};
use tracing::{debug, info, warn};

use crate::catalog::ApplianceCatalog;
use crate::config::BridgeConfig;
use crate::directive::{CurrentDirective, Directive, LegacyDirective};
use crate::dispatch::Dispatcher;
use crate::error::CoreError;
use crate::model::EndpointId;
use crate::ports::{DeviceControl, EnvironmentSensor, GrantRecorder};
use crate::response::{ResponseEnvelope, ResponseSynthesizer};

/// Entry point for hosts. Cheaply cloneable via `Arc<BridgeInner>`.
#[derive(Clone, Debug)]
pub struct Bridge {
    inner: Arc<BridgeInner>,
}

#[derive(Debug)]
struct BridgeInner {
    dispatcher: Dispatcher,
    endpoint_locks: DashMap<EndpointId, Arc<Mutex<()>>>,
}

impl Bridge {
    pub fn new(
        catalog: Arc<ApplianceCatalog>,
        device: Arc<dyn DeviceControl>,
        sensor: Arc<dyn EnvironmentSensor>,
    ) -> Self {
        Self::with_dispatcher(Dispatcher::new(catalog, device, sensor))
    }

    pub fn with_dispatcher(dispatcher: Dispatcher) -> Self {
        Self {
            inner: Arc::new(BridgeInner {
                dispatcher,
                endpoint_locks: DashMap::new(),
            }),
        }
    }

    /// Assemble catalog, device and sensor from configuration.
    pub fn from_config(config: &BridgeConfig) -> Result<Self, CoreError> {
        let catalog = Arc::new(config.catalog.load()?);
        let device = config.device.build()?;
        let sensor = config.sensor.build();
        info!(appliances = catalog.len(), "bridge ready");
        Ok(Self::new(catalog, device, sensor))
    }

    /// Same bridge with a grant recorder for `AcceptGrant`.
    #[must_use]
    pub fn with_grant_recorder(self, recorder: Arc<dyn GrantRecorder>) -> Self {
        Self::with_dispatcher(self.inner.dispatcher.clone().with_grant_recorder(recorder))
    }

    pub fn catalog(&self) -> &Arc<ApplianceCatalog> {
        self.inner.dispatcher.catalog()
    }

    /// Handle one raw directive.
    pub fn handle(&self, raw: &Value) -> Result<ResponseEnvelope, CoreError> {
        debug!(directive = %raw, "inbound directive");

        let version = skillbridge_api::detect(raw);
        let directive = match &version {
            DirectiveVersion::Current(v) if v == current::PAYLOAD_VERSION => {
                Directive::Current(CurrentDirective::decode(raw)?)
            }
            DirectiveVersion::Legacy(v) if v == legacy::PAYLOAD_VERSION => {
                Directive::Legacy(LegacyDirective::decode(raw)?)
            }
            other => {
                warn!(version = %other, "cannot route directive version");
                return Err(CoreError::UnknownVersion {
                    found: other.as_str().to_owned(),
                });
            }
        };

        info!(
            version = %version,
            namespace = directive.namespace(),
            name = directive.name(),
            endpoint_id = directive.endpoint_id().unwrap_or_default(),
            "routing directive"
        );

        let locks = self.locks_for(&directive)?;
        let _guards: Vec<_> = locks
            .iter()
            .map(|lock| lock.lock().unwrap_or_else(PoisonError::into_inner))
            .collect();

        let dispatched = self.inner.dispatcher.dispatch(&directive)?;
        let response = ResponseSynthesizer::build(&directive, dispatched)?;

        debug!(
            namespace = response.namespace(),
            name = response.name(),
            message_id = response.message_id(),
            "outbound response"
        );
        Ok(response)
    }

    /// Handle a directive given as JSON text; returns compact JSON.
    pub fn handle_json(&self, raw: &str) -> Result<String, CoreError> {
        let value: Value = serde_json::from_str(raw).map_err(|e| CoreError::MalformedDirective {
            reason: format!("invalid JSON: {e}"),
        })?;
        self.handle(&value)?.to_json()
    }

    /// Locks guarding a directive, in catalog order.
    ///
    /// Addressed v3 directives lock their endpoint. v2 control locks the
    /// named appliance, or every catalog endpoint when the request names
    /// none. Discovery and authorization touch no device and lock nothing.
    /// Ids outside the catalog are rejected here, so the lock map never
    /// outgrows the catalog.
    fn locks_for(&self, directive: &Directive) -> Result<Vec<Arc<Mutex<()>>>, CoreError> {
        let target = match directive {
            Directive::Current(d) if d.action.addresses_endpoint() => directive.endpoint_id(),
            Directive::Legacy(d) if d.action.controls_device() => match d.appliance_id() {
                Some(id) => Some(id),
                None => {
                    return Ok(self
                        .catalog()
                        .appliances()
                        .map(|a| self.endpoint_lock(a.id.as_str()))
                        .collect());
                }
            },
            _ => None,
        };

        match target {
            None => Ok(Vec::new()),
            Some(id) if self.catalog().contains(id) => Ok(vec![self.endpoint_lock(id)]),
            Some(id) => Err(CoreError::EndpointNotFound {
                endpoint_id: id.to_owned(),
            }),
        }
    }

    fn endpoint_lock(&self, endpoint_id: &str) -> Arc<Mutex<()>> {
        if let Some(lock) = self.inner.endpoint_locks.get(endpoint_id) {
            return Arc::clone(lock.value());
        }
        Arc::clone(
            self.inner
                .endpoint_locks
                .entry(EndpointId::from(endpoint_id))
                .or_default()
                .value(),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::devices::{FixedReading, SimulatedThermostat};

    fn bridge() -> Bridge {
        Bridge::new(
            Arc::new(ApplianceCatalog::sample()),
            Arc::new(SimulatedThermostat::default()),
            Arc::new(FixedReading(21.0)),
        )
    }

    fn turn_on(endpoint_id: &str) -> Value {
        json!({
            "directive": {
                "header": {
                    "namespace": "Alexa.PowerController",
                    "name": "TurnOn",
                    "payloadVersion": "3",
                    "messageId": "m"
                },
                "endpoint": {"endpointId": endpoint_id},
                "payload": {}
            }
        })
    }

    fn v2(namespace: &str, name: &str, payload: &Value) -> Value {
        json!({
            "header": {
                "namespace": namespace,
                "name": name,
                "payloadVersion": "2",
                "messageId": "m"
            },
            "payload": payload
        })
    }

    #[test]
    fn unknown_endpoints_never_allocate_locks() {
        let bridge = bridge();
        for n in 0..1000 {
            let err = bridge.handle(&turn_on(&format!("made-up-{n}"))).unwrap_err();
            assert!(matches!(err, CoreError::EndpointNotFound { .. }));
        }
        let err = bridge
            .handle(&v2(
                legacy::CONTROL_NAMESPACE,
                "TurnOnRequest",
                &json!({"appliance": {"applianceId": "made-up"}}),
            ))
            .unwrap_err();
        assert!(matches!(err, CoreError::EndpointNotFound { .. }));
        assert_eq!(bridge.inner.endpoint_locks.len(), 0);
    }

    #[test]
    fn discovery_takes_no_lock() {
        let bridge = bridge();
        bridge
            .handle(&v2(legacy::DISCOVERY_NAMESPACE, "DiscoverAppliancesRequest", &json!({})))
            .unwrap();
        assert_eq!(bridge.inner.endpoint_locks.len(), 0);
    }

    #[test]
    fn control_locks_only_catalog_endpoints() {
        let bridge = bridge();
        bridge.handle(&turn_on("endpoint-004")).unwrap();
        bridge
            .handle(&v2(legacy::CONTROL_NAMESPACE, "TurnOffRequest", &json!({})))
            .unwrap();
        assert_eq!(bridge.inner.endpoint_locks.len(), 1);
        assert!(bridge.inner.endpoint_locks.contains_key("endpoint-004"));
    }
}
