//! Management view of the service registry.

use std::sync::atomic::{AtomicU64, Ordering};

use osgi_jmx::codec::{PropertyTable, encode_table};
use osgi_jmx::records::{ServiceEvent, ServiceEventData};

use crate::error::MirrorError;
use crate::host::{ServiceReference, ServiceRegistry};

/// Notification type of service events.
pub const SERVICE_EVENT_TYPE: &str = "org.osgi.service.jmx.framework.ServiceEvent";

/// A service event ready to be broadcast to management clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub notification_type: &'static str,
    /// Strictly increasing per [`ServiceState`].
    pub sequence_number: u64,
    pub data: ServiceEventData,
}

/// Summary row of [`ServiceState::get_services`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSummary {
    pub id: i64,
    pub bundle_id: i64,
    pub interfaces: Vec<String>,
    pub using_bundles: Vec<i64>,
}

impl From<&ServiceReference> for ServiceSummary {
    fn from(service: &ServiceReference) -> Self {
        Self {
            id: service.id,
            bundle_id: service.bundle_id,
            interfaces: service.object_class(),
            using_bundles: service.using_bundles.clone(),
        }
    }
}

/// Exposes a [`ServiceRegistry`] by service id and turns registry events
/// into numbered notifications.
pub struct ServiceState<R: ServiceRegistry> {
    registry: R,
    sequence_number: AtomicU64,
}

impl<R: ServiceRegistry> ServiceState<R> {
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            sequence_number: AtomicU64::new(0),
        }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    fn service(&self, id: i64) -> Result<ServiceReference, MirrorError> {
        self.registry
            .service(id)
            .ok_or(MirrorError::ServiceNotFound(id))
    }

    /// Id of the bundle that registered service `id`.
    pub fn get_bundle(&self, id: i64) -> Result<i64, MirrorError> {
        Ok(self.service(id)?.bundle_id)
    }

    pub fn get_properties(&self, id: i64) -> Result<PropertyTable, MirrorError> {
        Ok(encode_table(&self.service(id)?.properties)?)
    }

    pub fn get_service_interfaces(&self, id: i64) -> Result<Vec<String>, MirrorError> {
        Ok(self.service(id)?.object_class())
    }

    pub fn get_using_bundles(&self, id: i64) -> Result<Vec<i64>, MirrorError> {
        self.registry
            .using_bundles(id)
            .ok_or(MirrorError::ServiceNotFound(id))
    }

    pub fn get_services(&self) -> Vec<ServiceSummary> {
        self.registry
            .services()
            .iter()
            .map(ServiceSummary::from)
            .collect()
    }

    /// Wraps `event` in the next notification.
    pub fn service_changed(&self, event: &ServiceEvent) -> Notification {
        let sequence_number = self.sequence_number.fetch_add(1, Ordering::Relaxed);

        #[cfg(feature = "logging")]
        log::trace!(
            "Service {} event {:?} (#{sequence_number})",
            event.service_id,
            event.event_type
        );

        Notification {
            notification_type: SERVICE_EVENT_TYPE,
            sequence_number,
            data: ServiceEventData::encode(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::InMemoryServiceRegistry;
    use osgi_jmx::codec::{Properties, PropertyValue};
    use osgi_jmx::records::ServiceEventType;

    fn state() -> ServiceState<InMemoryServiceRegistry> {
        ServiceState::new(InMemoryServiceRegistry::new())
    }

    #[test]
    fn test_unknown_service() {
        let state = state();
        assert!(matches!(state.get_bundle(99), Err(MirrorError::ServiceNotFound(99))));
        assert!(matches!(
            state.get_using_bundles(99),
            Err(MirrorError::ServiceNotFound(99))
        ));
    }

    #[test]
    fn test_service_views() {
        let state = state();
        let mut properties = Properties::new();
        properties.insert("service.ranking".into(), PropertyValue::from(10));
        let event = state
            .registry()
            .register(5, "file:http.jar", &["org.example.Http"], properties);
        let id = event.service_id;
        state.registry().add_using_bundle(id, 8);

        assert_eq!(state.get_bundle(id).unwrap(), 5);
        assert_eq!(state.get_service_interfaces(id).unwrap(), vec!["org.example.Http"]);
        assert_eq!(state.get_using_bundles(id).unwrap(), vec![8]);

        let table = state.get_properties(id).unwrap();
        assert_eq!(table.get("objectClass").unwrap().type_tag, "Array of String");
        assert_eq!(table.get("service.id").unwrap().type_tag, "Long");
        assert_eq!(table.get("service.ranking").unwrap().value, "10");

        let services = state.get_services();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].using_bundles, vec![8]);
    }

    #[test]
    fn test_notifications_are_numbered() {
        let state = state();
        let registered = state
            .registry()
            .register(1, "file:a.jar", &["a.A"], Properties::new());
        let unregistering = state
            .registry()
            .unregister(registered.service_id)
            .unwrap();

        let first = state.service_changed(&registered);
        let second = state.service_changed(&unregistering);
        assert_eq!(first.notification_type, SERVICE_EVENT_TYPE);
        assert!(second.sequence_number > first.sequence_number);
        assert_eq!(
            second.data.decode().unwrap().event_type,
            ServiceEventType::Unregistering
        );
    }
}
