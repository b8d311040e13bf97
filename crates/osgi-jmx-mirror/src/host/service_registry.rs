use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use osgi_jmx::codec::{Properties, PropertyValue, ScalarArray};
use osgi_jmx::records::{ServiceEvent, ServiceEventType};

/// Service property holding the registered interface names.
pub const OBJECT_CLASS: &str = "objectClass";
/// Service property holding the registry-assigned id.
pub const SERVICE_ID: &str = "service.id";

/// A registered service as seen by [`ServiceState`](crate::ServiceState).
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceReference {
    pub id: i64,
    pub bundle_id: i64,
    pub bundle_location: String,
    pub properties: Properties,
    pub using_bundles: Vec<i64>,
}

impl ServiceReference {
    /// Interfaces the service is registered under.
    pub fn object_class(&self) -> Vec<String> {
        self.properties
            .get(OBJECT_CLASS)
            .and_then(PropertyValue::as_string_array)
            .map(<[String]>::to_vec)
            .unwrap_or_default()
    }

    pub fn event(&self, event_type: ServiceEventType) -> ServiceEvent {
        ServiceEvent {
            service_id: self.id,
            bundle_id: self.bundle_id,
            bundle_location: self.bundle_location.clone(),
            object_class: self.object_class(),
            event_type,
        }
    }
}

pub trait ServiceRegistry: Send + Sync {
    fn service(&self, id: i64) -> Option<ServiceReference>;

    /// Every registered service, ordered by id.
    fn services(&self) -> Vec<ServiceReference>;

    /// Ids of the bundles currently using service `id`.
    fn using_bundles(&self, id: i64) -> Option<Vec<i64>> {
        self.service(id).map(|s| s.using_bundles)
    }
}

impl<T: ServiceRegistry + ?Sized> ServiceRegistry for Arc<T> {
    fn service(&self, id: i64) -> Option<ServiceReference> {
        (**self).service(id)
    }

    fn services(&self) -> Vec<ServiceReference> {
        (**self).services()
    }

    fn using_bundles(&self, id: i64) -> Option<Vec<i64>> {
        (**self).using_bundles(id)
    }
}

#[derive(Debug, Default)]
struct Registry {
    next_id: i64,
    services: BTreeMap<i64, ServiceReference>,
}

/// A [`ServiceRegistry`] backed by an in-process map. Mutations return the
/// [`ServiceEvent`] a framework would broadcast.
#[derive(Debug, Default)]
pub struct InMemoryServiceRegistry {
    inner: RwLock<Registry>,
}

impl InMemoryServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a service, assigning the next id and setting `service.id`
    /// and `objectClass`.
    pub fn register(
        &self,
        bundle_id: i64,
        bundle_location: &str,
        object_class: &[&str],
        mut properties: Properties,
    ) -> ServiceEvent {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.next_id += 1;
        let id = inner.next_id;
        properties.insert(SERVICE_ID.into(), PropertyValue::from(id));
        properties.insert(
            OBJECT_CLASS.into(),
            ScalarArray::String(object_class.iter().map(|c| c.to_string()).collect()).into(),
        );
        let service = ServiceReference {
            id,
            bundle_id,
            bundle_location: bundle_location.to_string(),
            properties,
            using_bundles: Vec::new(),
        };
        let event = service.event(ServiceEventType::Registered);
        inner.services.insert(id, service);
        event
    }

    /// Replaces the service's properties, keeping `service.id` and `objectClass`.
    pub fn modify(&self, id: i64, mut properties: Properties) -> Option<ServiceEvent> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let service = inner.services.get_mut(&id)?;
        for key in [SERVICE_ID, OBJECT_CLASS] {
            if let Some(value) = service.properties.remove(key) {
                properties.insert(key.to_string(), value);
            }
        }
        service.properties = properties;
        Some(service.event(ServiceEventType::Modified))
    }

    pub fn unregister(&self, id: i64) -> Option<ServiceEvent> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner
            .services
            .remove(&id)
            .map(|s| s.event(ServiceEventType::Unregistering))
    }

    /// Records that `bundle_id` obtained the service. Returns false if the
    /// service is unknown.
    pub fn add_using_bundle(&self, id: i64, bundle_id: i64) -> bool {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        match inner.services.get_mut(&id) {
            Some(service) => {
                if !service.using_bundles.contains(&bundle_id) {
                    service.using_bundles.push(bundle_id);
                }
                true
            }
            None => false,
        }
    }
}

impl ServiceRegistry for InMemoryServiceRegistry {
    fn service(&self, id: i64) -> Option<ServiceReference> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .services
            .get(&id)
            .cloned()
    }

    fn services(&self) -> Vec<ServiceReference> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .services
            .values()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_assigns_ids_and_identity_properties() {
        let registry = InMemoryServiceRegistry::new();
        let first = registry.register(3, "file:log.jar", &["org.example.Log"], Properties::new());
        let second = registry.register(3, "file:log.jar", &["a.A", "b.B"], Properties::new());
        assert_eq!(first.service_id, 1);
        assert_eq!(second.service_id, 2);
        assert_eq!(first.event_type, ServiceEventType::Registered);

        let service = registry.service(2).unwrap();
        assert_eq!(service.object_class(), vec!["a.A", "b.B"]);
        assert_eq!(service.properties.get(SERVICE_ID), Some(&PropertyValue::from(2i64)));
    }

    #[test]
    fn test_modify_keeps_identity_properties() {
        let registry = InMemoryServiceRegistry::new();
        let id = registry
            .register(1, "file:a.jar", &["a.A"], Properties::new())
            .service_id;
        let mut properties = Properties::new();
        properties.insert("ranking".into(), PropertyValue::from(5));
        let event = registry.modify(id, properties).unwrap();
        assert_eq!(event.event_type, ServiceEventType::Modified);

        let service = registry.service(id).unwrap();
        assert_eq!(service.properties.len(), 3);
        assert_eq!(service.object_class(), vec!["a.A"]);
    }

    #[test]
    fn test_unregister_and_using_bundles() {
        let registry = InMemoryServiceRegistry::new();
        let id = registry
            .register(1, "file:a.jar", &["a.A"], Properties::new())
            .service_id;
        assert!(registry.add_using_bundle(id, 9));
        assert!(registry.add_using_bundle(id, 9));
        assert_eq!(registry.using_bundles(id), Some(vec![9]));

        let event = registry.unregister(id).unwrap();
        assert_eq!(event.event_type, ServiceEventType::Unregistering);
        assert!(registry.service(id).is_none());
        assert!(registry.unregister(id).is_none());
        assert!(!registry.add_using_bundle(id, 9));
    }
}
