use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::schema::{self, CompositeSchema, OpenRecord};

/// Service registry event types, with their framework codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceEventType {
    Registered,
    Modified,
    Unregistering,
    ModifiedEndmatch,
}

impl ServiceEventType {
    pub fn code(self) -> i32 {
        match self {
            ServiceEventType::Registered => 1,
            ServiceEventType::Modified => 2,
            ServiceEventType::Unregistering => 4,
            ServiceEventType::ModifiedEndmatch => 8,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(ServiceEventType::Registered),
            2 => Some(ServiceEventType::Modified),
            4 => Some(ServiceEventType::Unregistering),
            8 => Some(ServiceEventType::ModifiedEndmatch),
            _ => None,
        }
    }
}

/// A change to a service registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEvent {
    pub service_id: i64,
    pub bundle_id: i64,
    pub bundle_location: String,
    /// Interfaces the service is registered under.
    pub object_class: Vec<String>,
    pub event_type: ServiceEventType,
}

/// Encoded form of a [`ServiceEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEventData {
    #[serde(rename = "Identifier")]
    pub service_id: i64,
    #[serde(rename = "BundleIdentifier")]
    pub bundle_id: i64,
    #[serde(rename = "BundleLocation")]
    pub bundle_location: String,
    #[serde(rename = "ObjectClass")]
    pub object_class: Vec<String>,
    #[serde(rename = "EventType")]
    pub event_type: i32,
}

impl OpenRecord for ServiceEventData {
    const SCHEMA: &'static CompositeSchema = &schema::SERVICE_EVENT;
}

impl ServiceEventData {
    pub fn encode(event: &ServiceEvent) -> Self {
        Self {
            service_id: event.service_id,
            bundle_id: event.bundle_id,
            bundle_location: event.bundle_location.clone(),
            object_class: event.object_class.clone(),
            event_type: event.event_type.code(),
        }
    }

    pub fn decode(&self) -> Result<ServiceEvent, CodecError> {
        let event_type =
            ServiceEventType::from_code(self.event_type).ok_or_else(|| CodecError::InvalidItem {
                item: schema::EVENT_TYPE,
                reason: format!("unknown event type {}", self.event_type),
            })?;
        Ok(ServiceEvent {
            service_id: self.service_id,
            bundle_id: self.bundle_id,
            bundle_location: self.bundle_location.clone(),
            object_class: self.object_class.clone(),
            event_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> ServiceEvent {
        ServiceEvent {
            service_id: 42,
            bundle_id: 7,
            bundle_location: "file:bundles/log.jar".into(),
            object_class: vec!["org.osgi.service.log.LogService".into()],
            event_type: ServiceEventType::Unregistering,
        }
    }

    #[test]
    fn test_event_roundtrip() {
        let data = ServiceEventData::encode(&event());
        assert_eq!(data.event_type, 4);
        assert_eq!(data.decode().unwrap(), event());
    }

    #[test]
    fn test_unknown_event_type() {
        let mut data = ServiceEventData::encode(&event());
        data.event_type = 3;
        assert!(data.decode().is_err());
    }

    #[test]
    fn test_item_names_match_schema() {
        let json = serde_json::to_value(ServiceEventData::encode(&event())).unwrap();
        let object = json.as_object().unwrap();
        let names: Vec<&str> = ServiceEventData::SCHEMA.item_names().collect();
        assert_eq!(object.len(), names.len());
        for name in names {
            assert!(object.contains_key(name), "missing item {name}");
        }
    }
}
