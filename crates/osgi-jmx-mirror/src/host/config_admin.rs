use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use osgi_jmx::codec::{Properties, PropertyValue};
use uuid::Uuid;

use crate::error::MirrorError;
use crate::filter::Filter;

/// Filter attribute carrying a configuration's pid.
pub const SERVICE_PID: &str = "service.pid";
/// Filter attribute carrying a factory configuration's factory pid.
pub const SERVICE_FACTORY_PID: &str = "service.factoryPid";
/// Filter attribute carrying a configuration's bundle location.
pub const SERVICE_BUNDLE_LOCATION: &str = "service.bundleLocation";

/// Snapshot of a configuration held by a [`ConfigurationAdmin`].
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub pid: String,
    pub factory_pid: Option<String>,
    pub bundle_location: Option<String>,
    /// `None` until the configuration is first updated.
    pub properties: Option<Properties>,
}

impl Configuration {
    fn new(pid: String, factory_pid: Option<String>, location: Option<&str>) -> Self {
        Self {
            pid,
            factory_pid,
            bundle_location: location.map(str::to_string),
            properties: None,
        }
    }

    /// The dictionary a listing filter is evaluated against: the
    /// configuration's properties plus its identity attributes.
    pub fn filter_view(&self) -> Properties {
        let mut view = self.properties.clone().unwrap_or_default();
        view.insert(SERVICE_PID.into(), PropertyValue::from(self.pid.as_str()));
        if let Some(factory_pid) = &self.factory_pid {
            view.insert(
                SERVICE_FACTORY_PID.into(),
                PropertyValue::from(factory_pid.as_str()),
            );
        }
        if let Some(location) = &self.bundle_location {
            view.insert(
                SERVICE_BUNDLE_LOCATION.into(),
                PropertyValue::from(location.as_str()),
            );
        }
        view
    }
}

/// The configuration store managed by [`ConfigAdminManager`](crate::ConfigAdminManager).
pub trait ConfigurationAdmin: Send + Sync {
    /// Returns the configuration for `pid`, creating it bound to `location`
    /// if it does not exist yet.
    fn get_configuration(&self, pid: &str, location: Option<&str>) -> Configuration;

    /// Creates a configuration with a fresh pid derived from `factory_pid`.
    fn create_factory_configuration(
        &self,
        factory_pid: &str,
        location: Option<&str>,
    ) -> Configuration;

    /// Replaces the properties of an existing configuration.
    fn update(&self, pid: &str, properties: Properties) -> Result<(), MirrorError>;

    /// Applies `change` to the properties of an existing configuration as a
    /// single step, so concurrent changes to the same pid are not lost.
    fn modify_properties(
        &self,
        pid: &str,
        change: &mut dyn FnMut(&mut Option<Properties>),
    ) -> Result<(), MirrorError>;

    /// Removes a configuration. Returns false if it did not exist.
    fn delete(&self, pid: &str) -> bool;

    fn set_bundle_location(&self, pid: &str, location: Option<&str>) -> Result<(), MirrorError>;

    /// Configurations that have properties and match `filter` (all of them
    /// when `filter` is `None`).
    fn list_configurations(&self, filter: Option<&Filter>) -> Vec<Configuration>;
}

impl<T: ConfigurationAdmin + ?Sized> ConfigurationAdmin for Arc<T> {
    fn get_configuration(&self, pid: &str, location: Option<&str>) -> Configuration {
        (**self).get_configuration(pid, location)
    }

    fn create_factory_configuration(
        &self,
        factory_pid: &str,
        location: Option<&str>,
    ) -> Configuration {
        (**self).create_factory_configuration(factory_pid, location)
    }

    fn update(&self, pid: &str, properties: Properties) -> Result<(), MirrorError> {
        (**self).update(pid, properties)
    }

    fn modify_properties(
        &self,
        pid: &str,
        change: &mut dyn FnMut(&mut Option<Properties>),
    ) -> Result<(), MirrorError> {
        (**self).modify_properties(pid, change)
    }

    fn delete(&self, pid: &str) -> bool {
        (**self).delete(pid)
    }

    fn set_bundle_location(&self, pid: &str, location: Option<&str>) -> Result<(), MirrorError> {
        (**self).set_bundle_location(pid, location)
    }

    fn list_configurations(&self, filter: Option<&Filter>) -> Vec<Configuration> {
        (**self).list_configurations(filter)
    }
}

/// A [`ConfigurationAdmin`] backed by an in-process map.
#[derive(Debug, Default)]
pub struct InMemoryConfigurationAdmin {
    configurations: RwLock<BTreeMap<String, Configuration>>,
}

impl InMemoryConfigurationAdmin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of configurations, including ones never updated.
    pub fn len(&self) -> usize {
        self.configurations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ConfigurationAdmin for InMemoryConfigurationAdmin {
    fn get_configuration(&self, pid: &str, location: Option<&str>) -> Configuration {
        let mut configurations = self
            .configurations
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        configurations
            .entry(pid.to_string())
            .or_insert_with(|| Configuration::new(pid.to_string(), None, location))
            .clone()
    }

    fn create_factory_configuration(
        &self,
        factory_pid: &str,
        location: Option<&str>,
    ) -> Configuration {
        let pid = format!("{factory_pid}.{}", Uuid::new_v4());
        let configuration =
            Configuration::new(pid.clone(), Some(factory_pid.to_string()), location);
        self.configurations
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(pid, configuration.clone());
        configuration
    }

    fn update(&self, pid: &str, properties: Properties) -> Result<(), MirrorError> {
        let mut configurations = self
            .configurations
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let configuration = configurations
            .get_mut(pid)
            .ok_or_else(|| MirrorError::ConfigurationNotFound(pid.to_string()))?;
        configuration.properties = Some(properties);
        Ok(())
    }

    fn modify_properties(
        &self,
        pid: &str,
        change: &mut dyn FnMut(&mut Option<Properties>),
    ) -> Result<(), MirrorError> {
        let mut configurations = self
            .configurations
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let configuration = configurations
            .get_mut(pid)
            .ok_or_else(|| MirrorError::ConfigurationNotFound(pid.to_string()))?;
        change(&mut configuration.properties);
        Ok(())
    }

    fn delete(&self, pid: &str) -> bool {
        self.configurations
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(pid)
            .is_some()
    }

    fn set_bundle_location(&self, pid: &str, location: Option<&str>) -> Result<(), MirrorError> {
        let mut configurations = self
            .configurations
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let configuration = configurations
            .get_mut(pid)
            .ok_or_else(|| MirrorError::ConfigurationNotFound(pid.to_string()))?;
        configuration.bundle_location = location.map(str::to_string);
        Ok(())
    }

    fn list_configurations(&self, filter: Option<&Filter>) -> Vec<Configuration> {
        self.configurations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|c| c.properties.is_some())
            .filter(|c| filter.is_none_or(|f| f.matches(&c.filter_view())))
            .cloned()
            .collect()
    }
}
