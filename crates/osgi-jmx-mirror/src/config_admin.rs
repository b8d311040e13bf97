//! Management view of the configuration admin service.

use osgi_jmx::codec::{PropertyTable, decode_table, decode_value, encode_table};

use crate::error::MirrorError;
use crate::filter::{self, Filter};
use crate::host::ConfigurationAdmin;

/// Exposes a [`ConfigurationAdmin`] through string and table arguments.
///
/// Operations that take a `location` get or create the configuration bound
/// to that bundle location; `None` leaves it unbound. Property values arrive
/// as text plus a type tag and go through the codec.
pub struct ConfigAdminManager<A: ConfigurationAdmin> {
    admin: A,
}

impl<A: ConfigurationAdmin> ConfigAdminManager<A> {
    pub fn new(admin: A) -> Self {
        Self { admin }
    }

    pub fn admin(&self) -> &A {
        &self.admin
    }

    /// Sets property `name` on configuration `pid`, decoding `value` per `type_tag`.
    pub fn add_property(
        &self,
        pid: &str,
        location: Option<&str>,
        name: &str,
        value: &str,
        type_tag: &str,
    ) -> Result<(), MirrorError> {
        let value = decode_value(type_tag, value)?;
        self.admin.get_configuration(pid, location);

        #[cfg(feature = "logging")]
        log::debug!("Setting {name} on configuration {pid}");

        self.admin.modify_properties(pid, &mut |properties| {
            properties
                .get_or_insert_with(Default::default)
                .insert(name.to_string(), value.clone());
        })
    }

    /// Sets property `name` on every configuration matching `filter`.
    /// Returns the number of configurations updated.
    pub fn add_property_to_configurations(
        &self,
        filter: &str,
        name: &str,
        value: &str,
        type_tag: &str,
    ) -> Result<usize, MirrorError> {
        let value = decode_value(type_tag, value)?;
        let filter = filter::parse_argument(filter)?;
        let configurations = self.admin.list_configurations(Some(&filter));
        for configuration in &configurations {
            self.admin.modify_properties(&configuration.pid, &mut |properties| {
                properties
                    .get_or_insert_with(Default::default)
                    .insert(name.to_string(), value.clone());
            })?;
        }

        #[cfg(feature = "logging")]
        log::debug!(
            "Set {name} on {} configurations matching {filter}",
            configurations.len()
        );

        Ok(configurations.len())
    }

    /// Creates a factory configuration and returns its pid.
    pub fn create_factory_configuration(
        &self,
        factory_pid: &str,
        location: Option<&str>,
    ) -> String {
        let configuration = self.admin.create_factory_configuration(factory_pid, location);

        #[cfg(feature = "logging")]
        log::debug!("Created configuration {} for factory {factory_pid}", configuration.pid);

        configuration.pid
    }

    pub fn delete(&self, pid: &str, location: Option<&str>) {
        self.admin.get_configuration(pid, location);
        self.admin.delete(pid);

        #[cfg(feature = "logging")]
        log::debug!("Deleted configuration {pid}");
    }

    /// Deletes every configuration matching `filter`. Returns how many were deleted.
    pub fn delete_configurations(&self, filter: &str) -> Result<usize, MirrorError> {
        let filter = filter::parse_argument(filter)?;
        let mut deleted = 0;
        for configuration in self.admin.list_configurations(Some(&filter)) {
            if self.admin.delete(&configuration.pid) {
                deleted += 1;
            }
        }

        #[cfg(feature = "logging")]
        log::debug!("Deleted {deleted} configurations matching {filter}");

        Ok(deleted)
    }

    /// Removes property `key` from configuration `pid`. A configuration that
    /// was never updated is left alone.
    pub fn delete_property(
        &self,
        pid: &str,
        location: Option<&str>,
        key: &str,
    ) -> Result<(), MirrorError> {
        self.admin.get_configuration(pid, location);
        self.admin.modify_properties(pid, &mut |properties| {
            if let Some(properties) = properties {
                properties.remove(key);
            }
        })
    }

    /// Removes property `key` from every configuration matching `filter`.
    pub fn delete_property_from_configurations(
        &self,
        filter: &str,
        key: &str,
    ) -> Result<(), MirrorError> {
        let filter = filter::parse_argument(filter)?;
        for configuration in self.admin.list_configurations(Some(&filter)) {
            self.admin.modify_properties(&configuration.pid, &mut |properties| {
                if let Some(properties) = properties {
                    properties.remove(key);
                }
            })?;
        }
        Ok(())
    }

    pub fn get_bundle_location(&self, pid: &str) -> Option<String> {
        self.admin.get_configuration(pid, None).bundle_location
    }

    pub fn get_factory_pid(&self, pid: &str, location: Option<&str>) -> Option<String> {
        self.admin.get_configuration(pid, location).factory_pid
    }

    /// The encoded properties of `pid`, or `None` if it was never updated.
    pub fn get_properties(
        &self,
        pid: &str,
        location: Option<&str>,
    ) -> Result<Option<PropertyTable>, MirrorError> {
        match self.admin.get_configuration(pid, location).properties {
            Some(properties) => Ok(Some(encode_table(&properties)?)),
            None => Ok(None),
        }
    }

    /// `(pid, bundle location)` of each configuration matching `filter`, or
    /// of every configuration when `filter` is `None`.
    pub fn list_configurations(
        &self,
        filter: Option<&str>,
    ) -> Result<Vec<(String, Option<String>)>, MirrorError> {
        let filter: Option<Filter> = filter.map(filter::parse_argument).transpose()?;
        Ok(self
            .admin
            .list_configurations(filter.as_ref())
            .into_iter()
            .map(|c| (c.pid, c.bundle_location))
            .collect())
    }

    pub fn set_bundle_location(
        &self,
        pid: &str,
        location: Option<&str>,
    ) -> Result<(), MirrorError> {
        self.admin.get_configuration(pid, None);
        self.admin.set_bundle_location(pid, location)
    }

    /// Replaces the properties of `pid` with the decoded `table`.
    pub fn update(
        &self,
        pid: &str,
        location: Option<&str>,
        table: &PropertyTable,
    ) -> Result<(), MirrorError> {
        let properties = decode_table(table)?;
        self.admin.get_configuration(pid, location);

        #[cfg(feature = "logging")]
        log::debug!("Updating configuration {pid} with {} properties", properties.len());

        self.admin.update(pid, properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::InMemoryConfigurationAdmin;
    use osgi_jmx::codec::{PrimitiveArray, PropertyRow, PropertyValue};

    fn manager() -> ConfigAdminManager<InMemoryConfigurationAdmin> {
        ConfigAdminManager::new(InMemoryConfigurationAdmin::new())
    }

    #[test]
    fn test_add_property_decodes_typed_text() {
        let manager = manager();
        manager
            .add_property("org.example", None, "ports", "80, 443", "Array of int")
            .unwrap();
        let table = manager.get_properties("org.example", None).unwrap().unwrap();
        assert_eq!(table.get("ports").unwrap().value, "80,443");

        let stored = manager.admin().get_configuration("org.example", None);
        assert_eq!(
            stored.properties.unwrap()["ports"],
            PropertyValue::from(PrimitiveArray::Int(vec![80, 443]))
        );
    }

    #[test]
    fn test_bad_type_tag_leaves_configuration_untouched() {
        let manager = manager();
        let err = manager
            .add_property("org.example", None, "x", "1", "Array int")
            .unwrap_err();
        assert!(matches!(err, MirrorError::Codec(_)));
        assert!(manager.admin().is_empty());
    }

    #[test]
    fn test_properties_absent_until_updated() {
        let manager = manager();
        assert_eq!(manager.get_properties("fresh", None).unwrap(), None);
        assert!(manager.list_configurations(None).unwrap().is_empty());
    }

    #[test]
    fn test_update_and_delete_property() {
        let manager = manager();
        let table: PropertyTable = vec![
            PropertyRow::new("host", "localhost", "String"),
            PropertyRow::new("port", "8080", "Integer"),
        ]
        .into();
        manager.update("http", Some("file:http.jar"), &table).unwrap();
        manager.delete_property("http", None, "host").unwrap();

        let table = manager.get_properties("http", None).unwrap().unwrap();
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["port"]);
        assert_eq!(
            manager.get_bundle_location("http").as_deref(),
            Some("file:http.jar")
        );
    }

    #[test]
    fn test_invalid_filter_is_reported() {
        let manager = manager();
        assert!(matches!(
            manager.delete_configurations("(broken"),
            Err(MirrorError::Filter(_))
        ));
        assert!(matches!(
            manager.list_configurations(Some("no parens")),
            Err(MirrorError::Filter(_))
        ));
    }
}
