//! # osgi-jmx-mirror
//!
//! Management mirrors of OSGi runtime state built on the `osgi-jmx` codec.
//!
//! Each mirror wraps a host collaborator and exposes it through arguments a
//! management client can send: names, ids, LDAP filter strings, version
//! text, and property values as (value, type tag) text or encoded tables.
//!
//! - [`ConfigAdminManager`] over a [`ConfigurationAdmin`](host::ConfigurationAdmin)
//! - [`UserManager`] over a [`UserAdmin`](host::UserAdmin)
//! - [`ServiceState`] over a [`ServiceRegistry`](host::ServiceRegistry)
//! - [`PackageState`] over a [`PackageAdmin`](host::PackageAdmin)
//!
//! ## Quick Start
//!
//! ```rust
//! use osgi_jmx_mirror::ConfigAdminManager;
//! use osgi_jmx_mirror::host::InMemoryConfigurationAdmin;
//!
//! # fn main() -> Result<(), osgi_jmx_mirror::MirrorError> {
//! let manager = ConfigAdminManager::new(InMemoryConfigurationAdmin::new());
//! let pid = manager.create_factory_configuration("org.example.http", None);
//! manager.add_property(&pid, None, "port", "8080", "Integer")?;
//!
//! let listed = manager.list_configurations(Some("(port>=8000)"))?;
//! assert_eq!(listed, vec![(pid.clone(), None)]);
//!
//! let table = manager.get_properties(&pid, None)?.unwrap();
//! assert_eq!(table.get("port").unwrap().type_tag, "Integer");
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! With the `logging` feature, rejected filter arguments are logged at
//! `error`, administrative writes at `debug` and service notifications at
//! `trace` through the `log` facade.

pub mod filter;
pub mod host;
pub mod version;

mod config_admin;
mod error;
mod package_state;
mod service_state;
mod user_manager;

pub use config_admin::ConfigAdminManager;
pub use error::MirrorError;
pub use filter::{Filter, FilterError};
pub use package_state::PackageState;
pub use service_state::{Notification, SERVICE_EVENT_TYPE, ServiceState, ServiceSummary};
pub use user_manager::UserManager;
pub use version::{Version, VersionError};
