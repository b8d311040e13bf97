//! Host collaborators the mirrors read from and write to.
//!
//! Each collaborator is a trait so a mirror can sit on top of a real
//! framework. The `InMemory*` implementations keep their state behind a
//! `RwLock` and are enough to drive the mirrors in tests or in a simple
//! embedded runtime. The traits are also implemented for `Arc<T>`, so a
//! host can be shared between a mirror and the code that drives it.

mod config_admin;
mod package_admin;
mod service_registry;
mod user_admin;

pub use config_admin::{
    Configuration, ConfigurationAdmin, InMemoryConfigurationAdmin, SERVICE_BUNDLE_LOCATION,
    SERVICE_FACTORY_PID, SERVICE_PID,
};
pub use package_admin::{ExportedPackage, InMemoryPackageAdmin, PackageAdmin};
pub use service_registry::{
    InMemoryServiceRegistry, OBJECT_CLASS, SERVICE_ID, ServiceReference, ServiceRegistry,
};
pub use user_admin::{InMemoryUserAdmin, RoleEntry, USER_ANYONE, UserAdmin};
