use std::sync::{Arc, PoisonError, RwLock};

use crate::version::Version;

/// A package exported by a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedPackage {
    pub name: String,
    pub version: Version,
    pub exporting_bundle: i64,
    pub importing_bundles: Vec<i64>,
    /// Set when the exporter was updated or uninstalled but the old
    /// export is still wired.
    pub removal_pending: bool,
}

impl ExportedPackage {
    pub fn new(name: impl Into<String>, version: Version, exporting_bundle: i64) -> Self {
        Self {
            name: name.into(),
            version,
            exporting_bundle,
            importing_bundles: Vec::new(),
            removal_pending: false,
        }
    }
}

pub trait PackageAdmin: Send + Sync {
    fn exported_packages(&self) -> Vec<ExportedPackage>;

    /// Exports of `name`, in any version.
    fn exported_packages_named(&self, name: &str) -> Vec<ExportedPackage> {
        self.exported_packages()
            .into_iter()
            .filter(|p| p.name == name)
            .collect()
    }
}

impl<T: PackageAdmin + ?Sized> PackageAdmin for Arc<T> {
    fn exported_packages(&self) -> Vec<ExportedPackage> {
        (**self).exported_packages()
    }

    fn exported_packages_named(&self, name: &str) -> Vec<ExportedPackage> {
        (**self).exported_packages_named(name)
    }
}

/// A [`PackageAdmin`] over a list of exports.
#[derive(Debug, Default)]
pub struct InMemoryPackageAdmin {
    packages: RwLock<Vec<ExportedPackage>>,
}

impl InMemoryPackageAdmin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an export, replacing any export with the same name and version.
    pub fn export(&self, package: ExportedPackage) {
        let mut packages = self.packages.write().unwrap_or_else(PoisonError::into_inner);
        packages.retain(|p| !(p.name == package.name && p.version == package.version));
        packages.push(package);
    }

    /// Wires `bundle_id` to the export. Returns false if there is no such export.
    pub fn add_importer(&self, name: &str, version: &Version, bundle_id: i64) -> bool {
        let mut packages = self.packages.write().unwrap_or_else(PoisonError::into_inner);
        match packages
            .iter_mut()
            .find(|p| p.name == name && &p.version == version)
        {
            Some(package) => {
                if !package.importing_bundles.contains(&bundle_id) {
                    package.importing_bundles.push(bundle_id);
                }
                true
            }
            None => false,
        }
    }

    /// Marks every export of `bundle_id` as pending removal.
    pub fn mark_removal_pending(&self, bundle_id: i64) {
        let mut packages = self.packages.write().unwrap_or_else(PoisonError::into_inner);
        for package in packages.iter_mut().filter(|p| p.exporting_bundle == bundle_id) {
            package.removal_pending = true;
        }
    }
}

impl PackageAdmin for InMemoryPackageAdmin {
    fn exported_packages(&self) -> Vec<ExportedPackage> {
        self.packages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
