//! Management view of exported packages.

use crate::error::MirrorError;
use crate::host::{ExportedPackage, PackageAdmin};
use crate::version::Version;

/// Exposes a [`PackageAdmin`] by package name and version text.
pub struct PackageState<P: PackageAdmin> {
    admin: P,
}

impl<P: PackageAdmin> PackageState<P> {
    pub fn new(admin: P) -> Self {
        Self { admin }
    }

    pub fn admin(&self) -> &P {
        &self.admin
    }

    fn find(&self, name: &str, version: &str) -> Result<Option<ExportedPackage>, MirrorError> {
        let version: Version = version.parse()?;
        Ok(self
            .admin
            .exported_packages_named(name)
            .into_iter()
            .find(|p| p.version == version))
    }

    /// Id of the bundle exporting `name` at `version`.
    pub fn get_exporting_bundle(
        &self,
        name: &str,
        version: &str,
    ) -> Result<Option<i64>, MirrorError> {
        Ok(self.find(name, version)?.map(|p| p.exporting_bundle))
    }

    /// Bundles wired to the export. Empty when the package is not exported.
    pub fn get_importing_bundles(
        &self,
        name: &str,
        version: &str,
    ) -> Result<Vec<i64>, MirrorError> {
        Ok(self
            .find(name, version)?
            .map(|p| p.importing_bundles)
            .unwrap_or_default())
    }

    pub fn is_removal_pending(&self, name: &str, version: &str) -> Result<bool, MirrorError> {
        Ok(self.find(name, version)?.is_some_and(|p| p.removal_pending))
    }

    /// Every export as `name;version`.
    pub fn get_packages(&self) -> Vec<String> {
        self.admin
            .exported_packages()
            .iter()
            .map(|p| format!("{};{}", p.name, p.version))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::InMemoryPackageAdmin;

    fn state() -> PackageState<InMemoryPackageAdmin> {
        let admin = InMemoryPackageAdmin::new();
        admin.export(ExportedPackage::new("org.example.api", Version::new(1, 2, 0), 4));
        admin.add_importer("org.example.api", &Version::new(1, 2, 0), 9);
        PackageState::new(admin)
    }

    #[test]
    fn test_lookup_normalizes_version_text() {
        let state = state();
        assert_eq!(state.get_exporting_bundle("org.example.api", "1.2").unwrap(), Some(4));
        assert_eq!(state.get_importing_bundles("org.example.api", "1.2.0").unwrap(), vec![9]);
        assert_eq!(state.get_exporting_bundle("org.example.api", "2.0").unwrap(), None);
        assert!(!state.is_removal_pending("org.example.api", "1.2.0").unwrap());
    }

    #[test]
    fn test_bad_version_text() {
        assert!(matches!(
            state().get_exporting_bundle("org.example.api", "one"),
            Err(MirrorError::Version(_))
        ));
    }

    #[test]
    fn test_packages_listing() {
        assert_eq!(state().get_packages(), vec!["org.example.api;1.2.0"]);
    }
}
