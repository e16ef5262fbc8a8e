//! Installer for metapackages
//!
//! A metapackage only pulls in dependencies, it has no files of its own.

use std::path::PathBuf;

use super::InstallerStrategy;
use crate::error::{AutoloadError, Result};
use crate::package::{Package, Repository, WritableRepository};

pub struct MetapackageInstaller {
    vendor_dir: PathBuf,
}

impl MetapackageInstaller {
    pub fn new(vendor_dir: impl Into<PathBuf>) -> Self {
        Self {
            vendor_dir: vendor_dir.into(),
        }
    }
}

fn not_installed(package: &Package) -> AutoloadError {
    AutoloadError::PackageNotInstalled {
        name: package.name.clone(),
    }
}

impl InstallerStrategy for MetapackageInstaller {
    fn supports(&self, package_type: &str) -> bool {
        package_type == "metapackage"
    }

    fn is_installed(&self, repository: &dyn WritableRepository, package: &Package) -> bool {
        repository.has_package(package)
    }

    fn install(&self, repository: &mut dyn WritableRepository, package: &Package) -> Result<()> {
        repository.add_package(package.clone());
        Ok(())
    }

    fn update(
        &self,
        repository: &mut dyn WritableRepository,
        initial: &Package,
        target: &Package,
    ) -> Result<()> {
        if !repository.remove_package(initial) {
            return Err(not_installed(initial));
        }
        repository.add_package(target.clone());
        Ok(())
    }

    fn uninstall(
        &self,
        repository: &mut dyn WritableRepository,
        package: &Package,
    ) -> Result<()> {
        if !repository.remove_package(package) {
            return Err(not_installed(package));
        }
        Ok(())
    }

    fn install_path(&self, _package: &Package) -> PathBuf {
        self.vendor_dir.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::{ArrayRepository, Repository};

    #[test]
    fn test_bookkeeping_only() {
        let installer = MetapackageInstaller::new("/w/vendor");
        let initial = Package::new("acme/all", "1.0").with_type("metapackage");
        let target = Package::new("acme/all", "1.1").with_type("metapackage");
        let mut repository = ArrayRepository::new();

        installer.install(&mut repository, &initial).unwrap();
        assert!(installer.is_installed(&repository, &initial));

        installer.update(&mut repository, &initial, &target).unwrap();
        assert_eq!(repository.packages(), &[target.clone()]);

        installer.uninstall(&mut repository, &target).unwrap();
        assert!(repository.packages().is_empty());
        assert_eq!(installer.install_path(&target), PathBuf::from("/w/vendor"));
    }

    #[test]
    fn test_uninstall_missing_package() {
        let installer = MetapackageInstaller::new("/w/vendor");
        let package = Package::new("acme/all", "1.0").with_type("metapackage");
        let err = installer
            .uninstall(&mut ArrayRepository::new(), &package)
            .unwrap_err();
        assert!(matches!(err, AutoloadError::PackageNotInstalled { .. }));
    }
}
