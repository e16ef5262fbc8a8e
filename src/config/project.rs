//! Resolved project configuration
//!
//! Combines the manifest with command line and environment overrides and
//! knows where the installed repository and generated files live.

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::manifest::{MANIFEST_FILE, Manifest};
use crate::error::{AutoloadError, Result};
use crate::installer::{InstallationManager, LibraryInstaller, MetapackageInstaller};
use crate::package::{InstalledRepository, Package};

/// Environment variable overriding the vendor directory
pub const VENDOR_DIR_ENV: &str = "AUTOLOAD_VENDOR_DIR";

/// Directory below the vendor dir holding metadata and generated files
pub const METADATA_DIR: &str = ".composer";

pub const INSTALLED_FILE: &str = "installed.json";

#[derive(Debug, Clone)]
pub struct ProjectConfig {
    working_dir: PathBuf,
    manifest: Manifest,
    vendor_dir: String,
}

impl ProjectConfig {
    /// Load the project rooted at `working_dir`
    ///
    /// A missing manifest is an empty project. `vendor_override` wins over the
    /// manifest's `config.vendor-dir`.
    pub fn load(working_dir: impl AsRef<Path>, vendor_override: Option<&str>) -> Result<Self> {
        let working_dir = working_dir.as_ref();
        let working_dir = if working_dir.is_absolute() {
            working_dir.to_path_buf()
        } else {
            env::current_dir()?.join(working_dir)
        };
        if !working_dir.is_dir() {
            return Err(AutoloadError::FileReadFailed {
                path: working_dir.display().to_string(),
                reason: "working directory does not exist".to_string(),
            });
        }

        let manifest_path = working_dir.join(MANIFEST_FILE);
        let manifest = if manifest_path.is_file() {
            Manifest::load(&manifest_path)?
        } else {
            debug!("No {} in {}", MANIFEST_FILE, working_dir.display());
            Manifest::default()
        };

        let vendor_dir = vendor_override
            .filter(|dir| !dir.is_empty())
            .unwrap_or_else(|| manifest.vendor_dir())
            .to_string();

        Ok(Self {
            working_dir,
            manifest,
            vendor_dir,
        })
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Vendor directory as configured, usually relative
    pub fn vendor_dir(&self) -> &str {
        &self.vendor_dir
    }

    pub fn root_package(&self) -> Package {
        self.manifest.root_package()
    }

    /// Installation manager with the built-in strategies registered
    pub fn installation_manager(&self) -> Result<InstallationManager> {
        let mut manager =
            InstallationManager::with_working_dir(&self.working_dir, &self.vendor_dir)?;
        let working_dir = manager.working_dir().to_path_buf();
        let vendor_dir = manager.vendor_dir().to_path_buf();
        manager.add_installer(Box::new(LibraryInstaller::new(working_dir, vendor_dir.clone())));
        manager.add_installer(Box::new(MetapackageInstaller::new(vendor_dir)));
        Ok(manager)
    }

    /// Where metadata and generated autoload files are kept
    pub fn metadata_dir(manager: &InstallationManager) -> PathBuf {
        manager.vendor_dir().join(METADATA_DIR)
    }

    pub fn installed_repository(manager: &InstallationManager) -> Result<InstalledRepository> {
        InstalledRepository::load(Self::metadata_dir(manager).join(INSTALLED_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::Repository;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_without_manifest() {
        let temp = TempDir::new().unwrap();
        let config = ProjectConfig::load(temp.path(), None).unwrap();

        assert_eq!(config.vendor_dir(), "vendor");
        assert_eq!(config.root_package().name, "__root__");
    }

    #[test]
    fn test_vendor_override_wins() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(MANIFEST_FILE),
            r#"{"config": {"vendor-dir": "deps"}}"#,
        )
        .unwrap();

        let from_manifest = ProjectConfig::load(temp.path(), None).unwrap();
        let overridden = ProjectConfig::load(temp.path(), Some("lib/vendor")).unwrap();

        assert_eq!(from_manifest.vendor_dir(), "deps");
        assert_eq!(overridden.vendor_dir(), "lib/vendor");
    }

    #[test]
    fn test_missing_working_dir() {
        let temp = TempDir::new().unwrap();
        let err = ProjectConfig::load(temp.path().join("nope"), None).unwrap_err();
        assert!(matches!(err, AutoloadError::FileReadFailed { .. }));
    }

    #[test]
    fn test_installation_manager_registers_builtin_installers() {
        let temp = TempDir::new().unwrap();
        let config = ProjectConfig::load(temp.path(), None).unwrap();
        let manager = config.installation_manager().unwrap();

        assert!(manager.get_installer("library").is_ok());
        assert!(manager.get_installer("metapackage").is_ok());
        assert!(manager.get_installer("composer-plugin").is_err());
        assert!(ProjectConfig::metadata_dir(&manager).ends_with("vendor/.composer"));

        let repository = ProjectConfig::installed_repository(&manager).unwrap();
        assert!(repository.packages().is_empty());
    }
}
