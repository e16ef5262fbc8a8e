//! Installation manager and installer strategies
//!
//! This module handles:
//! - Registering installer strategies in priority order
//! - Selecting the strategy responsible for a package type
//! - Dispatching install, update and uninstall operations
//! - Resolving the vendor directory packages are installed under

pub mod library;
pub mod metapackage;
pub mod operation;

use std::env;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::autoload::paths::{find_shortest_path, is_absolute_path};
use crate::common::fs::ensure_dir;
use crate::common::path_normalizer::{normalize, to_slash_string};
use crate::error::{AutoloadError, Result};
use crate::package::{Package, WritableRepository};

pub use library::LibraryInstaller;
pub use metapackage::MetapackageInstaller;
pub use operation::{InstallOperation, Operation, UninstallOperation, UpdateOperation};

/// Handler for the packages of one or more types
pub trait InstallerStrategy {
    /// Whether this strategy handles packages of `package_type`
    fn supports(&self, package_type: &str) -> bool;

    fn is_installed(&self, repository: &dyn WritableRepository, package: &Package) -> bool;

    fn install(&self, repository: &mut dyn WritableRepository, package: &Package) -> Result<()>;

    fn update(
        &self,
        repository: &mut dyn WritableRepository,
        initial: &Package,
        target: &Package,
    ) -> Result<()>;

    fn uninstall(&self, repository: &mut dyn WritableRepository, package: &Package)
    -> Result<()>;

    /// Absolute directory the package's files live in
    fn install_path(&self, package: &Package) -> PathBuf;
}

/// Registry of installer strategies and dispatcher of operations
pub struct InstallationManager {
    /// Absolute, normalized working directory
    working_dir: PathBuf,

    /// Absolute, normalized vendor directory
    vendor_dir: PathBuf,

    /// Vendor directory relative to the working directory
    vendor_path: String,

    /// Strategies in registration order
    installers: Vec<Box<dyn InstallerStrategy>>,
}

impl InstallationManager {
    /// Create a manager for `vendor_dir` relative to the current directory
    pub fn new(vendor_dir: impl AsRef<Path>) -> Result<Self> {
        let working_dir = env::current_dir()?;
        Self::with_working_dir(working_dir, vendor_dir)
    }

    /// Create a manager for `vendor_dir` relative to `working_dir`
    ///
    /// The vendor directory is created when missing. It must end up a
    /// directory that can be reached from the working directory through a
    /// relative path.
    pub fn with_working_dir(
        working_dir: impl AsRef<Path>,
        vendor_dir: impl AsRef<Path>,
    ) -> Result<Self> {
        let working_dir = normalize(working_dir.as_ref(), Path::new("."));
        let requested = vendor_dir.as_ref();
        let joined = working_dir.join(requested);

        let invalid = |reason: &str| AutoloadError::InvalidVendorDir {
            path: requested.display().to_string(),
            reason: reason.to_string(),
        };

        if joined.exists() && !joined.is_dir() {
            return Err(invalid("not a directory"));
        }

        let vendor_dir = normalize(&working_dir, requested);
        let vendor_path = find_shortest_path(
            &format!("{}/file", to_slash_string(&working_dir)),
            &to_slash_string(&vendor_dir),
            false,
        );
        if is_absolute_path(&vendor_path) {
            return Err(invalid(
                "no relative path leads there from the working directory",
            ));
        }
        ensure_dir(&joined).map_err(|e| invalid(&e.to_string()))?;
        debug!(
            "Vendor directory {} resolved to {}",
            vendor_path,
            vendor_dir.display()
        );

        Ok(Self {
            working_dir,
            vendor_dir,
            vendor_path,
            installers: Vec::new(),
        })
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Absolute vendor directory
    pub fn vendor_dir(&self) -> &Path {
        &self.vendor_dir
    }

    /// Vendor directory, relative to the working directory unless `absolute`
    pub fn vendor_path(&self, absolute: bool) -> String {
        if absolute {
            to_slash_string(&self.vendor_dir)
        } else {
            self.vendor_path.clone()
        }
    }

    /// Register a strategy. Earlier registrations take precedence.
    pub fn add_installer(&mut self, installer: Box<dyn InstallerStrategy>) {
        self.installers.push(installer);
    }

    /// First registered strategy supporting `package_type`
    pub fn get_installer(&self, package_type: &str) -> Result<&dyn InstallerStrategy> {
        self.installers
            .iter()
            .find(|installer| installer.supports(package_type))
            .map(|installer| installer.as_ref())
            .ok_or_else(|| AutoloadError::UnsupportedPackageType {
                package_type: package_type.to_string(),
            })
    }

    pub fn is_package_installed(
        &self,
        repository: &dyn WritableRepository,
        package: &Package,
    ) -> Result<bool> {
        Ok(self
            .get_installer(&package.package_type)?
            .is_installed(repository, package))
    }

    /// Run a single operation through the matching strategy
    pub fn execute(
        &self,
        repository: &mut dyn WritableRepository,
        operation: &Operation,
    ) -> Result<()> {
        debug!(job = operation.job_type(), "Dispatching: {}", operation);

        let result = match operation {
            Operation::Install(op) => self.install(repository, op),
            Operation::Update(op) => self.update(repository, op),
            Operation::Uninstall(op) => self.uninstall(repository, op),
        };

        match &result {
            Ok(()) => info!(job = operation.job_type(), "Completed: {}", operation),
            Err(e) => warn!(job = operation.job_type(), "Failed: {}: {}", operation, e),
        }
        result
    }

    pub fn install(
        &self,
        repository: &mut dyn WritableRepository,
        op: &InstallOperation,
    ) -> Result<()> {
        let installer = self.get_installer(&op.package.package_type)?;
        installer.install(repository, &op.package)
    }

    /// Update in place, or uninstall and install when the type changes
    ///
    /// A failing install after a successful uninstall is returned as is, the
    /// initial package stays removed.
    pub fn update(
        &self,
        repository: &mut dyn WritableRepository,
        op: &UpdateOperation,
    ) -> Result<()> {
        if !op.changes_type() {
            let installer = self.get_installer(&op.initial.package_type)?;
            return installer.update(repository, &op.initial, &op.target);
        }

        let initial = self.get_installer(&op.initial.package_type)?;
        let target = self.get_installer(&op.target.package_type)?;
        debug!(
            "{} changes type from {} to {}",
            op.initial.name, op.initial.package_type, op.target.package_type
        );
        initial.uninstall(repository, &op.initial)?;
        target.install(repository, &op.target)
    }

    pub fn uninstall(
        &self,
        repository: &mut dyn WritableRepository,
        op: &UninstallOperation,
    ) -> Result<()> {
        let installer = self.get_installer(&op.package.package_type)?;
        installer.uninstall(repository, &op.package)
    }

    /// Install path of a package, as reported by its strategy
    pub fn install_path(&self, package: &Package) -> Result<PathBuf> {
        Ok(self
            .get_installer(&package.package_type)?
            .install_path(package))
    }
}
