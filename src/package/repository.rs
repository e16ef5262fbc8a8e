//! Package repositories
//!
//! A repository supplies packages in dependency order. The order matters to
//! the autoload generator, so repositories never sort their contents.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::Package;
use crate::common::fs::write_atomic;
use crate::error::{AutoloadError, Result};

/// Read access to an ordered package set
pub trait Repository {
    /// All packages in dependency order
    fn packages(&self) -> &[Package];

    /// Whether a package with the same name and version is present
    fn has_package(&self, package: &Package) -> bool {
        self.packages().iter().any(|p| p.same_release(package))
    }

    /// Find a package by name
    fn find_package(&self, name: &str) -> Option<&Package> {
        self.packages().iter().find(|p| p.name == name)
    }
}

/// A repository installers record their work in
pub trait WritableRepository: Repository {
    /// Register a package. Registering the same release twice is a no-op.
    fn add_package(&mut self, package: Package);

    /// Unregister a package, returns whether it was present
    fn remove_package(&mut self, package: &Package) -> bool;

    /// Persist the current state
    fn write(&self) -> Result<()>;
}

/// In-memory repository
#[derive(Debug, Clone, Default)]
pub struct ArrayRepository {
    packages: Vec<Package>,
}

impl ArrayRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl From<Vec<Package>> for ArrayRepository {
    fn from(packages: Vec<Package>) -> Self {
        Self { packages }
    }
}

impl Repository for ArrayRepository {
    fn packages(&self) -> &[Package] {
        &self.packages
    }
}

impl WritableRepository for ArrayRepository {
    fn add_package(&mut self, package: Package) {
        if !self.has_package(&package) {
            self.packages.push(package);
        }
    }

    fn remove_package(&mut self, package: &Package) -> bool {
        let before = self.packages.len();
        self.packages.retain(|p| !p.same_release(package));
        self.packages.len() != before
    }

    fn write(&self) -> Result<()> {
        Ok(())
    }
}

/// Repository of installed packages backed by `installed.json`
#[derive(Debug, Clone)]
pub struct InstalledRepository {
    path: PathBuf,
    inner: ArrayRepository,
}

impl InstalledRepository {
    /// Load the repository file, a missing file is an empty repository
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            debug!("No installed repository at {}", path.display());
            return Ok(Self {
                path,
                inner: ArrayRepository::new(),
            });
        }

        let content = fs::read_to_string(&path).map_err(|e| AutoloadError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let packages: Vec<Package> =
            serde_json::from_str(&content).map_err(|e| AutoloadError::ConfigParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        debug!(
            "Loaded {} installed packages from {}",
            packages.len(),
            path.display()
        );

        Ok(Self {
            path,
            inner: ArrayRepository::from(packages),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Repository for InstalledRepository {
    fn packages(&self) -> &[Package] {
        self.inner.packages()
    }
}

impl WritableRepository for InstalledRepository {
    fn add_package(&mut self, package: Package) {
        self.inner.add_package(package);
    }

    fn remove_package(&mut self, package: &Package) -> bool {
        self.inner.remove_package(package)
    }

    fn write(&self) -> Result<()> {
        let mut json = serde_json::to_string_pretty(self.inner.packages())?;
        json.push('\n');
        write_atomic(&self.path, &json)
    }
}
