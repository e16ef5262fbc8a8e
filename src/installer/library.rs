//! Installer for regular library packages
//!
//! Libraries are installed to `<vendor>/<name>` by copying a local `path`
//! dist. Version control metadata is not copied.

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use super::InstallerStrategy;
use crate::common::fs::{CopyOptions, copy_dir_recursive, remove_dir_if_exists};
use crate::error::{AutoloadError, Result};
use crate::package::{Package, Repository, WritableRepository};

/// Dist type copied from the local filesystem
pub const PATH_DIST: &str = "path";

pub struct LibraryInstaller {
    working_dir: PathBuf,
    vendor_dir: PathBuf,
}

impl LibraryInstaller {
    /// Both directories must be absolute
    pub fn new(working_dir: impl Into<PathBuf>, vendor_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            vendor_dir: vendor_dir.into(),
        }
    }

    fn source_dir(&self, package: &Package) -> Result<PathBuf> {
        let dist = package
            .dist
            .as_ref()
            .ok_or_else(|| AutoloadError::PackageSourceMissing {
                name: package.name.clone(),
            })?;
        if dist.kind != PATH_DIST {
            return Err(AutoloadError::UnsupportedDist {
                name: package.name.clone(),
                kind: dist.kind.clone(),
            });
        }

        let source = self.working_dir.join(&dist.url);
        if !source.is_dir() {
            return Err(AutoloadError::FileReadFailed {
                path: source.display().to_string(),
                reason: "dist directory does not exist".to_string(),
            });
        }
        Ok(source)
    }

    /// Install path, refused when the name would leave the vendor directory
    fn target_dir(&self, package: &Package) -> Result<PathBuf> {
        check_package_name(&package.name)?;
        Ok(self.install_path(package))
    }

    fn install_files(&self, package: &Package) -> Result<()> {
        let target = self.target_dir(package)?;
        let source = self.source_dir(package)?;
        debug!("Copying {} to {}", source.display(), target.display());

        remove_dir_if_exists(&target)?;
        copy_dir_recursive(&source, &target, &CopyOptions::exclude_vcs()).map_err(|e| {
            AutoloadError::FileWriteFailed {
                path: target.display().to_string(),
                reason: e.to_string(),
            }
        })
    }

    fn remove_files(&self, package: &Package) -> Result<()> {
        let target = self.target_dir(package)?;
        debug!("Removing {}", target.display());
        remove_dir_if_exists(&target)
    }

    fn ensure_installed(repository: &dyn WritableRepository, package: &Package) -> Result<()> {
        if repository.has_package(package) {
            Ok(())
        } else {
            Err(AutoloadError::PackageNotInstalled {
                name: package.name.clone(),
            })
        }
    }
}

impl InstallerStrategy for LibraryInstaller {
    fn supports(&self, package_type: &str) -> bool {
        package_type == "library"
    }

    fn is_installed(&self, repository: &dyn WritableRepository, package: &Package) -> bool {
        repository.has_package(package) && self.install_path(package).is_dir()
    }

    fn install(&self, repository: &mut dyn WritableRepository, package: &Package) -> Result<()> {
        self.install_files(package)?;
        repository.add_package(package.clone());
        Ok(())
    }

    fn update(
        &self,
        repository: &mut dyn WritableRepository,
        initial: &Package,
        target: &Package,
    ) -> Result<()> {
        Self::ensure_installed(repository, initial)?;

        if self.install_path(initial) != self.install_path(target) {
            self.remove_files(initial)?;
        }
        self.install_files(target)?;

        repository.remove_package(initial);
        repository.add_package(target.clone());
        Ok(())
    }

    fn uninstall(
        &self,
        repository: &mut dyn WritableRepository,
        package: &Package,
    ) -> Result<()> {
        Self::ensure_installed(repository, package)?;
        self.remove_files(package)?;
        repository.remove_package(package);
        Ok(())
    }

    fn install_path(&self, package: &Package) -> PathBuf {
        vendor_subdir(&self.vendor_dir, &package.name)
    }
}

fn check_package_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| AutoloadError::InvalidPackageName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("empty name"));
    }
    if name.starts_with('/') {
        return Err(invalid("absolute path"));
    }
    for segment in name.split('/').filter(|segment| !segment.is_empty()) {
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => {
                return Err(invalid(&format!(
                    "segment '{}' leaves the vendor directory",
                    segment
                )));
            }
        }
    }
    Ok(())
}

fn vendor_subdir(vendor_dir: &Path, name: &str) -> PathBuf {
    name.split('/')
        .filter(|segment| !segment.is_empty())
        .fold(vendor_dir.to_path_buf(), |path, segment| path.join(segment))
}
