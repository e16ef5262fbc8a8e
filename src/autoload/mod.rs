//! Autoload file generation
//!
//! This module handles:
//! - Resolving install paths of the root and vendor packages
//! - Merging namespace, classmap and include path declarations
//! - Scanning classmap roots for class declarations
//! - Writing the generated tables, the bootstrap file and the class loader

pub mod classmap;
pub mod dump;
pub mod paths;
pub mod rules;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::common::fs::{ensure_dir, remove_file_if_exists, write_atomic};
use crate::common::path_normalizer::{normalize, to_slash_string};
use crate::error::Result;
use crate::installer::InstallationManager;
use crate::package::{Package, Repository};
use paths::PathResolver;
use rules::{MergedAutoloads, PackageEntry};

/// Summary of a generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedFiles {
    /// Files written, in write order
    pub written: Vec<PathBuf>,

    /// Number of classes in the classmap
    pub classes: usize,

    /// Number of namespace prefixes, fallback bucket included
    pub prefixes: usize,

    /// Whether `include_paths.php` was written
    pub include_paths: bool,
}

/// Generates the autoload tables for a package set
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoloadGenerator;

impl AutoloadGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate every autoload file into `target_dir`
    ///
    /// Packages come from `repository` in dependency order, their install
    /// paths from `manager`. `root` is installed in the working directory and
    /// its rules are applied last. A relative `target_dir` is resolved against
    /// the working directory. Nothing is written when a class is declared in
    /// two different files.
    pub fn generate(
        &self,
        repository: &dyn Repository,
        root: &Package,
        manager: &InstallationManager,
        target_dir: &Path,
    ) -> Result<GeneratedFiles> {
        let base_dir = manager.working_dir();
        let vendor_dir = manager.vendor_dir();
        ensure_dir(vendor_dir)?;

        let target_dir = base_dir.join(target_dir);
        ensure_dir(&target_dir)?;
        let target_dir = normalize(base_dir, &target_dir);

        let resolver = PathResolver::new(base_dir, vendor_dir, &target_dir);

        let mut vendors = Vec::new();
        for package in repository.packages() {
            let install_path = normalize(base_dir, &manager.install_path(package)?);
            debug!("{} installed at {}", package, install_path.display());
            vendors.push(PackageEntry {
                package,
                install_path: to_slash_string(&install_path),
            });
        }
        let root_entry = PackageEntry {
            package: root,
            install_path: resolver.base_dir().to_string(),
        };

        let autoloads = rules::merge(&vendors, &root_entry);
        let classes = build_classmap(base_dir, &autoloads)?;

        let mut files = vec![
            (
                dump::NAMESPACES_FILE,
                dump::render_namespaces(&resolver, &autoloads),
            ),
            (
                dump::CLASSMAP_FILE,
                dump::render_classmap(&resolver, &classes),
            ),
        ];
        let with_include_paths = !autoloads.include_paths.is_empty();
        if with_include_paths {
            files.push((
                dump::INCLUDE_PATHS_FILE,
                dump::render_include_paths(&resolver, &autoloads.include_paths),
            ));
        }
        files.push((dump::CLASS_LOADER_FILE, dump::CLASS_LOADER.to_string()));
        files.push((dump::BOOTSTRAP_FILE, dump::render_bootstrap(with_include_paths)));

        let mut generated = GeneratedFiles {
            classes: classes.len(),
            prefixes: autoloads.namespaces.len() + usize::from(!autoloads.fallback.is_empty()),
            include_paths: with_include_paths,
            ..GeneratedFiles::default()
        };

        for (name, contents) in files {
            let path = target_dir.join(name);
            write_atomic(&path, &contents)?;
            debug!("Wrote {}", path.display());
            generated.written.push(path);
        }
        if !with_include_paths {
            remove_file_if_exists(&target_dir.join(dump::INCLUDE_PATHS_FILE))?;
        }

        info!(
            "Generated autoload files in {} ({} classes, {} prefixes)",
            target_dir.display(),
            generated.classes,
            generated.prefixes
        );
        Ok(generated)
    }
}

/// Scan every classmap root, skipping roots that do not exist
fn build_classmap(
    base_dir: &Path,
    autoloads: &MergedAutoloads,
) -> Result<BTreeMap<String, String>> {
    let mut classes = BTreeMap::new();
    for root in &autoloads.classmap {
        let root = normalize(base_dir, root);
        for (class, file) in classmap::create_map(&root)? {
            classmap::insert_class(&mut classes, class, &file)?;
        }
    }

    Ok(classes
        .into_iter()
        .map(|(class, file)| (class, to_slash_string(&file)))
        .collect())
}
