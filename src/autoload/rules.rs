//! Autoload rule merging
//!
//! Vendor packages are visited in dependency order and the root package last.
//! A package that declares a namespace prefix replaces whatever earlier
//! packages declared for that exact prefix, which is what lets the root
//! package override vendor mappings.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::paths::resolve_declared;
use crate::package::{AutoloadRule, Package};

/// A package paired with its absolute, forward-slash install path
#[derive(Debug, Clone)]
pub struct PackageEntry<'a> {
    pub package: &'a Package,
    pub install_path: String,
}

/// Merged autoload declarations of a whole package set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedAutoloads {
    /// Non-empty prefixes, most specific first
    pub namespaces: Vec<(String, Vec<String>)>,

    /// Base paths of the empty-prefix fallback bucket
    pub fallback: Vec<String>,

    /// Classmap roots (directories or files) in declaration order
    pub classmap: Vec<PathBuf>,

    /// Include paths in package then declaration order
    pub include_paths: Vec<String>,
}

/// Resolve a classmap declaration, `""`, `.` and `./` mean the package root
fn classmap_root(install_path: &str, path: &str) -> PathBuf {
    match path.trim() {
        "" | "." | "./" => PathBuf::from(install_path),
        declared => PathBuf::from(resolve_declared(install_path, declared)),
    }
}

/// Merge the autoload declarations of `vendors` and then `root`
pub fn merge(vendors: &[PackageEntry<'_>], root: &PackageEntry<'_>) -> MergedAutoloads {
    let mut prefixes: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut merged = MergedAutoloads::default();

    for entry in vendors.iter().chain(std::iter::once(root)) {
        let mut own: Vec<(String, Vec<String>)> = Vec::new();

        for rule in &entry.package.autoload {
            match rule {
                AutoloadRule::Namespace { prefix, paths } => {
                    let resolved = paths
                        .iter()
                        .map(|p| resolve_declared(&entry.install_path, p));
                    match own.iter_mut().find(|(p, _)| p == prefix) {
                        Some((_, existing)) => existing.extend(resolved),
                        None => own.push((prefix.clone(), resolved.collect())),
                    }
                }
                AutoloadRule::Classmap { paths } => {
                    merged.classmap.extend(
                        paths
                            .iter()
                            .map(|p| classmap_root(&entry.install_path, p)),
                    );
                }
            }
        }

        for (prefix, paths) in own {
            prefixes.insert(prefix, paths);
        }

        merged.include_paths.extend(
            entry
                .package
                .include_paths
                .iter()
                .map(|p| resolve_declared(&entry.install_path, p)),
        );
    }

    merged.fallback = prefixes.remove("").unwrap_or_default();
    merged.namespaces = prefixes.into_iter().rev().collect();
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry<'a>(package: &'a Package, install_path: &str) -> PackageEntry<'a> {
        PackageEntry {
            package,
            install_path: install_path.to_string(),
        }
    }

    #[test]
    fn test_packages_without_rules_contribute_nothing() {
        let a = Package::new("a/a", "1.0");
        let root = Package::new("root", "1.0");
        let merged = merge(&[entry(&a, "/w/vendor/a/a")], &entry(&root, "/w"));
        assert_eq!(merged, MergedAutoloads::default());
    }

    #[test]
    fn test_root_overrides_vendor_prefix() {
        let a = Package::new("a/a", "1.0").with_namespace("A", ["vendor/a"]);
        let root = Package::new("root", "1.0").with_namespace("A", ["src"]);
        let merged = merge(&[entry(&a, "/w/vendor/a/a")], &entry(&root, "/w"));
        assert_eq!(
            merged.namespaces,
            vec![("A".to_string(), vec!["/w/src".to_string()])]
        );
    }

    #[test]
    fn test_later_vendor_overrides_earlier() {
        let a = Package::new("a/a", "1.0").with_namespace("Shared", ["a/"]);
        let b = Package::new("b/b", "1.0").with_namespace("Shared", ["b/"]);
        let root = Package::new("root", "1.0");
        let merged = merge(
            &[entry(&a, "/w/vendor/a/a"), entry(&b, "/w/vendor/b/b")],
            &entry(&root, "/w"),
        );
        assert_eq!(
            merged.namespaces,
            vec![("Shared".to_string(), vec!["/w/vendor/b/b/b/".to_string()])]
        );
    }

    #[test]
    fn test_prefixes_most_specific_first() {
        let a = Package::new("a/a", "1.0")
            .with_namespace("A", ["src/"])
            .with_namespace("A\\B", ["lib/"]);
        let b = Package::new("b/b", "1.0").with_namespace("B\\Sub\\Name", ["src/"]);
        let root = Package::new("root", "1.0");
        let merged = merge(
            &[entry(&a, "/w/vendor/a/a"), entry(&b, "/w/vendor/b/b")],
            &entry(&root, "/w"),
        );
        let prefixes: Vec<_> = merged.namespaces.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(prefixes, vec!["B\\Sub\\Name", "A\\B", "A"]);
    }

    #[test]
    fn test_multiple_paths_keep_declaration_order() {
        let root = Package::new("root", "1.0")
            .with_namespace("Lala", ["src/", "lib/"])
            .with_namespace("Lala", ["extra/"]);
        let merged = merge(&[], &entry(&root, "/w"));
        assert_eq!(
            merged.namespaces,
            vec![(
                "Lala".to_string(),
                vec![
                    "/w/src/".to_string(),
                    "/w/lib/".to_string(),
                    "/w/extra/".to_string()
                ]
            )]
        );
    }

    #[test]
    fn test_fallback_bucket_is_separate() {
        let a = Package::new("a/a", "1.0")
            .with_namespace("", ["lib/"])
            .with_namespace("A", ["src/"]);
        let root = Package::new("root", "1.0");
        let merged = merge(&[entry(&a, "/w/vendor/a/a")], &entry(&root, "/w"));
        assert_eq!(merged.fallback, vec!["/w/vendor/a/a/lib/".to_string()]);
        assert_eq!(merged.namespaces.len(), 1);
    }

    #[test]
    fn test_classmap_roots() {
        let a = Package::new("a/a", "1.0").with_classmap([""]);
        let b = Package::new("b/b", "1.0").with_classmap(["test.php"]);
        let c = Package::new("c/c", "1.0").with_classmap(["./", "."]);
        let root = Package::new("root", "1.0").with_classmap(["/abs/lib"]);
        let merged = merge(
            &[
                entry(&a, "/w/vendor/a/a"),
                entry(&b, "/w/vendor/b/b"),
                entry(&c, "/w/vendor/c/c"),
            ],
            &entry(&root, "/w"),
        );
        assert_eq!(
            merged.classmap,
            vec![
                PathBuf::from("/w/vendor/a/a"),
                PathBuf::from("/w/vendor/b/b/test.php"),
                PathBuf::from("/w/vendor/c/c"),
                PathBuf::from("/w/vendor/c/c"),
                PathBuf::from("/abs/lib"),
            ]
        );
    }

    #[test]
    fn test_include_paths_order() {
        let a = Package::new("a/a", "1.0").with_include_paths(["lib/"]);
        let b = Package::new("b/b", "1.0").with_include_paths(["library", "/abs/inc"]);
        let root = Package::new("root", "1.0").with_include_paths(["lib/"]);
        let merged = merge(
            &[entry(&a, "/w/vendor/a/a"), entry(&b, "/w/vendor/b/b")],
            &entry(&root, "/w"),
        );
        assert_eq!(
            merged.include_paths,
            vec![
                "/w/vendor/a/a/lib/".to_string(),
                "/w/vendor/b/b/library".to_string(),
                "/abs/inc".to_string(),
                "/w/lib/".to_string(),
            ]
        );
    }
}
