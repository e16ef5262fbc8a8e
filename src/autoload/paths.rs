//! Path resolution for generated autoload files
//!
//! All paths handled here are forward-slash strings. Generated files refer to
//! the vendor and project directories through `$vendorDir` and `$baseDir`,
//! which are themselves expressed relative to `__DIR__` whenever the two
//! directories share a common ancestor below the filesystem root. Otherwise
//! the absolute path is written, so moving the output directory within the
//! project keeps the files valid while moving it elsewhere does not.

use std::path::Path;

use super::dump::export_str;
use crate::common::path_normalizer::{to_slash_string, trim_trailing_slash};

/// Whether a forward- or back-slash path is absolute (unix root or drive letter)
pub fn is_absolute_path(path: &str) -> bool {
    path.starts_with('/')
        || path.starts_with('\\')
        || (path.len() >= 2 && path.as_bytes()[1] == b':')
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn clean(path: &str) -> String {
    trim_trailing_slash(&path.replace('\\', "/")).to_string()
}

/// Number of leading segments `from` and `to` have in common
fn common_len(from: &[&str], to: &[&str]) -> usize {
    from.iter().zip(to).take_while(|(a, b)| a == b).count()
}

/// Shortest relative path from `from` to `to`
///
/// `from` is treated as a file unless `directories` is set. When the two
/// only share the filesystem root, `to` is returned unchanged.
pub fn find_shortest_path(from: &str, to: &str, directories: bool) -> String {
    let from = clean(from);
    let to = clean(to);
    let mut from_segs = segments(&from);
    if directories {
        from_segs.push("dummy_file");
    }
    let to_segs = segments(&to);

    let common = common_len(&from_segs, &to_segs);
    if common == 0 {
        return to;
    }

    let depth = from_segs.len().saturating_sub(common + 1);
    let relative = format!("{}{}", "../".repeat(depth), to_segs[common..].join("/"));
    if relative.is_empty() {
        "./".to_string()
    } else {
        relative
    }
}

/// PHP expression evaluating to `to` from a file located in `from`
///
/// Produces `__DIR__`-based expressions (`dirname(__DIR__) . '/lib'`) when a
/// common ancestor exists, or an exported absolute path otherwise.
pub fn find_shortest_path_code(from: &str, to: &str, directories: bool) -> String {
    let from = clean(from);
    let to = clean(to);

    if from == to {
        return if directories { "__DIR__" } else { "__FILE__" }.to_string();
    }

    let from_segs = segments(&from);
    let to_segs = segments(&to);
    let common = common_len(&from_segs, &to_segs);
    if common == 0 {
        return export_str(&to);
    }

    if common == from_segs.len() {
        let rest = to_segs[common..].join("/");
        return format!("__DIR__ . {}", export_str(&format!("/{rest}")));
    }

    let depth = from_segs.len() - common - 1 + usize::from(directories);
    let mut code = format!("{}__DIR__{}", "dirname(".repeat(depth), ")".repeat(depth));
    let rest = to_segs[common..].join("/");
    if !rest.is_empty() {
        code.push_str(" . ");
        code.push_str(&export_str(&format!("/{rest}")));
    }
    code
}

/// Strip `dir` from the front of `path` on a segment boundary
fn strip_dir_prefix<'a>(path: &'a str, dir: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(dir)?;
    if rest.is_empty() || rest.starts_with('/') || dir.ends_with('/') {
        Some(rest)
    } else {
        None
    }
}

/// Join a declared path onto a package install path
///
/// Absolute declarations are kept, relative ones are appended verbatim
/// (a trailing slash survives) after dropping a leading `./`.
pub fn resolve_declared(install_path: &str, path: &str) -> String {
    let path = path.replace('\\', "/");
    if is_absolute_path(&path) {
        return path;
    }
    let path = path.strip_prefix("./").unwrap_or(&path);
    format!("{}/{}", trim_trailing_slash(install_path), path)
}

/// Knows the three directories generated code is expressed against
#[derive(Debug, Clone)]
pub struct PathResolver {
    base_dir: String,
    vendor_dir: String,
    target_dir: String,
}

impl PathResolver {
    /// All three paths must be absolute and already normalized
    pub fn new(base_dir: &Path, vendor_dir: &Path, target_dir: &Path) -> Self {
        Self {
            base_dir: to_slash_string(base_dir),
            vendor_dir: to_slash_string(vendor_dir),
            target_dir: to_slash_string(target_dir),
        }
    }

    pub fn base_dir(&self) -> &str {
        &self.base_dir
    }

    pub fn vendor_dir(&self) -> &str {
        &self.vendor_dir
    }

    /// Expression assigned to `$vendorDir` in generated files
    pub fn vendor_dir_code(&self) -> String {
        find_shortest_path_code(&self.target_dir, &self.vendor_dir, true)
    }

    /// Expression assigned to `$baseDir`, written in terms of `$vendorDir`
    pub fn base_dir_code(&self) -> String {
        find_shortest_path_code(&self.vendor_dir, &self.base_dir, true)
            .replace("__DIR__", "$vendorDir")
    }

    /// Expression for an absolute path, anchored on the vendor or base directory
    pub fn path_code(&self, path: &str) -> String {
        let path = path.replace('\\', "/");
        let anchors = [("$vendorDir", &self.vendor_dir), ("$baseDir", &self.base_dir)];
        for (variable, dir) in anchors {
            if let Some(rest) = strip_dir_prefix(&path, dir) {
                return if rest.is_empty() {
                    variable.to_string()
                } else {
                    format!("{variable} . {}", export_str(rest))
                };
            }
        }
        export_str(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_is_absolute_path() {
        assert!(is_absolute_path("/home/user"));
        assert!(is_absolute_path("C:/Users"));
        assert!(is_absolute_path("c:\\Users"));
        assert!(!is_absolute_path("vendor"));
        assert!(!is_absolute_path("./src"));
        assert!(!is_absolute_path(""));
    }

    #[test]
    fn test_find_shortest_path() {
        assert_eq!(find_shortest_path("/foo/bar/file", "/foo", false), "../");
        assert_eq!(find_shortest_path("/foo/bar/file", "/foo/bar", false), "./");
        assert_eq!(find_shortest_path("/foo/bar/file", "/foo/bar/vendor", false), "vendor");
        assert_eq!(find_shortest_path("/foo/bar", "/foo/baz", false), "baz");
        assert_eq!(find_shortest_path("/foo/bar", "/foo/baz", true), "../baz");
        assert_eq!(find_shortest_path("/foo/bar/", "/foo/bar", true), "./");
        assert_eq!(find_shortest_path("/foo/bar/file", "/oops", false), "/oops");
        assert_eq!(find_shortest_path("C:/foo/bar", "D:/foo", true), "D:/foo");
    }

    #[test]
    fn test_find_shortest_path_code() {
        assert_eq!(find_shortest_path_code("/foo/bar", "/foo/bar", true), "__DIR__");
        assert_eq!(find_shortest_path_code("/foo/bar", "/foo/bar", false), "__FILE__");
        assert_eq!(
            find_shortest_path_code("/foo/bar", "/foo/bar/baz", true),
            "__DIR__ . '/baz'"
        );
        assert_eq!(
            find_shortest_path_code("/w/vendor/.composer", "/w/vendor", true),
            "dirname(__DIR__)"
        );
        assert_eq!(
            find_shortest_path_code("/w/vendor", "/w", true),
            "dirname(__DIR__)"
        );
        assert_eq!(
            find_shortest_path_code("/w/vendor/subdir", "/w", true),
            "dirname(dirname(__DIR__))"
        );
        assert_eq!(
            find_shortest_path_code("/foo/bar/file.php", "/foo/baz", false),
            "dirname(__DIR__) . '/baz'"
        );
        assert_eq!(
            find_shortest_path_code("/home/app", "/opt/vendor", true),
            "'/opt/vendor'"
        );
    }

    #[test]
    fn test_resolve_declared() {
        assert_eq!(resolve_declared("/w/vendor/a/a", "src/"), "/w/vendor/a/a/src/");
        assert_eq!(resolve_declared("/w/vendor/a/a/", "./lib"), "/w/vendor/a/a/lib");
        assert_eq!(resolve_declared("/w", "/abs/lib"), "/abs/lib");
    }

    #[test]
    fn test_strip_dir_prefix_respects_segments() {
        assert_eq!(strip_dir_prefix("/w/vendor/a", "/w/vendor"), Some("/a"));
        assert_eq!(strip_dir_prefix("/w/vendor", "/w/vendor"), Some(""));
        assert_eq!(strip_dir_prefix("/w/vendors/a", "/w/vendor"), None);
    }

    fn resolver(base: &str, vendor: &str, target: &str) -> PathResolver {
        PathResolver::new(
            &PathBuf::from(base),
            &PathBuf::from(vendor),
            &PathBuf::from(target),
        )
    }

    #[test]
    fn test_path_code_vendor_inside_base() {
        let r = resolver("/w", "/w/vendor", "/w/vendor/.composer");
        assert_eq!(r.vendor_dir_code(), "dirname(__DIR__)");
        assert_eq!(r.base_dir_code(), "dirname($vendorDir)");
        assert_eq!(r.path_code("/w/vendor/a/a/src/"), "$vendorDir . '/a/a/src/'");
        assert_eq!(r.path_code("/w/src/"), "$baseDir . '/src/'");
        assert_eq!(r.path_code("/elsewhere/lib"), "'/elsewhere/lib'");
    }

    #[test]
    fn test_path_code_vendor_same_as_base() {
        let r = resolver("/w", "/w", "/w/.composer");
        assert_eq!(r.vendor_dir_code(), "dirname(__DIR__)");
        assert_eq!(r.base_dir_code(), "$vendorDir");
        assert_eq!(r.path_code("/w/src/"), "$vendorDir . '/src/'");
    }

    #[test]
    fn test_path_code_without_common_root() {
        let r = resolver("/home/app", "/opt/vendor", "/opt/vendor/.composer");
        assert_eq!(r.vendor_dir_code(), "dirname(__DIR__)");
        assert_eq!(r.base_dir_code(), "'/home/app'");
        assert_eq!(r.path_code("/home/app/src/"), "$baseDir . '/src/'");
    }
}
