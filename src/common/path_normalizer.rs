//! Path normalization shared by the installation manager and the autoload generator
//!
//! Generated tables compare paths by string prefix, so every path that ends up
//! in them is first made absolute, symlink-resolved and written with forward
//! slashes.

use normpath::PathExt;
use std::path::{Component, Path, PathBuf};

/// Resolve a path against `base` and canonicalize it as far as it exists
///
/// For non-existent paths, normalizes the longest existing ancestor and appends
/// the remaining components to ensure consistent symlink resolution
/// (e.g., /var -> /private/var on macOS).
pub fn normalize(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    if let Ok(norm) = joined.normalize() {
        return norm.as_path().to_path_buf();
    }

    let path = lexical_clean(&joined);

    let mut current = path.as_path();
    let mut components = Vec::new();

    while !current.exists() {
        let (Some(file_name), Some(parent)) = (current.file_name(), current.parent()) else {
            return path;
        };
        components.push(file_name);
        current = parent;
    }

    let mut result = current
        .normalize()
        .map_or_else(|_| current.to_path_buf(), |norm| norm.as_path().to_path_buf());
    for component in components.iter().rev() {
        result.push(component);
    }

    result
}

/// Drop `.` components and fold `..` into the preceding component
fn lexical_clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !cleaned.pop() {
                    cleaned.push(component);
                }
            }
            other => cleaned.push(other),
        }
    }
    cleaned
}

/// Convert a path to a forward-slash string without a trailing slash
pub fn to_slash_string(path: &Path) -> String {
    let s = path.to_string_lossy().replace('\\', "/");
    trim_trailing_slash(&s).to_string()
}

/// Remove trailing slashes, keeping a lone root slash
pub fn trim_trailing_slash(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && path.starts_with('/') {
        "/"
    } else {
        trimmed
    }
}
