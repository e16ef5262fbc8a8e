//! Common file system operations with unified error handling

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{AutoloadError, Result};

fn file_write_error(path: &Path, e: impl std::fmt::Display) -> AutoloadError {
    AutoloadError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

#[derive(Default, Clone)]
pub struct CopyOptions {
    pub exclude: Vec<String>,
}

impl CopyOptions {
    pub fn exclude_vcs() -> Self {
        Self {
            exclude: vec![".git".to_string(), ".svn".to_string(), ".hg".to_string()],
        }
    }
}

/// Copy a directory recursively with options
pub fn copy_dir_recursive<P1, P2>(src: P1, dst: P2, options: &CopyOptions) -> std::io::Result<()>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
{
    let src_ref = src.as_ref();
    let dst_ref = dst.as_ref();

    if !dst_ref.exists() {
        fs::create_dir_all(dst_ref)?;
    }

    for entry in fs::read_dir(src_ref)? {
        let entry = entry?;
        let entry_path = entry.path();
        let file_name = entry.file_name();

        if options
            .exclude
            .iter()
            .any(|excluded| file_name.to_str() == Some(excluded.as_str()))
        {
            continue;
        }

        let dst_path = dst_ref.join(&file_name);

        if entry_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&entry_path, &dst_path, options)?;
        } else {
            fs::copy(&entry_path, &dst_path)?;
        }
    }

    Ok(())
}

/// Create a directory and its parents
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|e| AutoloadError::DirectoryCreateFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Remove a directory tree, a missing directory is not an error
pub fn remove_dir_if_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    fs::remove_dir_all(path).map_err(|e| file_write_error(path, e))
}

/// Remove a file, a missing file is not an error
pub fn remove_file_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(file_write_error(path, e)),
    }
}

/// Replace a file's contents without readers ever seeing a partial write
///
/// The contents go to a temporary file in the same directory which is then
/// renamed over the target.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir(dir)?;

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| file_write_error(path, e))?;
    temp.write_all(contents.as_bytes())
        .map_err(|e| file_write_error(path, e))?;
    temp.persist(path).map_err(|e| file_write_error(path, e.error))?;
    Ok(())
}
