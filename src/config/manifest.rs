//! Project manifest (composer.json)
//!
//! Only the fields the installer and the autoload generator act on are read,
//! everything else in the file is ignored.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{AutoloadError, Result};
use crate::package::{AutoloadRule, DEFAULT_PACKAGE_TYPE, Package, serialization};

pub const MANIFEST_FILE: &str = "composer.json";

/// Name given to a root package that does not declare one
pub const DEFAULT_ROOT_NAME: &str = "__root__";

pub const DEFAULT_ROOT_VERSION: &str = "1.0.0";

pub const DEFAULT_VENDOR_DIR: &str = "vendor";

/// Parsed composer.json
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(rename = "type", default)]
    pub package_type: Option<String>,

    #[serde(default, deserialize_with = "serialization::autoload::deserialize")]
    pub autoload: Vec<AutoloadRule>,

    #[serde(rename = "include-path", default)]
    pub include_paths: Vec<String>,

    #[serde(default)]
    pub config: ManifestConfig,
}

/// The `config` section of the manifest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestConfig {
    #[serde(rename = "vendor-dir", default)]
    pub vendor_dir: Option<String>,
}

impl Manifest {
    /// Load a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(AutoloadError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        let content = fs::read_to_string(path).map_err(|e| AutoloadError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&content).map_err(|e| match e {
            AutoloadError::ConfigParseFailed { reason, .. } => AutoloadError::ConfigParseFailed {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Vendor directory as declared, or the default
    pub fn vendor_dir(&self) -> &str {
        self.config.vendor_dir.as_deref().unwrap_or(DEFAULT_VENDOR_DIR)
    }

    /// The root package described by this manifest
    pub fn root_package(&self) -> Package {
        Package {
            name: self.name.clone().unwrap_or_else(|| DEFAULT_ROOT_NAME.to_string()),
            version: self
                .version
                .clone()
                .unwrap_or_else(|| DEFAULT_ROOT_VERSION.to_string()),
            package_type: self
                .package_type
                .clone()
                .unwrap_or_else(|| DEFAULT_PACKAGE_TYPE.to_string()),
            autoload: self.autoload.clone(),
            include_paths: self.include_paths.clone(),
            dist: None,
        }
    }
}
