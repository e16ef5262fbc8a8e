//! Package value types
//!
//! Packages are resolved elsewhere and handed to this crate read-only. The
//! autoload block is kept in declaration order since later rules for the same
//! prefix decide which base paths end up in the generated tables.

pub mod repository;
pub mod serialization;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use repository::{ArrayRepository, InstalledRepository, Repository, WritableRepository};

/// Package type used when a manifest does not declare one
pub const DEFAULT_PACKAGE_TYPE: &str = "library";

/// A single autoload declaration of a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoloadRule {
    /// PSR-0 style namespace prefix mapped to base directories.
    /// An empty prefix is the fallback bucket.
    Namespace { prefix: String, paths: Vec<String> },

    /// Directories or files to scan exhaustively for class declarations
    Classmap { paths: Vec<String> },
}

/// Where an installer strategy fetches package files from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dist {
    /// Dist type (only "path" is understood by the library installer)
    #[serde(rename = "type")]
    pub kind: String,

    /// Location of the dist, relative paths resolve against the working directory
    pub url: String,
}

/// A resolved package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,

    pub version: String,

    /// Free-form type tag used to pick an installer strategy
    #[serde(rename = "type", default = "default_package_type")]
    pub package_type: String,

    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        with = "serialization::autoload"
    )]
    pub autoload: Vec<AutoloadRule>,

    #[serde(
        rename = "include-path",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub include_paths: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dist: Option<Dist>,
}

fn default_package_type() -> String {
    DEFAULT_PACKAGE_TYPE.to_string()
}

impl Package {
    /// Create a package of the default type with no autoload rules
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            package_type: default_package_type(),
            autoload: Vec::new(),
            include_paths: Vec::new(),
            dist: None,
        }
    }

    #[must_use]
    pub fn with_type(mut self, package_type: impl Into<String>) -> Self {
        self.package_type = package_type.into();
        self
    }

    /// Add a namespace prefix rule
    #[must_use]
    pub fn with_namespace<I, S>(mut self, prefix: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.autoload.push(AutoloadRule::Namespace {
            prefix: prefix.into(),
            paths: paths.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Add a classmap rule
    #[must_use]
    pub fn with_classmap<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.autoload.push(AutoloadRule::Classmap {
            paths: paths.into_iter().map(Into::into).collect(),
        });
        self
    }

    #[must_use]
    pub fn with_include_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_dist(mut self, kind: impl Into<String>, url: impl Into<String>) -> Self {
        self.dist = Some(Dist {
            kind: kind.into(),
            url: url.into(),
        });
        self
    }

    /// Whether this is the same name and version as `other`
    pub fn same_release(&self, other: &Package) -> bool {
        self.name == other.name && self.version == other.version
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.version)
    }
}
