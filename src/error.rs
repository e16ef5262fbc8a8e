//! Error types and handling for autoload
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for installation and autoload generation
#[derive(Error, Diagnostic, Debug)]
pub enum AutoloadError {
    // Installer errors
    #[error("Invalid vendor directory: {path}: {reason}")]
    #[diagnostic(
        code(autoload::installer::invalid_vendor_dir),
        help("The vendor directory must be a directory reachable from the working directory")
    )]
    InvalidVendorDir { path: String, reason: String },

    #[error("Unknown installer type: {package_type}")]
    #[diagnostic(
        code(autoload::installer::unsupported_type),
        help("Register an installer that supports this package type")
    )]
    UnsupportedPackageType { package_type: String },

    #[error("Package '{name}' is not installed")]
    #[diagnostic(code(autoload::installer::not_installed))]
    PackageNotInstalled { name: String },

    #[error("Invalid package name '{name}': {reason}")]
    #[diagnostic(
        code(autoload::installer::invalid_package_name),
        help("Package names are slash-separated segments such as \"vendor/package\"")
    )]
    InvalidPackageName { name: String, reason: String },

    #[error("Package '{name}' has no dist to install from")]
    #[diagnostic(
        code(autoload::installer::source_missing),
        help("Declare a dist of type \"path\" pointing at the package sources")
    )]
    PackageSourceMissing { name: String },

    #[error("Unsupported dist type '{kind}' for package '{name}'")]
    #[diagnostic(code(autoload::installer::unsupported_dist))]
    UnsupportedDist { name: String, kind: String },

    // Autoload errors
    #[error("Class '{class}' is declared in both {first} and {second}")]
    #[diagnostic(
        code(autoload::classmap::duplicate_class),
        help("Remove one of the declarations or exclude one of the files from the classmap")
    )]
    DuplicateClass {
        class: String,
        first: String,
        second: String,
    },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(autoload::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(autoload::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    // File system errors
    #[error("Failed to create directory: {path}: {reason}")]
    #[diagnostic(code(autoload::fs::create_dir_failed))]
    DirectoryCreateFailed { path: String, reason: String },

    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(autoload::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(autoload::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(autoload::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for AutoloadError {
    fn from(err: std::io::Error) -> Self {
        AutoloadError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for AutoloadError {
    fn from(err: serde_json::Error) -> Self {
        AutoloadError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, AutoloadError>;
