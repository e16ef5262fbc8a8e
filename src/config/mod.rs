//! Configuration handling for autoload
//!
//! This module contains:
//! - `composer.json` - Project manifest
//! - Resolved project configuration with vendor directory overrides

pub mod manifest;
pub mod project;

pub use manifest::{MANIFEST_FILE, Manifest};
pub use project::{INSTALLED_FILE, METADATA_DIR, ProjectConfig, VENDOR_DIR_ENV};
