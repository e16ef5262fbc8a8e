//! Autoload - installer dispatch and class autoload generation
//!
//! Executes resolved install, update and uninstall operations through
//! type-specific installer strategies, and generates the PHP lookup tables
//! (namespace prefixes, classmap, include paths) that let installed code be
//! loaded without a central registry.

pub mod autoload;
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod error;
pub mod installer;
pub mod package;

pub use autoload::{AutoloadGenerator, GeneratedFiles};
pub use error::{AutoloadError, Result};
pub use installer::{InstallationManager, InstallerStrategy, Operation};
pub use package::{ArrayRepository, InstalledRepository, Package, Repository, WritableRepository};
