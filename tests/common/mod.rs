//! Common test utilities for autoload integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A project directory for integration tests
pub struct TestProject {
    /// Temporary directory, removed on drop
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

impl TestProject {
    /// Create a new, empty project
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in the project
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Create a local package source under `packages/<dir>` with one class file
    #[allow(dead_code)]
    pub fn create_package_source(&self, dir: &str, file: &str, class: &str) -> String {
        let source = format!("packages/{}", dir);
        self.write_file(
            &format!("{}/{}", source, file),
            &format!("<?php\n\nclass {} {{}}\n", class),
        );
        source
    }

    /// The autoload binary, run in the project with a clean environment
    pub fn cmd(&self) -> Command {
        let mut cmd = autoload_cmd();
        cmd.current_dir(&self.path)
            .env_remove("AUTOLOAD_VENDOR_DIR")
            .env_remove("AUTOLOAD_WORKING_DIR")
            .env_remove("AUTOLOAD_LOG");
        cmd
    }

    #[allow(dead_code)]
    pub fn root(&self) -> &Path {
        &self.path
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn autoload_cmd() -> Command {
    Command::cargo_bin("autoload").expect("Failed to find autoload binary")
}
