//! Command implementations for the autoload CLI

pub mod apply;
pub mod dump;
pub mod vendor_path;
pub mod version;

use std::path::PathBuf;

use crate::config::ProjectConfig;
use crate::error::Result;

/// Options shared by every project command
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub working_dir: Option<PathBuf>,
    pub vendor_dir: Option<String>,
}

impl GlobalOptions {
    /// Load the project of the selected working directory
    pub fn load_project(&self) -> Result<ProjectConfig> {
        let working_dir = match &self.working_dir {
            Some(path) => path.clone(),
            None => std::env::current_dir()?,
        };
        ProjectConfig::load(working_dir, self.vendor_dir.as_deref())
    }
}
