//! Dump command implementation
//!
//! Regenerates the autoload files from the installed repository and the
//! project manifest.

use std::path::Path;

use console::Style;

use super::GlobalOptions;
use crate::autoload::{AutoloadGenerator, GeneratedFiles};
use crate::cli::DumpArgs;
use crate::config::ProjectConfig;
use crate::error::Result;
use crate::installer::InstallationManager;
use crate::package::Repository;

/// Run dump command
pub fn run(options: &GlobalOptions, args: DumpArgs) -> Result<()> {
    let config = options.load_project()?;
    let manager = config.installation_manager()?;
    let repository = ProjectConfig::installed_repository(&manager)?;

    let generated = generate(&config, &manager, &repository, args.output.as_deref())?;
    report(&generated);
    Ok(())
}

/// Generate autoload files into `output`, or the metadata dir by default
pub fn generate(
    config: &ProjectConfig,
    manager: &InstallationManager,
    repository: &dyn Repository,
    output: Option<&Path>,
) -> Result<GeneratedFiles> {
    let target_dir = match output {
        Some(dir) => config.working_dir().join(dir),
        None => ProjectConfig::metadata_dir(manager),
    };
    AutoloadGenerator::new().generate(repository, &config.root_package(), manager, &target_dir)
}

pub fn report(generated: &GeneratedFiles) {
    println!("{}", Style::new().bold().green().apply_to("Generating autoload files"));
    for path in &generated.written {
        println!("  {}", Style::new().dim().apply_to(path.display()));
    }
    println!(
        "{} classes, {} namespace prefixes{}",
        Style::new().cyan().apply_to(generated.classes),
        Style::new().cyan().apply_to(generated.prefixes),
        if generated.include_paths {
            ", include paths"
        } else {
            ""
        }
    );
}
