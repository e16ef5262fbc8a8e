//! Apply command implementation
//!
//! Executes a batch of resolved operations in order. The batch stops at the
//! first failing operation. The installed repository is saved either way so
//! it matches what is on disk, autoload files are only regenerated when every
//! operation succeeded.

use std::fs;
use std::path::Path;

use console::Style;

use super::{GlobalOptions, dump};
use crate::cli::ApplyArgs;
use crate::config::ProjectConfig;
use crate::error::{AutoloadError, Result};
use crate::installer::Operation;
use crate::package::WritableRepository;

/// Run apply command
pub fn run(options: &GlobalOptions, args: ApplyArgs) -> Result<()> {
    let config = options.load_project()?;
    let operations = read_operations(&args.operations)?;
    let manager = config.installation_manager()?;
    let mut repository = ProjectConfig::installed_repository(&manager)?;

    if operations.is_empty() {
        println!("Nothing to install, update or uninstall");
    } else {
        println!(
            "{}",
            Style::new()
                .bold()
                .green()
                .apply_to(format!("Executing {} operations", operations.len()))
        );
    }

    let mut outcome = Ok(());
    for operation in &operations {
        println!("  - {}", describe(operation));
        if let Err(e) = manager.execute(&mut repository, operation) {
            outcome = Err(e);
            break;
        }
    }
    repository.write()?;
    outcome?;

    if !args.no_dump {
        let generated = dump::generate(&config, &manager, &repository, None)?;
        dump::report(&generated);
    }
    Ok(())
}

/// Read a JSON array of operations
pub fn read_operations(path: &Path) -> Result<Vec<Operation>> {
    if !path.is_file() {
        return Err(AutoloadError::ConfigNotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path).map_err(|e| AutoloadError::FileReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| AutoloadError::ConfigParseFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn describe(operation: &Operation) -> String {
    let (verb, subject) = match operation {
        Operation::Install(op) => ("Installing", op.package.to_string()),
        Operation::Update(op) => ("Updating", format!("{} to {}", op.initial, op.target)),
        Operation::Uninstall(op) => ("Uninstalling", op.package.to_string()),
    };
    let mut line = format!("{} {}", verb, Style::new().green().apply_to(subject));
    if let Some(reason) = operation.reason() {
        line.push_str(&format!(" {}", Style::new().dim().apply_to(format!("({reason})"))));
    }
    line
}
