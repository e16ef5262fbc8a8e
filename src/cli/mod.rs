//! CLI definitions using clap derive API
//!
//! Argument types of each command live in their own submodule:
//! - dump: Dump command arguments
//! - apply: Apply command arguments
//! - vendor_path: Vendor-path command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod apply;
pub mod dump;
pub mod vendor_path;

pub use apply::ApplyArgs;
pub use dump::DumpArgs;
pub use vendor_path::VendorPathArgs;

use crate::config::VENDOR_DIR_ENV;

/// Autoload - package installation and class autoloading
///
/// Executes resolved install operations and generates PHP autoload tables.
#[derive(Parser, Debug)]
#[command(
    name = "autoload",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Package installation and autoload generation for PHP projects",
    long_about = "Autoload executes resolved install, update and uninstall operations against \
                  the vendor directory and generates the namespace, classmap and include path \
                  tables PHP code loads its classes through.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  autoload dump                       \x1b[90m# Regenerate autoload files\x1b[0m\n   \
                  autoload apply operations.json      \x1b[90m# Run resolved operations\x1b[0m\n   \
                  autoload vendor-path --absolute     \x1b[90m# Print the vendor directory\x1b[0m\n   \
                  autoload -d ../app dump             \x1b[90m# Work on another project\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Project directory containing composer.json (defaults to current directory)
    #[arg(long = "working-dir", short = 'd', global = true, env = "AUTOLOAD_WORKING_DIR")]
    pub working_dir: Option<PathBuf>,

    /// Vendor directory, overrides config.vendor-dir of composer.json
    #[arg(long = "vendor-dir", global = true, env = VENDOR_DIR_ENV)]
    pub vendor_dir: Option<String>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate autoload files for the installed packages
    #[command(visible_alias = "dump-autoload")]
    Dump(DumpArgs),

    /// Execute install, update and uninstall operations
    Apply(ApplyArgs),

    /// Print the vendor directory
    VendorPath(VendorPathArgs),

    /// Show version information
    #[command(hide = true)]
    Version,
}
