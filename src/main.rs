//! Autoload - installer dispatch and class autoload generation
//!
//! Runs resolved package operations against a vendor directory and generates
//! the PHP autoload tables for the installed packages.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use autoload::cli::{Cli, Commands};
use autoload::commands::{self, GlobalOptions};

/// Environment variable holding the log filter
const LOG_ENV: &str = "AUTOLOAD_LOG";

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = GlobalOptions {
        working_dir: cli.working_dir,
        vendor_dir: cli.vendor_dir,
    };

    let result = match cli.command {
        Commands::Dump(args) => commands::dump::run(&options, args),
        Commands::Apply(args) => commands::apply::run(&options, args),
        Commands::VendorPath(args) => commands::vendor_path::run(&options, args),
        Commands::Version => commands::version::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
