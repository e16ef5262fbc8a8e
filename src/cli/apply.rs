use clap::Parser;
use std::path::PathBuf;

/// Arguments for the apply command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Run operations and regenerate autoload files:\n    autoload apply operations.json\n\n\
                  Run operations only:\n    autoload apply operations.json --no-dump\n\n\
                  OPERATIONS FILE:\n  \
                  A JSON array of jobs run in order, for example\n    \
                  [{\"job\": \"install\", \"package\": {\"name\": \"acme/log\", \"version\": \"1.0\",\n      \
                  \"dist\": {\"type\": \"path\", \"url\": \"packages/log\"}}}]")]
pub struct ApplyArgs {
    /// JSON file with the operations to execute
    pub operations: PathBuf,

    /// Skip autoload generation after the operations succeeded
    #[arg(long)]
    pub no_dump: bool,
}
