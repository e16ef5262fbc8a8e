use clap::Parser;
use std::path::PathBuf;

/// Arguments for the dump command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Regenerate autoload files:\n    autoload dump\n\n\
                  Write them somewhere else:\n    autoload dump --output build/autoload")]
pub struct DumpArgs {
    /// Output directory, relative to the working directory (defaults to <vendor>/.composer)
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output: Option<PathBuf>,
}
