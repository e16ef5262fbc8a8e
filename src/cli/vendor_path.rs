use clap::Parser;

/// Arguments for the vendor-path command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Relative to the working directory:\n    autoload vendor-path\n\n\
                  Absolute:\n    autoload vendor-path --absolute")]
pub struct VendorPathArgs {
    /// Print the absolute path
    #[arg(long)]
    pub absolute: bool,
}
