//! Vendor-path command implementation

use super::GlobalOptions;
use crate::cli::VendorPathArgs;
use crate::error::Result;

/// Run vendor-path command
pub fn run(options: &GlobalOptions, args: VendorPathArgs) -> Result<()> {
    let config = options.load_project()?;
    let manager = config.installation_manager()?;
    println!("{}", manager.vendor_path(args.absolute));
    Ok(())
}
