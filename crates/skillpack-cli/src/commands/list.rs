//! List command implementation

use crate::cli::ListArgs;
use crate::error::add_package_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use skillpack_core::inspection::list_package_entries;

pub fn execute(args: &ListArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let entries = add_package_context(list_package_entries(&args.package), &args.package)?;

    formatter.format_listing(&entries, args.long, args.human_readable)?;

    Ok(())
}
