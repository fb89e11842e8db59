//! Package command implementation.

use crate::cli::PackageArgs;
use crate::error::add_package_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use skillpack_core::PackageConfig;
use skillpack_core::try_package_skill;

pub fn execute(args: &PackageArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = build_config(args);

    let report = add_package_context(
        try_package_skill(&args.skill_dir, args.output_dir.as_deref(), &config),
        &args.skill_dir,
    )?;

    formatter.format_package_result(&report)?;

    Ok(())
}

fn build_config(args: &PackageArgs) -> PackageConfig {
    let mut config = PackageConfig::default()
        .with_overwrite(!args.no_overwrite)
        .with_preserve_permissions(!args.no_permissions);

    if args.store {
        config = config.with_stored();
    } else if let Some(level) = args.compression_level {
        config = config.with_compression_level(level);
    }

    config
}
