//! Verify command implementation

use crate::cli::VerifyArgs;
use crate::error::add_package_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use anyhow::bail;
use skillpack_core::PackageConfig;
use skillpack_core::VerificationStatus;
use skillpack_core::verify_package;

pub fn execute(args: &VerifyArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = PackageConfig::default();

    let report = add_package_context(verify_package(&args.package, &config), &args.package)?;

    formatter.format_verification_report(&report)?;

    match report.status {
        VerificationStatus::Pass => Ok(()),
        VerificationStatus::Fail => {
            bail!("Package verification failed: {}", args.package.display())
        }
    }
}
