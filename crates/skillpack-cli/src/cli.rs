//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skillpack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Package a skill directory into a .skill file
    Package(PackageArgs),
    /// List package contents without extraction
    List(ListArgs),
    /// Verify package layout and entry names
    Verify(VerifyArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct PackageArgs {
    /// Skill directory containing SKILL.md
    #[arg(value_name = "SKILL_DIR")]
    pub skill_dir: PathBuf,

    /// Output directory (default: current directory)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Compression level (1-9)
    #[arg(
        short = 'l',
        long,
        value_parser = clap::value_parser!(u8).range(1..=9),
        conflicts_with = "store"
    )]
    pub compression_level: Option<u8>,

    /// Store files without compression
    #[arg(long)]
    pub store: bool,

    /// Fail if the package already exists
    #[arg(long)]
    pub no_overwrite: bool,

    /// Do not record unix permissions
    #[arg(long)]
    pub no_permissions: bool,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Path to the package file
    #[arg(value_name = "PACKAGE")]
    pub package: PathBuf,

    /// Show mode and size of each entry
    #[arg(short, long)]
    pub long: bool,

    /// Show sizes in human-readable format
    #[arg(short = 'H', long)]
    pub human_readable: bool,
}

#[derive(clap::Args)]
pub struct VerifyArgs {
    /// Path to the package file
    #[arg(value_name = "PACKAGE")]
    pub package: PathBuf,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum, value_name = "SHELL")]
    pub shell: Shell,
}
