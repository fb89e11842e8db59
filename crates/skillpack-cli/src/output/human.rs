//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use skillpack_core::IssueSeverity;
use skillpack_core::PackageReport;
use skillpack_core::VerificationReport;
use skillpack_core::VerificationStatus;
use skillpack_core::inspection::PackageEntry;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (count, c) in s.chars().rev().enumerate() {
            if count > 0 && count % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }

        result.chars().rev().collect()
    }

    fn type_char(entry: &PackageEntry) -> &'static str {
        if entry.is_symlink() {
            "l"
        } else if entry.is_dir {
            "d"
        } else {
            "-"
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_package_result(&self, report: &PackageReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            let _ = self.term.write_line(&format!(
                "{} Package created: {}",
                style("✓").green().bold(),
                report.output_path.display()
            ));
        } else {
            let _ = self.term.write_line(&format!(
                "Package created: {}",
                report.output_path.display()
            ));
        }

        let _ = self.term.write_line("");
        let _ = self.term.write_line(&format!(
            "  Files added:      {}",
            Self::format_number(report.files_added)
        ));
        let _ = self.term.write_line(&format!(
            "  Directories:      {}",
            Self::format_number(report.directories_added)
        ));
        let _ = self.term.write_line(&format!(
            "  Total size:       {}",
            Self::format_size(report.bytes_read)
        ));
        let _ = self.term.write_line(&format!(
            "  Package size:     {}",
            Self::format_size(report.archive_size)
        ));

        if self.verbose {
            let _ = self.term.write_line(&format!(
                "  Ratio:            {:.2}",
                report.compression_ratio()
            ));
            let _ = self
                .term
                .write_line(&format!("  Duration:         {:?}", report.duration));
            let _ = self.term.write_line("");
            for name in &report.entries {
                let _ = self.term.write_line(&format!("  {name}"));
            }
        }

        Ok(())
    }

    fn format_listing(
        &self,
        entries: &[PackageEntry],
        long: bool,
        human_readable: bool,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if !long {
            for entry in entries {
                let _ = self.term.write_line(&entry.name);
            }
            return Ok(());
        }

        let mut total_size = 0u64;
        for entry in entries {
            total_size += entry.size;
            let size_str = if human_readable {
                Self::format_size(entry.size)
            } else {
                entry.size.to_string()
            };
            let mode_str = entry
                .mode
                .map_or_else(|| "-".to_string(), |m| format!("{:o}", m & 0o7777));

            let _ = self.term.write_line(&format!(
                "{}{:<6} {:>10}  {}",
                Self::type_char(entry),
                mode_str,
                size_str,
                entry.name
            ));
        }

        let _ = self.term.write_line("");
        let _ = self.term.write_line(&format!(
            "Total: {} entries, {}",
            Self::format_number(entries.len()),
            Self::format_size(total_size)
        ));

        Ok(())
    }

    fn format_verification_report(&self, report: &VerificationReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            let status_str = match report.status {
                VerificationStatus::Pass => style("PASSED").green().bold(),
                VerificationStatus::Fail => style("FAILED").red().bold(),
            };
            let _ = self
                .term
                .write_line(&format!("Package verification: {status_str}"));
        } else {
            let _ = self
                .term
                .write_line(&format!("Package verification: {}", report.status));
        }

        let _ = self.term.write_line(&format!(
            "  Root: {}",
            report.root_name.as_deref().unwrap_or("-")
        ));
        let _ = self.term.write_line(&format!(
            "  Total entries: {}",
            Self::format_number(report.total_entries)
        ));

        if !report.issues.is_empty() {
            let _ = self.term.write_line("");
            let _ = self.term.write_line("Issues:");

            for issue in &report.issues {
                let severity_str = if self.use_colors {
                    match issue.severity {
                        IssueSeverity::Critical => style("CRITICAL").red().bold().to_string(),
                        IssueSeverity::High => style("HIGH").red().to_string(),
                    }
                } else {
                    format!("[{}]", issue.severity)
                };

                let _ = self
                    .term
                    .write_line(&format!("  {} {}", severity_str, issue.message));
            }
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        let term = Term::stderr();
        if self.use_colors {
            let _ = term.write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = term.write_line(&format!("ERROR: {error:?}"));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(HumanFormatter::format_size(0), "0 B");
        assert_eq!(HumanFormatter::format_size(512), "512 B");
        assert_eq!(HumanFormatter::format_size(1023), "1023 B");
    }

    #[test]
    fn test_format_size_units() {
        assert_eq!(HumanFormatter::format_size(1536), "1.5 KB");
        assert_eq!(HumanFormatter::format_size(2 * 1024 * 1024), "2.0 MB");
        assert_eq!(HumanFormatter::format_size(1024 * 1024 * 1024), "1.0 GB");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(HumanFormatter::format_number(0), "0");
        assert_eq!(HumanFormatter::format_number(999), "999");
        assert_eq!(HumanFormatter::format_number(1000), "1,000");
        assert_eq!(HumanFormatter::format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn test_type_char() {
        let mut entry = PackageEntry {
            name: "demo/".into(),
            is_dir: true,
            size: 0,
            compressed_size: 0,
            mode: Some(0o040_755),
        };
        assert_eq!(HumanFormatter::type_char(&entry), "d");

        entry.is_dir = false;
        entry.mode = Some(0o100_644);
        assert_eq!(HumanFormatter::type_char(&entry), "-");

        entry.mode = Some(0o120_777);
        assert_eq!(HumanFormatter::type_char(&entry), "l");
    }
}
