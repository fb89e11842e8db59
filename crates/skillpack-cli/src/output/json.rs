//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use skillpack_core::PackageReport;
use skillpack_core::VerificationReport;
use skillpack_core::inspection::PackageEntry;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct PackageOutput {
    output_path: String,
    root_name: String,
    files_added: usize,
    directories_added: usize,
    bytes_read: u64,
    archive_size: u64,
    compression_ratio: f64,
    duration_ms: u128,
    entries: Vec<String>,
}

impl From<&PackageReport> for PackageOutput {
    fn from(report: &PackageReport) -> Self {
        Self {
            output_path: report.output_path.display().to_string(),
            root_name: report.root_name.clone(),
            files_added: report.files_added,
            directories_added: report.directories_added,
            bytes_read: report.bytes_read,
            archive_size: report.archive_size,
            compression_ratio: report.compression_ratio(),
            duration_ms: report.duration.as_millis(),
            entries: report.entries.clone(),
        }
    }
}

#[derive(Serialize)]
struct EntryOutput<'a> {
    name: &'a str,
    is_dir: bool,
    is_symlink: bool,
    size: u64,
    compressed_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<u32>,
}

#[derive(Serialize)]
struct IssueOutput<'a> {
    severity: String,
    category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    entry: Option<&'a str>,
    message: &'a str,
}

#[derive(Serialize)]
struct VerificationOutput<'a> {
    status: String,
    root_name: Option<&'a str>,
    total_entries: usize,
    issues: Vec<IssueOutput<'a>>,
}

impl OutputFormatter for JsonFormatter {
    fn format_package_result(&self, report: &PackageReport) -> Result<()> {
        Self::output(&JsonOutput::success("package", PackageOutput::from(report)))
    }

    fn format_listing(
        &self,
        entries: &[PackageEntry],
        _long: bool,
        _human_readable: bool,
    ) -> Result<()> {
        let data: Vec<_> = entries
            .iter()
            .map(|e| EntryOutput {
                name: &e.name,
                is_dir: e.is_dir,
                is_symlink: e.is_symlink(),
                size: e.size,
                compressed_size: e.compressed_size,
                mode: e.mode,
            })
            .collect();

        Self::output(&JsonOutput::success("list", data))
    }

    fn format_verification_report(&self, report: &VerificationReport) -> Result<()> {
        let data = VerificationOutput {
            status: report.status.to_string().to_lowercase(),
            root_name: report.root_name.as_deref(),
            total_entries: report.total_entries,
            issues: report
                .issues
                .iter()
                .map(|i| IssueOutput {
                    severity: i.severity.to_string().to_lowercase(),
                    category: i.category.to_string(),
                    entry: i.entry_name.as_deref(),
                    message: &i.message,
                })
                .collect(),
        };

        Self::output(&JsonOutput::success("verify", data))
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::error("error", format!("{error:#}"));
        let _ = Self::output(&output);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_package_output_fields() {
        let report = PackageReport {
            output_path: PathBuf::from("out/demo.skill"),
            root_name: "demo".into(),
            files_added: 2,
            entries: vec!["demo/SKILL.md".into(), "demo/script.py".into()],
            ..PackageReport::default()
        };

        let json = serde_json::to_value(JsonOutput::success(
            "package",
            PackageOutput::from(&report),
        ))
        .unwrap();

        assert_eq!(json["operation"], "package");
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["output_path"], "out/demo.skill");
        assert_eq!(json["data"]["files_added"], 2);
        assert_eq!(json["data"]["entries"][1], "demo/script.py");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_error_output_shape() {
        let json = serde_json::to_value(JsonOutput::error("error", "boom")).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "boom");
        assert!(json.get("data").is_none());
    }
}
