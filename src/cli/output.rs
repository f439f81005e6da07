//! Output formatting for CLI

use super::error::CliError;
use crate::validation::ValidationReport;
use clap::ValueEnum;

/// How a validation report is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One `code: message (location)` line per error
pub fn format_text_report(report: &ValidationReport, source: &str) -> String {
    let mut output = String::new();

    if report.is_valid() {
        output.push_str(&format!(
            "✅ {} is a valid EDM {} model\n",
            source, report.version
        ));
        return output;
    }

    output.push_str(&format!(
        "⚠️  {} error(s) in {} (EDM {}):\n",
        report.errors().len(),
        source,
        report.version
    ));
    for error in report.errors() {
        output.push_str(&format!("  - {}\n", error));
    }
    if report.truncated {
        output.push_str("  ... further errors were not collected\n");
    }

    output
}

pub fn format_json_report(report: &ValidationReport) -> Result<String, CliError> {
    serde_json::to_string_pretty(report).map_err(|e| CliError::OutputError(e.to_string()))
}

pub fn format_report(
    report: &ValidationReport,
    source: &str,
    format: OutputFormat,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => Ok(format_text_report(report, source)),
        OutputFormat::Json => format_json_report(report),
    }
}
