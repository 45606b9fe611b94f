//! JSON output formatter for review reports
//!
//! Provides structured JSON and NDJSON output formats for programmatic
//! integration. Each reviewed file keeps its full analysis envelope.

use crate::output::FileReport;
use serde::Serialize;
use shinsa_core::diagnostic::Severity;
use std::io::{self, Write};

#[derive(Serialize)]
pub struct JsonOutput<'a> {
    pub version: &'static str,
    pub metadata: JsonMetadata,
    pub summary: JsonSummary,
    pub files: &'a [FileReport],
}

#[derive(Serialize)]
pub struct JsonMetadata {
    pub shinsa_version: &'static str,
    pub working_directory: String,
    pub analyzed_paths: Vec<String>,
}

#[derive(Serialize)]
pub struct JsonSummary {
    pub total_files: usize,
    pub files_with_issues: usize,
    pub parse_failures: usize,
    pub total_issues: usize,
    pub by_severity: SeverityCounts,
}

#[derive(Serialize)]
pub struct SeverityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Serialize)]
#[serde(tag = "type")]
pub enum NdjsonRecord<'a> {
    #[serde(rename = "metadata")]
    Metadata(JsonMetadata),
    #[serde(rename = "file")]
    File(&'a FileReport),
    #[serde(rename = "summary")]
    Summary(JsonSummary),
}

pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format(
        &self,
        reports: &[FileReport],
        total_files: usize,
        analyzed_paths: &[String],
    ) -> String {
        let output = JsonOutput {
            version: "1.0",
            metadata: self.build_metadata(analyzed_paths),
            summary: self.build_summary(reports, total_files),
            files: reports,
        };
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn format_ndjson<W: Write>(
        &self,
        reports: &[FileReport],
        total_files: usize,
        analyzed_paths: &[String],
        writer: &mut W,
    ) -> io::Result<()> {
        let metadata = self.build_metadata(analyzed_paths);
        writeln!(
            writer,
            "{}",
            serde_json::to_string(&NdjsonRecord::Metadata(metadata))?
        )?;

        for report in reports {
            writeln!(
                writer,
                "{}",
                serde_json::to_string(&NdjsonRecord::File(report))?
            )?;
        }

        let summary = self.build_summary(reports, total_files);
        writeln!(
            writer,
            "{}",
            serde_json::to_string(&NdjsonRecord::Summary(summary))?
        )?;

        Ok(())
    }

    fn build_metadata(&self, analyzed_paths: &[String]) -> JsonMetadata {
        JsonMetadata {
            shinsa_version: env!("CARGO_PKG_VERSION"),
            working_directory: std::env::current_dir()
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_default(),
            analyzed_paths: analyzed_paths.to_vec(),
        }
    }

    fn build_summary(&self, reports: &[FileReport], total_files: usize) -> JsonSummary {
        let mut by_severity = SeverityCounts {
            high: 0,
            medium: 0,
            low: 0,
        };
        let mut files_with_issues = 0;
        let mut parse_failures = 0;
        let mut total_issues = 0;

        for report in reports {
            if !report.result.issues.is_empty() {
                files_with_issues += 1;
            }
            if !report.result.success {
                parse_failures += 1;
            }
            total_issues += report.result.issues.len();

            for issue in &report.result.issues {
                match issue.severity {
                    Severity::High => by_severity.high += 1,
                    Severity::Medium => by_severity.medium += 1,
                    Severity::Low => by_severity.low += 1,
                }
            }
        }

        JsonSummary {
            total_files,
            files_with_issues,
            parse_failures,
            total_issues,
            by_severity,
        }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}
