//! Check command - reviews Python files for anti-patterns

use crate::output::FileReport;
use crate::output::json::JsonFormatter;
use crate::output::pretty::PrettyFormatter;
use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use rayon::prelude::*;
use shinsa_core::analysis::AnalysisEngine;
use shinsa_core::config::load_config_or_default_with_warnings;
use shinsa_core::diagnostic::{AnalysisResult, Severity};
use shinsa_core::parser::ParsedModule;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;
use walkdir::WalkDir;

const PYTHON_EXTENSION: &str = "py";

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    Pretty,
    Text,
    Json,
    Ndjson,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SeverityLevel {
    Low,
    Medium,
    High,
}

impl SeverityLevel {
    fn to_severity(self) -> Severity {
        match self {
            SeverityLevel::Low => Severity::Low,
            SeverityLevel::Medium => Severity::Medium,
            SeverityLevel::High => Severity::High,
        }
    }
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Files or directories to review
    #[arg(value_name = "PATH", default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Output format for findings (pretty, text, json, ndjson)
    #[arg(short, long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Only report issues at or above this severity
    #[arg(long, value_name = "LEVEL")]
    pub min_severity: Option<SeverityLevel>,

    /// Exit with code 1 if any issue is found, regardless of severity
    #[arg(long)]
    pub strict: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl CheckArgs {
    pub fn run(&self) -> Result<()> {
        self.configure_colors();

        let config_root = self
            .paths
            .first()
            .cloned()
            .unwrap_or_else(|| PathBuf::from("."));
        let config_result = load_config_or_default_with_warnings(&config_root);
        for warning in &config_result.warnings {
            eprintln!("{} {}", "warning:".yellow().bold(), warning);
        }
        let filter = config_result
            .config
            .path_filter()
            .map_err(|err| anyhow::anyhow!("invalid configuration: {err}"))?;

        let mut files = Vec::new();
        for path in &self.paths {
            files.extend(discover_files(path)?);
        }
        files.sort();
        files.dedup();
        let files: Vec<PathBuf> = files
            .into_iter()
            .filter(|path| filter.allows(path))
            .collect();
        debug!("Reviewing {} Python file(s)", files.len());

        if files.is_empty() {
            println!("No Python files found.");
            return Ok(());
        }

        let engine = AnalysisEngine::new();
        let min_severity = self.min_severity.map(SeverityLevel::to_severity);

        let results: Vec<(String, String, AnalysisResult)> = files
            .par_iter()
            .filter_map(|file| {
                let display_path = file.to_string_lossy().to_string();
                let source = match fs::read_to_string(file) {
                    Ok(source) => source,
                    Err(err) => {
                        eprintln!("{} skipping {}: {}", "warning:".yellow().bold(), display_path, err);
                        return None;
                    }
                };
                debug!("Analyzing {}", display_path);
                let module = ParsedModule::from_source(&display_path, &source);
                let result = engine.check_module(&module);
                Some((display_path, source, result))
            })
            .collect();

        let total_files = files.len();
        let mut sources: HashMap<String, String> = HashMap::new();
        let mut reports: Vec<FileReport> = Vec::with_capacity(results.len());
        for (path, source, mut result) in results {
            if let Some(min) = min_severity {
                result.issues.retain(|issue| issue.severity >= min);
            }
            sources.insert(path.clone(), source);
            reports.push(FileReport { path, result });
        }

        let total_issues: usize = reports.iter().map(|report| report.result.issues.len()).sum();
        let has_high = reports
            .iter()
            .any(|report| report.result.max_severity() == Some(Severity::High));

        let analyzed_paths: Vec<String> = self
            .paths
            .iter()
            .map(|path| path.to_string_lossy().to_string())
            .collect();

        match self.format {
            OutputFormat::Json => self.output_json(&reports, total_files, &analyzed_paths),
            OutputFormat::Ndjson => self.output_ndjson(&reports, total_files, &analyzed_paths)?,
            OutputFormat::Text => self.output_text(&reports),
            OutputFormat::Pretty => self.output_pretty(&reports, sources),
        }

        if has_high || (self.strict && total_issues > 0) {
            process::exit(1);
        }

        Ok(())
    }

    fn configure_colors(&self) {
        let no_color_env = std::env::var("NO_COLOR").is_ok();
        if self.no_color || no_color_env {
            colored::control::set_override(false);
        }
    }

    fn output_text(&self, reports: &[FileReport]) {
        let mut high = 0usize;
        let mut medium = 0usize;
        let mut low = 0usize;

        for report in reports {
            for issue in &report.result.issues {
                match issue.severity {
                    Severity::High => high += 1,
                    Severity::Medium => medium += 1,
                    Severity::Low => low += 1,
                }
                let severity_str = match issue.severity {
                    Severity::High => "high".red().bold(),
                    Severity::Medium => "medium".yellow().bold(),
                    Severity::Low => "low".cyan().bold(),
                };

                println!(
                    "{}:{}:{}: {} [{}]: {}",
                    report.path,
                    issue.location.line,
                    issue.location.column,
                    severity_str,
                    issue.kind.as_str().dimmed(),
                    issue.text()
                );

                if let Some(fix) = &issue.suggested_fix {
                    println!("  {} {}", "suggested fix:".green(), fix);
                }
            }
        }

        let total = high + medium + low;
        if total > 0 {
            println!();
            println!(
                "Found {} issue(s) ({} high, {} medium, {} low)",
                total, high, medium, low
            );
        }
    }

    fn output_json(&self, reports: &[FileReport], total_files: usize, analyzed_paths: &[String]) {
        let formatter = JsonFormatter::new();
        println!(
            "{}",
            formatter.format(reports, total_files, analyzed_paths)
        );
    }

    fn output_ndjson(
        &self,
        reports: &[FileReport],
        total_files: usize,
        analyzed_paths: &[String],
    ) -> Result<()> {
        let formatter = JsonFormatter::new();
        let mut stdout = io::stdout().lock();
        formatter.format_ndjson(reports, total_files, analyzed_paths, &mut stdout)?;
        Ok(())
    }

    fn output_pretty(&self, reports: &[FileReport], sources: HashMap<String, String>) {
        let formatter = PrettyFormatter::with_sources(sources);
        print!("{}", formatter.format(reports));
    }
}

fn discover_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    if path.is_file() {
        if is_python_file(path) {
            return Ok(vec![path.to_path_buf()]);
        } else {
            return Ok(vec![]);
        }
    }

    let files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_entry(|e| !is_skipped(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| is_python_file(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect();

    Ok(files)
}

fn is_python_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == PYTHON_EXTENSION)
        .unwrap_or(false)
}

fn is_skipped(entry: &walkdir::DirEntry) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .map(|name| {
            name.starts_with('.')
                || name == "__pycache__"
                || name == "venv"
                || name == "site-packages"
        })
        .unwrap_or(false)
}
