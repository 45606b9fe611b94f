//! Pretty formatter for human-readable terminal output
//!
//! Displays findings with colors, source code context, and a summary.

use crate::output::FileReport;
use colored::{ColoredString, Colorize};
use shinsa_core::diagnostic::{Diagnostic, Severity};
use std::collections::HashMap;
use std::fs;

pub struct PrettyFormatter {
    sources: HashMap<String, String>,
}

impl PrettyFormatter {
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
        }
    }

    pub fn with_sources(sources: HashMap<String, String>) -> Self {
        Self { sources }
    }

    pub fn format(&self, reports: &[FileReport]) -> String {
        let mut output = String::new();

        for report in reports {
            for issue in &report.result.issues {
                output.push_str(&self.format_issue(&report.path, issue));
                output.push('\n');
            }
        }

        if reports.iter().any(|r| !r.result.issues.is_empty()) {
            output.push_str(&self.format_summary(reports));
        }

        output
    }

    fn format_issue(&self, file: &str, issue: &Diagnostic) -> String {
        let mut lines = Vec::new();

        let severity_str = self.colorize_severity(issue.severity);
        let header = format!(
            "{}[{}]: {}",
            severity_str,
            issue.kind.as_str().dimmed(),
            issue.text()
        );
        lines.push(header);

        let location = format!(
            "  {} {}:{}:{}",
            "-->".blue(),
            file,
            issue.location.line,
            issue.location.column
        );
        lines.push(location);

        if let Some(source_line) = self.get_source_line(file, issue.location.line) {
            let line_num_width = issue.location.line.to_string().len();
            let padding = " ".repeat(line_num_width);

            lines.push(format!("{} {}", padding, "|".blue()));

            let line_display = format!(
                "{} {} {}",
                issue.location.line.to_string().blue(),
                "|".blue(),
                source_line
            );
            lines.push(line_display);

            // The column is a 0-based byte offset, so it doubles as the
            // caret indent. The wire format carries no end position, so the
            // caret is a fixed-width marker rather than a full underline.
            let caret_padding = " ".repeat(issue.location.column);
            let caret_line = format!(
                "{} {} {}{}",
                padding,
                "|".blue(),
                caret_padding,
                "^^^".red()
            );
            lines.push(caret_line);

            lines.push(format!("{} {}", padding, "|".blue()));
        }

        if let Some(fix) = &issue.suggested_fix {
            let line_num_width = issue.location.line.to_string().len();
            let padding = " ".repeat(line_num_width);
            lines.push(format!(
                "{} {} {} {}",
                padding,
                "=".blue(),
                "suggested fix:".green(),
                fix
            ));
        }

        lines.join("\n")
    }

    fn colorize_severity(&self, severity: Severity) -> ColoredString {
        match severity {
            Severity::High => "high".red().bold(),
            Severity::Medium => "medium".yellow().bold(),
            Severity::Low => "low".cyan().bold(),
        }
    }

    fn get_source_line(&self, file: &str, line: usize) -> Option<String> {
        let index = line.checked_sub(1)?;

        if let Some(source) = self.sources.get(file) {
            return source.lines().nth(index).map(|s| s.to_string());
        }

        if let Ok(content) = fs::read_to_string(file) {
            return content.lines().nth(index).map(|s| s.to_string());
        }

        None
    }

    fn format_summary(&self, reports: &[FileReport]) -> String {
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
            }
        }

        let total = high + medium + low;
        let problems_str = if total == 1 { "problem" } else { "problems" };

        format!(
            "\nFound {} {} ({}, {}, {})\n",
            total.to_string().bold(),
            problems_str,
            format!("{} high", high).red(),
            format!("{} medium", medium).yellow(),
            format!("{} low", low).cyan()
        )
    }
}

impl Default for PrettyFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shinsa_core::diagnostic::{AnalysisResult, DiagnosticKind, SourceLocation};

    fn shadowed_issue(line: usize, column: usize) -> Diagnostic {
        Diagnostic::new(
            DiagnosticKind::ShadowedBuiltin,
            Severity::Medium,
            SourceLocation::new(line, column),
            "Name 'list' shadows the Python builtin of the same name.",
        )
    }

    fn report(path: &str, issues: Vec<Diagnostic>) -> FileReport {
        FileReport {
            path: path.to_string(),
            result: AnalysisResult::completed(issues),
        }
    }

    #[test]
    fn pretty_format_single_issue() {
        let reports = vec![report("app.py", vec![shadowed_issue(3, 0)])];
        let mut sources = HashMap::new();
        sources.insert(
            "app.py".to_string(),
            "# one\n# two\nlist = load_rows()".to_string(),
        );

        let formatter = PrettyFormatter::with_sources(sources);
        let output = formatter.format(&reports);

        assert!(output.contains("medium"));
        assert!(output.contains("shadowed_builtin"));
        assert!(output.contains("Name 'list' shadows the Python builtin"));
        assert!(output.contains("app.py:3:0"));
        assert!(output.contains("list = load_rows()"));
    }

    #[test]
    fn colors_match_severity_high() {
        let formatter = PrettyFormatter::new();
        let colored = formatter.colorize_severity(Severity::High);
        assert_eq!(colored.to_string(), "high".red().bold().to_string());
    }

    #[test]
    fn colors_match_severity_medium() {
        let formatter = PrettyFormatter::new();
        let colored = formatter.colorize_severity(Severity::Medium);
        assert_eq!(colored.to_string(), "medium".yellow().bold().to_string());
    }

    #[test]
    fn colors_match_severity_low() {
        let formatter = PrettyFormatter::new();
        let colored = formatter.colorize_severity(Severity::Low);
        assert_eq!(colored.to_string(), "low".cyan().bold().to_string());
    }

    #[test]
    fn shows_source_context_with_caret() {
        let reports = vec![report("app.py", vec![shadowed_issue(2, 4)])];
        let mut sources = HashMap::new();
        sources.insert(
            "app.py".to_string(),
            "x = 1\ndef f(list):\n    pass".to_string(),
        );

        let formatter = PrettyFormatter::with_sources(sources);
        let output = formatter.format(&reports);

        assert!(output.contains("def f(list):"));
        assert!(output.contains("^^^"));
    }

    #[test]
    fn syntax_error_uses_parser_details() {
        let reports = vec![FileReport {
            path: "broken.py".to_string(),
            result: AnalysisResult::syntax_error(SourceLocation::new(1, 8), "invalid syntax"),
        }];

        let formatter = PrettyFormatter::new();
        let output = formatter.format(&reports);

        assert!(output.contains("high"));
        assert!(output.contains("syntax_error"));
        assert!(output.contains("invalid syntax"));
        assert!(output.contains("broken.py:1:8"));
    }

    #[test]
    fn shows_summary() {
        let reports = vec![report(
            "app.py",
            vec![
                Diagnostic::new(
                    DiagnosticKind::MutableDefaultArgument,
                    Severity::High,
                    SourceLocation::new(1, 0),
                    "Function 'f' has a mutable default argument (list/dict/set).",
                ),
                shadowed_issue(2, 0),
                shadowed_issue(3, 0),
            ],
        )];

        let formatter = PrettyFormatter::new();
        let output = formatter.format(&reports);

        assert!(output.contains("Found"));
        assert!(output.contains("3"));
        assert!(output.contains("problems"));
        assert!(output.contains("1 high"));
        assert!(output.contains("2 medium"));
    }

    #[test]
    fn shows_summary_singular() {
        let reports = vec![report("app.py", vec![shadowed_issue(1, 0)])];

        let formatter = PrettyFormatter::new();
        let output = formatter.format(&reports);

        assert!(output.contains("1"));
        assert!(output.contains("problem"));
    }

    #[test]
    fn shows_suggested_fix() {
        let issue = shadowed_issue(1, 0).with_fix(
            "Rename 'list' to avoid shadowing the builtin (e.g. 'list_' or a more descriptive name).",
        );
        let reports = vec![report("app.py", vec![issue])];

        let formatter = PrettyFormatter::new();
        let output = formatter.format(&reports);

        assert!(output.contains("suggested fix:"));
        assert!(output.contains("Rename 'list' to avoid shadowing the builtin"));
    }

    #[test]
    fn empty_reports_produce_empty_output() {
        let formatter = PrettyFormatter::new();
        let output = formatter.format(&[]);

        assert!(output.is_empty());
    }

    #[test]
    fn clean_files_produce_empty_output() {
        let reports = vec![report("clean.py", vec![])];

        let formatter = PrettyFormatter::new();
        let output = formatter.format(&reports);

        assert!(output.is_empty());
    }

    #[test]
    fn handles_missing_source_file() {
        let reports = vec![report("no_such_file.py", vec![shadowed_issue(1, 0)])];

        let formatter = PrettyFormatter::new();
        let output = formatter.format(&reports);

        assert!(output.contains("medium"));
        assert!(output.contains("shadowed_builtin"));
    }

    #[test]
    fn multiple_files_show_each_source() {
        let reports = vec![
            report("a.py", vec![shadowed_issue(1, 0)]),
            report("b.py", vec![shadowed_issue(1, 0)]),
        ];
        let mut sources = HashMap::new();
        sources.insert("a.py".to_string(), "list = first()".to_string());
        sources.insert("b.py".to_string(), "list = second()".to_string());

        let formatter = PrettyFormatter::with_sources(sources);
        let output = formatter.format(&reports);

        assert!(output.contains("list = first()"));
        assert!(output.contains("list = second()"));
    }
}
