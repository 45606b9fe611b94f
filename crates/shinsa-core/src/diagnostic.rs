//! Diagnostic types and the analysis report envelope
//!
//! Every issue shinsa reports is a flat [`Diagnostic`] record, and every
//! analysis run produces an [`AnalysisResult`] envelope around them. The
//! serialized field names (`type`, `line`, `col`, ...) are a stable contract
//! consumed by editor integrations and CI tooling, so changes here are
//! breaking changes.

use serde::{Deserialize, Serialize};

/// How serious an issue is. Ordering is `Low < Medium < High` so severities
/// can be compared and filtered with a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The closed set of issue kinds shinsa can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    MutableDefaultArgument,
    ExceptionSwallowing,
    IsVsEqualsMisuse,
    ShadowedBuiltin,
    PossibleMissingReturn,
    SyntaxError,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::MutableDefaultArgument => "mutable_default_argument",
            DiagnosticKind::ExceptionSwallowing => "exception_swallowing",
            DiagnosticKind::IsVsEqualsMisuse => "is_vs_equals_misuse",
            DiagnosticKind::ShadowedBuiltin => "shadowed_builtin",
            DiagnosticKind::PossibleMissingReturn => "possible_missing_return",
            DiagnosticKind::SyntaxError => "syntax_error",
        }
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A position in a source file: 1-based line, 0-based byte column within the
/// line. The column serializes as `col` to match the report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: usize,
    #[serde(rename = "col")]
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A single reported issue.
///
/// Rule diagnostics carry `message` and usually `suggested_fix`; syntax
/// errors carry `details` instead. The location fields are flattened so the
/// serialized record stays flat: `{"type": ..., "severity": ..., "line": ...,
/// "col": ..., ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    #[serde(rename = "type")]
    pub kind: DiagnosticKind,
    pub severity: Severity,
    #[serde(flatten)]
    pub location: SourceLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Diagnostic {
    pub fn new(
        kind: DiagnosticKind,
        severity: Severity,
        location: SourceLocation,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            location,
            message: Some(message.into()),
            suggested_fix: None,
            details: None,
        }
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.suggested_fix = Some(fix.into());
        self
    }

    /// A parser failure report. Always high severity, with the parser's own
    /// explanation under `details`.
    pub fn syntax_error(location: SourceLocation, details: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::SyntaxError,
            severity: Severity::High,
            location,
            message: None,
            suggested_fix: None,
            details: Some(details.into()),
        }
    }

    /// Human-readable text for this issue: the rule message, or the parser
    /// details for syntax errors.
    pub fn text(&self) -> &str {
        self.message
            .as_deref()
            .or(self.details.as_deref())
            .unwrap_or("")
    }
}

/// The envelope around one analysis run.
///
/// `success` is `false` only when the source failed to parse; rule findings
/// in an otherwise valid file still count as a successful analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub success: bool,
    pub message: String,
    pub issues: Vec<Diagnostic>,
}

impl AnalysisResult {
    /// A completed run over a file that parsed, with whatever the rules found.
    pub fn completed(issues: Vec<Diagnostic>) -> Self {
        Self {
            success: true,
            message: "Analysis complete".to_string(),
            issues,
        }
    }

    /// A run that stopped at the parser. The single issue is the syntax
    /// error itself; no rules ran.
    pub fn syntax_error(location: SourceLocation, details: impl Into<String>) -> Self {
        Self {
            success: false,
            message: "Syntax error".to_string(),
            issues: vec![Diagnostic::syntax_error(location, details)],
        }
    }

    pub fn max_severity(&self) -> Option<Severity> {
        self.issues.iter().map(|issue| issue.severity).max()
    }
}
