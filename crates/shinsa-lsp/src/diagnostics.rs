use shinsa_core::diagnostic::{Diagnostic as CoreDiagnostic, Severity};
use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, NumberOrString, Position, Range};

fn convert_severity(severity: Severity) -> DiagnosticSeverity {
    match severity {
        Severity::High => DiagnosticSeverity::ERROR,
        Severity::Medium => DiagnosticSeverity::WARNING,
        Severity::Low => DiagnosticSeverity::INFORMATION,
    }
}

pub fn convert_issue(issue: &CoreDiagnostic) -> Diagnostic {
    // Core locations are 1-based lines with 0-based columns; LSP wants both
    // zero-based. There is no end position, so the range covers one character.
    let start = Position {
        line: issue.location.line.saturating_sub(1) as u32,
        character: issue.location.column as u32,
    };

    let end = Position {
        line: issue.location.line.saturating_sub(1) as u32,
        character: (issue.location.column + 1) as u32,
    };

    let mut message = issue.text().to_string();
    if let Some(fix) = &issue.suggested_fix {
        message.push_str("\nSuggested fix: ");
        message.push_str(fix);
    }

    Diagnostic {
        range: Range { start, end },
        severity: Some(convert_severity(issue.severity)),
        code: Some(NumberOrString::String(issue.kind.as_str().to_string())),
        code_description: None,
        source: Some("shinsa".to_string()),
        message,
        related_information: None,
        tags: None,
        data: None,
    }
}

pub fn convert_issues(issues: &[CoreDiagnostic]) -> Vec<Diagnostic> {
    issues.iter().map(convert_issue).collect()
}
