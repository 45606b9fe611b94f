//! End-to-end tests for the analysis engine: envelope semantics, report
//! ordering and rule interplay over whole modules.

use shinsa_core::analysis::AnalysisEngine;
use shinsa_core::diagnostic::{DiagnosticKind, Severity};
use shinsa_core::parser::ParsedModule;

fn engine() -> AnalysisEngine {
    AnalysisEngine::new()
}

#[test]
fn clean_module_reports_no_issues() {
    let code = r#"
def load(path):
    with open(path) as handle:
        data = handle.read()
    return data


def first_or_none(items):
    if items:
        return items[0]
    return None
"#;

    let result = engine().analyze(code);

    assert!(result.success);
    assert_eq!(result.message, "Analysis complete");
    assert!(result.issues.is_empty());
}

#[test]
fn analysis_is_deterministic_across_runs() {
    let code = "def f(a=[], b={}):\n    if a is 'x':\n        return b\n";
    let engine = engine();

    let runs: Vec<_> = (0..5).map(|_| engine.analyze(code)).collect();

    for run in &runs[1..] {
        assert_eq!(run, &runs[0]);
    }
}

#[test]
fn syntax_error_reports_one_issue_and_no_rule_findings() {
    // Valid prefix full of rule bait, then a broken def.
    let code = "list = 1\n\ndef f(items=[]):\n    return items\n\ndef broken(:\n";

    let result = engine().analyze(code);

    assert!(!result.success);
    assert_eq!(result.message, "Syntax error");
    assert_eq!(result.issues.len(), 1);

    let issue = &result.issues[0];
    assert_eq!(issue.kind, DiagnosticKind::SyntaxError);
    assert_eq!(issue.severity, Severity::High);
    assert!(issue.message.is_none());
    assert!(issue.details.as_deref().is_some_and(|d| !d.is_empty()));
    assert_eq!(issue.location.line, 6);
}

#[test]
fn all_rules_fire_on_a_kitchen_sink_module() {
    let code = "list = load_rows()\n\ndef pick(flag, options={}):\n    if flag is 1:\n        return options\n\ndef cleanup(path):\n    try:\n        remove(path)\n    except Exception:\n        pass\n";

    let result = engine().analyze(code);

    assert!(result.success);
    let kinds: Vec<_> = result.issues.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DiagnosticKind::MutableDefaultArgument,
            DiagnosticKind::ExceptionSwallowing,
            DiagnosticKind::IsVsEqualsMisuse,
            DiagnosticKind::ShadowedBuiltin,
            DiagnosticKind::PossibleMissingReturn,
        ]
    );
}

#[test]
fn report_order_is_rule_order_then_source_order() {
    // Two shadowed builtins bracket a mutable default in source order; the
    // report still lists the mutable default first.
    let code = "str = 'a'\n\ndef f(items=[]):\n    return items\n\nint = 2\n";

    let result = engine().analyze(code);

    let summary: Vec<_> = result
        .issues
        .iter()
        .map(|d| (d.kind, d.location.line))
        .collect();
    assert_eq!(
        summary,
        vec![
            (DiagnosticKind::MutableDefaultArgument, 3),
            (DiagnosticKind::ShadowedBuiltin, 1),
            (DiagnosticKind::ShadowedBuiltin, 6),
        ]
    );
}

#[test]
fn rules_do_not_mask_each_other() {
    // The same def trips three rules at once.
    let code = "def f(sum=[]):\n    if sum is None:\n        return 0\n";

    let result = engine().analyze(code);

    let kinds: Vec<_> = result.issues.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DiagnosticKind::MutableDefaultArgument,
            DiagnosticKind::ShadowedBuiltin,
            DiagnosticKind::PossibleMissingReturn,
        ]
    );
}

#[test]
fn locations_are_one_based_lines_and_zero_based_columns() {
    let code = "def f():\n    x = 0\n    if x is '':\n        return x\n";

    let result = engine().analyze(code);

    assert_eq!(result.issues.len(), 2);
    let identity = &result.issues[0];
    assert_eq!(identity.kind, DiagnosticKind::IsVsEqualsMisuse);
    assert_eq!(identity.location.line, 3);
    assert_eq!(identity.location.column, 7);
}

#[test]
fn check_module_reuses_an_existing_parse() {
    let code = "def f(x):\n    if x:\n        return 1\n";
    let module = ParsedModule::from_source("app.py", code);
    let engine = engine();

    let result = engine.check_module(&module);

    assert!(result.success);
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].kind, DiagnosticKind::PossibleMissingReturn);
}

#[test]
fn check_module_reports_stored_parse_error() {
    let module = ParsedModule::from_source("app.py", "def broken(:\n");
    let engine = engine();

    let result = engine.check_module(&module);

    assert!(!result.success);
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].kind, DiagnosticKind::SyntaxError);
}

#[test]
fn max_severity_reflects_worst_finding() {
    let engine = engine();

    let medium_only = engine.analyze("list = [1]\n");
    assert_eq!(medium_only.max_severity(), Some(Severity::Medium));

    let with_high = engine.analyze("def f(a=[]):\n    pass\n");
    assert_eq!(with_high.max_severity(), Some(Severity::High));

    let clean = engine.analyze("x = 1\n");
    assert_eq!(clean.max_severity(), None);
}

#[test]
fn whitespace_only_module_is_clean() {
    let result = engine().analyze("\n\n   \n");

    assert!(result.success);
    assert!(result.issues.is_empty());
}

#[test]
fn carriage_return_newlines_keep_locations_stable() {
    let code = "x = 1\r\nstr = 'oops'\r\n";

    let result = engine().analyze(code);

    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].location.line, 2);
    assert_eq!(result.issues[0].location.column, 0);
}
