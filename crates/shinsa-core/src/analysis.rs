//! Analysis engine wiring the parser and the rule registry together.
//!
//! Front ends (CLI, LSP, embedding) go through [`AnalysisEngine`] and get the
//! same report envelope everywhere.

use crate::diagnostic::{AnalysisResult, SourceLocation};
use crate::parser::ParsedModule;
use crate::rules::RuleRegistry;
use crate::rules::exception_swallowing::ExceptionSwallowing;
use crate::rules::is_vs_equals_misuse::IsVsEqualsMisuse;
use crate::rules::missing_return::MissingReturn;
use crate::rules::mutable_default_argument::MutableDefaultArgument;
use crate::rules::shadowed_builtin::ShadowedBuiltin;

pub struct AnalysisEngine {
    registry: RuleRegistry,
}

impl AnalysisEngine {
    pub fn new() -> Self {
        Self {
            registry: create_default_registry(),
        }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Parse and review a piece of Python source.
    ///
    /// A module that fails to parse short-circuits into a syntax-error report;
    /// no rule runs over it.
    pub fn analyze(&self, source: &str) -> AnalysisResult {
        let module = ParsedModule::from_source("<string>", source);
        self.check_module(&module)
    }

    /// Review an already-parsed module. This is the re-parse-free entry for
    /// front ends that keep [`ParsedModule`]s around, like the language server.
    pub fn check_module(&self, module: &ParsedModule) -> AnalysisResult {
        if let Some(error) = module.error() {
            tracing::debug!(
                file = %module.metadata().filename,
                line = error.line,
                column = error.column,
                "parse failed, skipping rules"
            );
            return AnalysisResult::syntax_error(
                SourceLocation::new(error.line, error.column),
                error.message.clone(),
            );
        }

        let issues = self.registry.run_all(module);
        tracing::debug!(
            file = %module.metadata().filename,
            issues = issues.len(),
            "analysis complete"
        );
        AnalysisResult::completed(issues)
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// All rules, in the order their findings appear in a report.
fn create_default_registry() -> RuleRegistry {
    let mut registry = RuleRegistry::new();

    registry.register(Box::new(MutableDefaultArgument::new()));
    registry.register(Box::new(ExceptionSwallowing::new()));
    registry.register(Box::new(IsVsEqualsMisuse::new()));
    registry.register(Box::new(ShadowedBuiltin::new()));
    registry.register(Box::new(MissingReturn::new()));

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticKind;

    #[test]
    fn analyze_valid_source_returns_issues() {
        let engine = AnalysisEngine::new();

        let result = engine.analyze("def f(items=[]):\n    pass\n");

        assert!(result.success);
        assert_eq!(result.message, "Analysis complete");
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].kind, DiagnosticKind::MutableDefaultArgument);
    }

    #[test]
    fn analyze_clean_source_returns_empty_issues() {
        let engine = AnalysisEngine::new();

        let result = engine.analyze("def add(a, b):\n    return a + b\n");

        assert!(result.success);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn analyze_empty_source_is_clean() {
        let engine = AnalysisEngine::new();

        let result = engine.analyze("");

        assert!(result.success);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn syntax_error_short_circuits_the_rules() {
        let engine = AnalysisEngine::new();

        // The same module also assigns to a builtin, but the parse failure
        // on the broken def must be the only finding.
        let result = engine.analyze("list = 5\ndef broken(:\n    pass\n");

        assert!(!result.success);
        assert_eq!(result.message, "Syntax error");
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].kind, DiagnosticKind::SyntaxError);
        assert!(result.issues[0].details.is_some());
    }

    #[test]
    fn issues_are_grouped_by_rule_in_fixed_order() {
        let engine = AnalysisEngine::new();

        // Source order is builtin shadow first, mutable default last; report
        // order follows rule registration instead.
        let code = "str = 'x'\n\n\ndef f(items=[]):\n    return items\n";
        let result = engine.analyze(code);

        let kinds: Vec<_> = result.issues.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::MutableDefaultArgument,
                DiagnosticKind::ShadowedBuiltin,
            ]
        );
    }

    #[test]
    fn analyze_is_deterministic() {
        let engine = AnalysisEngine::new();
        let code = "list = []\ndef f(a={}):\n    if a:\n        return 1\n";

        let first = engine.analyze(code);
        let second = engine.analyze(code);

        assert_eq!(first, second);
    }

    #[test]
    fn check_module_matches_analyze() {
        let engine = AnalysisEngine::new();
        let code = "def f(x):\n    if x is 'done':\n        return 1\n    return 0\n";

        let module = ParsedModule::from_source("sample.py", code);
        let from_module = engine.check_module(&module);
        let from_source = engine.analyze(code);

        assert_eq!(from_module, from_source);
    }

    #[test]
    fn default_registry_has_all_rules_in_order() {
        let engine = AnalysisEngine::new();

        let kinds: Vec<_> = engine
            .registry()
            .rules()
            .map(|r| r.metadata().kind)
            .collect();

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
}
