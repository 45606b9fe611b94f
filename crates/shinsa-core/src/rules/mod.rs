//! Rule system for Python source review.
//!
//! Provides the anti-pattern rules that shinsa runs over parsed modules.

pub mod exception_swallowing;
pub mod is_vs_equals_misuse;
pub mod missing_return;
pub mod mutable_default_argument;
pub mod shadowed_builtin;

use std::panic::{self, AssertUnwindSafe};

use crate::diagnostic::{Diagnostic, DiagnosticKind, Severity};
use crate::parser::ParsedModule;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMetadata {
    /// The diagnostic kind this rule reports, which doubles as its wire id.
    pub kind: DiagnosticKind,
    /// Kebab-case name used on the command line.
    pub name: &'static str,
    pub description: &'static str,
    pub severity: Severity,
    pub examples: Option<&'static str>,
}

pub trait Rule: Send + Sync {
    fn metadata(&self) -> &RuleMetadata;
    fn check(&self, module: &ParsedModule) -> Vec<Diagnostic>;
}

/// Ordered collection of rules. Registration order is report order.
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    /// Run every rule over the module and collect their findings in
    /// registration order. A rule that panics contributes nothing; the
    /// remaining rules still run.
    pub fn run_all(&self, module: &ParsedModule) -> Vec<Diagnostic> {
        self.rules
            .iter()
            .flat_map(|rule| run_isolated(rule.as_ref(), module))
            .collect()
    }

    /// Look up a rule by its diagnostic kind id (e.g. `shadowed_builtin`).
    pub fn get_rule(&self, kind: &str) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .find(|r| r.metadata().kind.as_str() == kind)
            .map(|r| r.as_ref())
    }

    /// Look up a rule by its kebab-case name (e.g. `shadowed-builtin`).
    pub fn get_rule_by_name(&self, name: &str) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .find(|r| r.metadata().name == name)
            .map(|r| r.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn run_isolated(rule: &dyn Rule, module: &ParsedModule) -> Vec<Diagnostic> {
    match panic::catch_unwind(AssertUnwindSafe(|| rule.check(module))) {
        Ok(found) => found,
        Err(payload) => {
            let panic_message = payload
                .downcast_ref::<&str>()
                .copied()
                .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
                .unwrap_or("non-string panic payload");
            tracing::error!(
                rule = rule.metadata().name,
                file = %module.metadata().filename,
                panic = panic_message,
                "rule panicked, dropping its findings for this module"
            );
            Vec::new()
        }
    }
}

#[macro_export]
macro_rules! declare_rule {
    (
        $name:ident,
        kind = $kind:ident,
        name = $rule_name:literal,
        description = $desc:literal,
        severity = $sev:ident
        $(, examples = $examples:literal)?
    ) => {
        pub struct $name {
            metadata: $crate::rules::RuleMetadata,
        }

        impl $name {
            pub fn new() -> Self {
                Self {
                    metadata: $crate::rules::RuleMetadata {
                        kind: $crate::diagnostic::DiagnosticKind::$kind,
                        name: $rule_name,
                        description: $desc,
                        severity: $crate::diagnostic::Severity::$sev,
                        examples: declare_rule!(@examples $($examples)?),
                    },
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
    (@examples $examples:literal) => { Some($examples) };
    (@examples) => { None };
}
