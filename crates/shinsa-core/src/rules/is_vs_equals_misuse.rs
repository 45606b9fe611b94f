//! is-vs-equals-misuse rule: flag `is` / `is not` comparisons against
//! literal constants.

use std::ops::ControlFlow;

use rustpython_parser::ast;

use crate::declare_rule;
use crate::diagnostic::{Diagnostic, DiagnosticKind, Severity};
use crate::parser::ParsedModule;
use crate::rules::{Rule, RuleMetadata};
use crate::visitor::{AstVisitor, WalkContext, walk_suite};

declare_rule!(
    IsVsEqualsMisuse,
    kind = IsVsEqualsMisuse,
    name = "is-vs-equals-misuse",
    description = "Flag identity comparisons ('is'/'is not') against literal values, which test object identity instead of equality",
    severity = Medium,
    examples = "# Bad\nif status is 'ready':\n    start()\n\n# Good\nif status == 'ready':\n    start()\n\n# Fine: None is a singleton\nif status is None:\n    wait()"
);

impl Rule for IsVsEqualsMisuse {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn check(&self, module: &ParsedModule) -> Vec<Diagnostic> {
        let Some(suite) = module.suite() else {
            return Vec::new();
        };

        let ctx = WalkContext::new(module);
        let mut visitor = IdentityVisitor {
            diagnostics: Vec::new(),
        };

        walk_suite(suite, &mut visitor, &ctx);
        visitor.diagnostics
    }
}

struct IdentityVisitor {
    diagnostics: Vec<Diagnostic>,
}

/// Literal operands for which identity comparison is a bug. `None` and `...`
/// are interned singletons, so `is` against them is the idiomatic spelling.
fn is_value_literal(expr: &ast::Expr) -> bool {
    match expr {
        ast::Expr::Constant(constant) => !matches!(
            constant.value,
            ast::Constant::None | ast::Constant::Ellipsis
        ),
        _ => false,
    }
}

impl AstVisitor for IdentityVisitor {
    fn visit_compare(&mut self, node: &ast::ExprCompare, ctx: &WalkContext) -> ControlFlow<()> {
        for (op, comparator) in node.ops.iter().zip(&node.comparators) {
            let (op_text, fix) = match op {
                ast::CmpOp::Is => (
                    "is",
                    "Use '==' to compare values; 'is' is only reliable for singletons like None.",
                ),
                ast::CmpOp::IsNot => (
                    "is not",
                    "Use '!=' to compare values; 'is not' is only reliable for singletons like None.",
                ),
                _ => continue,
            };
            if is_value_literal(comparator) {
                self.diagnostics.push(
                    Diagnostic::new(
                        DiagnosticKind::IsVsEqualsMisuse,
                        Severity::Medium,
                        ctx.locate(node.range),
                        format!("'{op_text}' comparison with a literal checks identity, not equality."),
                    )
                    .with_fix(fix),
                );
            }
        }
        ControlFlow::Continue(())
    }
}
