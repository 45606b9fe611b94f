//! mutable-default-argument rule: flag list/dict/set literals used as
//! parameter defaults.

use std::ops::ControlFlow;

use rustpython_parser::ast;

use crate::declare_rule;
use crate::diagnostic::{Diagnostic, DiagnosticKind, Severity, SourceLocation};
use crate::parser::ParsedModule;
use crate::rules::{Rule, RuleMetadata};
use crate::visitor::{AstVisitor, WalkContext, walk_suite};

declare_rule!(
    MutableDefaultArgument,
    kind = MutableDefaultArgument,
    name = "mutable-default-argument",
    description = "Flag function parameters whose default value is a mutable literal (list, dict or set)",
    severity = High,
    examples = "# Bad\ndef append(item, target=[]):\n    target.append(item)\n    return target\n\n# Good\ndef append(item, target=None):\n    if target is None:\n        target = []\n    target.append(item)\n    return target"
);

impl Rule for MutableDefaultArgument {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn check(&self, module: &ParsedModule) -> Vec<Diagnostic> {
        let Some(suite) = module.suite() else {
            return Vec::new();
        };

        let ctx = WalkContext::new(module);
        let mut visitor = MutableDefaultVisitor {
            diagnostics: Vec::new(),
        };

        walk_suite(suite, &mut visitor, &ctx);
        visitor.diagnostics
    }
}

struct MutableDefaultVisitor {
    diagnostics: Vec<Diagnostic>,
}

impl MutableDefaultVisitor {
    /// One diagnostic per offending default, all anchored at the `def` itself.
    fn check_defaults(&mut self, name: &str, args: &ast::Arguments, location: SourceLocation) {
        let all_defaults = args
            .posonlyargs
            .iter()
            .chain(&args.args)
            .chain(&args.kwonlyargs);

        for arg in all_defaults {
            let Some(default) = &arg.default else {
                continue;
            };
            if is_mutable_literal(default) {
                self.diagnostics.push(
                    Diagnostic::new(
                        DiagnosticKind::MutableDefaultArgument,
                        Severity::High,
                        location,
                        format!("Function '{name}' has a mutable default argument (list/dict/set)."),
                    )
                    .with_fix(
                        "Use None as the default and create a new list/dict/set inside the function.",
                    ),
                );
            }
        }
    }
}

fn is_mutable_literal(expr: &ast::Expr) -> bool {
    matches!(
        expr,
        ast::Expr::List(_) | ast::Expr::Dict(_) | ast::Expr::Set(_)
    )
}

impl AstVisitor for MutableDefaultVisitor {
    fn visit_function_def(
        &mut self,
        node: &ast::StmtFunctionDef,
        ctx: &WalkContext,
    ) -> ControlFlow<()> {
        self.check_defaults(node.name.as_str(), &node.args, ctx.locate(node.range));
        ControlFlow::Continue(())
    }

    fn visit_async_function_def(
        &mut self,
        node: &ast::StmtAsyncFunctionDef,
        ctx: &WalkContext,
    ) -> ControlFlow<()> {
        self.check_defaults(node.name.as_str(), &node.args, ctx.locate(node.range));
        ControlFlow::Continue(())
    }
}
