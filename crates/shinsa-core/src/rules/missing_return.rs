//! missing-return rule: flag functions that return a value on some paths
//! but can fall off the end without one.

use std::ops::ControlFlow;

use rustpython_parser::ast;

use crate::declare_rule;
use crate::diagnostic::{Diagnostic, DiagnosticKind, Severity, SourceLocation};
use crate::parser::ParsedModule;
use crate::rules::{Rule, RuleMetadata};
use crate::visitor::{AstVisitor, WalkContext, walk_suite};

declare_rule!(
    MissingReturn,
    kind = PossibleMissingReturn,
    name = "missing-return",
    description = "Flag functions that return a value somewhere but whose final statement does not guarantee a return on every path",
    severity = Medium,
    examples = "# Bad\ndef pick(flag):\n    if flag:\n        return 'yes'\n\n# Good\ndef pick(flag):\n    if flag:\n        return 'yes'\n    return 'no'"
);

impl Rule for MissingReturn {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn check(&self, module: &ParsedModule) -> Vec<Diagnostic> {
        let Some(suite) = module.suite() else {
            return Vec::new();
        };

        let ctx = WalkContext::new(module);
        let mut visitor = MissingReturnVisitor {
            diagnostics: Vec::new(),
        };

        walk_suite(suite, &mut visitor, &ctx);
        visitor.diagnostics
    }
}

struct MissingReturnVisitor {
    diagnostics: Vec<Diagnostic>,
}

impl MissingReturnVisitor {
    fn check_function(&mut self, name: &str, body: &[ast::Stmt], location: SourceLocation) {
        if contains_value_return(body) && !guarantees_return(body) {
            self.diagnostics.push(
                Diagnostic::new(
                    DiagnosticKind::PossibleMissingReturn,
                    Severity::Medium,
                    location,
                    format!(
                        "Function '{name}' returns a value on some paths but may reach the end without returning."
                    ),
                )
                .with_fix(
                    "Add an explicit return at the end of the function (or 'return None' if that is intended).",
                ),
            );
        }
    }
}

/// Whether any statement in the subtree is a `return` with a value. The scan
/// descends into nested definitions as well, so an inner function's returns
/// count for the enclosing one.
fn contains_value_return(suite: &[ast::Stmt]) -> bool {
    suite.iter().any(stmt_contains_value_return)
}

fn stmt_contains_value_return(stmt: &ast::Stmt) -> bool {
    match stmt {
        ast::Stmt::Return(node) => node.value.is_some(),
        ast::Stmt::FunctionDef(node) => contains_value_return(&node.body),
        ast::Stmt::AsyncFunctionDef(node) => contains_value_return(&node.body),
        ast::Stmt::ClassDef(node) => contains_value_return(&node.body),
        ast::Stmt::If(node) => {
            contains_value_return(&node.body) || contains_value_return(&node.orelse)
        }
        ast::Stmt::For(node) => {
            contains_value_return(&node.body) || contains_value_return(&node.orelse)
        }
        ast::Stmt::AsyncFor(node) => {
            contains_value_return(&node.body) || contains_value_return(&node.orelse)
        }
        ast::Stmt::While(node) => {
            contains_value_return(&node.body) || contains_value_return(&node.orelse)
        }
        ast::Stmt::With(node) => contains_value_return(&node.body),
        ast::Stmt::AsyncWith(node) => contains_value_return(&node.body),
        ast::Stmt::Try(node) => try_contains_value_return(
            &node.body,
            &node.handlers,
            &node.orelse,
            &node.finalbody,
        ),
        ast::Stmt::TryStar(node) => try_contains_value_return(
            &node.body,
            &node.handlers,
            &node.orelse,
            &node.finalbody,
        ),
        ast::Stmt::Match(node) => node
            .cases
            .iter()
            .any(|case| contains_value_return(&case.body)),
        _ => false,
    }
}

fn try_contains_value_return(
    body: &[ast::Stmt],
    handlers: &[ast::ExceptHandler],
    orelse: &[ast::Stmt],
    finalbody: &[ast::Stmt],
) -> bool {
    contains_value_return(body)
        || handlers.iter().any(|handler| {
            let ast::ExceptHandler::ExceptHandler(handler) = handler;
            contains_value_return(&handler.body)
        })
        || contains_value_return(orelse)
        || contains_value_return(finalbody)
}

/// Last-statement analysis: does every path through the suite end in a
/// `return`? Deliberately shallow about loops and `raise`, so a function
/// that only exits via `while True: return x` is still reported.
fn guarantees_return(suite: &[ast::Stmt]) -> bool {
    match suite.last() {
        None => false,
        Some(ast::Stmt::Return(_)) => true,
        Some(ast::Stmt::If(node)) => {
            !node.orelse.is_empty()
                && guarantees_return(&node.body)
                && guarantees_return(&node.orelse)
        }
        Some(ast::Stmt::Try(node)) => {
            guarantees_return(&node.body)
                && node.handlers.iter().all(|handler| {
                    let ast::ExceptHandler::ExceptHandler(handler) = handler;
                    guarantees_return(&handler.body)
                })
                && (node.orelse.is_empty() || guarantees_return(&node.orelse))
                && (node.finalbody.is_empty() || guarantees_return(&node.finalbody))
        }
        Some(_) => false,
    }
}

impl AstVisitor for MissingReturnVisitor {
    fn visit_function_def(
        &mut self,
        node: &ast::StmtFunctionDef,
        ctx: &WalkContext,
    ) -> ControlFlow<()> {
        self.check_function(node.name.as_str(), &node.body, ctx.locate(node.range));
        ControlFlow::Continue(())
    }

    fn visit_async_function_def(
        &mut self,
        node: &ast::StmtAsyncFunctionDef,
        ctx: &WalkContext,
    ) -> ControlFlow<()> {
        self.check_function(node.name.as_str(), &node.body, ctx.locate(node.range));
        ControlFlow::Continue(())
    }
}
