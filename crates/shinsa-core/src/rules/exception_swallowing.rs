//! exception-swallowing rule: flag broad except handlers whose whole body is
//! a single `pass`.

use std::ops::ControlFlow;

use rustpython_parser::ast;

use crate::declare_rule;
use crate::diagnostic::{Diagnostic, DiagnosticKind, Severity};
use crate::parser::ParsedModule;
use crate::rules::{Rule, RuleMetadata};
use crate::visitor::{AstVisitor, WalkContext, walk_suite};

declare_rule!(
    ExceptionSwallowing,
    kind = ExceptionSwallowing,
    name = "exception-swallowing",
    description = "Flag except handlers that catch everything and discard the error with a bare pass",
    severity = High,
    examples = "# Bad\ntry:\n    risky()\nexcept Exception:\n    pass\n\n# Good\ntry:\n    risky()\nexcept OSError as exc:\n    logger.warning(\"risky failed: %s\", exc)"
);

impl Rule for ExceptionSwallowing {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn check(&self, module: &ParsedModule) -> Vec<Diagnostic> {
        let Some(suite) = module.suite() else {
            return Vec::new();
        };

        let ctx = WalkContext::new(module);
        let mut visitor = SwallowVisitor {
            diagnostics: Vec::new(),
        };

        walk_suite(suite, &mut visitor, &ctx);
        visitor.diagnostics
    }
}

struct SwallowVisitor {
    diagnostics: Vec<Diagnostic>,
}

/// A handler is "broad" when it catches everything: a bare `except:` or an
/// explicit `Exception` / `BaseException` clause.
fn broad_catch_name(type_: Option<&ast::Expr>) -> Option<&'static str> {
    match type_ {
        None => Some("except:"),
        Some(ast::Expr::Name(name)) => match name.id.as_str() {
            "Exception" => Some("except Exception:"),
            "BaseException" => Some("except BaseException:"),
            _ => None,
        },
        Some(_) => None,
    }
}

fn is_single_pass(body: &[ast::Stmt]) -> bool {
    matches!(body, [ast::Stmt::Pass(_)])
}

impl AstVisitor for SwallowVisitor {
    fn visit_try(&mut self, node: &ast::StmtTry, ctx: &WalkContext) -> ControlFlow<()> {
        for handler in &node.handlers {
            let ast::ExceptHandler::ExceptHandler(handler) = handler;
            let Some(clause) = broad_catch_name(handler.type_.as_deref()) else {
                continue;
            };
            if is_single_pass(&handler.body) {
                self.diagnostics.push(
                    Diagnostic::new(
                        DiagnosticKind::ExceptionSwallowing,
                        Severity::High,
                        ctx.locate(handler.range),
                        format!("'{clause}' with only 'pass' swallows the exception silently."),
                    )
                    .with_fix("Handle the exception, log it, or re-raise it instead of passing."),
                );
            }
        }
        ControlFlow::Continue(())
    }
}
