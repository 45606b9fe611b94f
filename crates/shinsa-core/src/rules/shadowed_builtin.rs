//! shadowed-builtin rule: flag assignments and parameters that reuse the
//! name of a common Python builtin.

use std::ops::ControlFlow;

use rustpython_parser::ast;

use crate::declare_rule;
use crate::diagnostic::{Diagnostic, DiagnosticKind, Severity, SourceLocation};
use crate::parser::ParsedModule;
use crate::rules::{Rule, RuleMetadata};
use crate::visitor::{AstVisitor, WalkContext, walk_suite};

/// The builtins worth protecting. Deliberately a short, high-traffic list
/// rather than the whole of `builtins`, to keep the rule low-noise.
const PYTHON_BUILTINS: [&str; 17] = [
    "list", "dict", "set", "tuple", "str", "int", "float", "bool", "id", "type", "sum", "min",
    "max", "len", "map", "filter", "input",
];

declare_rule!(
    ShadowedBuiltin,
    kind = ShadowedBuiltin,
    name = "shadowed-builtin",
    description = "Flag assignments and function parameters that shadow a common Python builtin",
    severity = Medium,
    examples = "# Bad\nlist = fetch_rows()\ndef count(input):\n    return len(input)\n\n# Good\nrows = fetch_rows()\ndef count(values):\n    return len(values)"
);

impl Rule for ShadowedBuiltin {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn check(&self, module: &ParsedModule) -> Vec<Diagnostic> {
        let Some(suite) = module.suite() else {
            return Vec::new();
        };

        let ctx = WalkContext::new(module);
        let mut visitor = ShadowVisitor {
            diagnostics: Vec::new(),
        };

        walk_suite(suite, &mut visitor, &ctx);
        visitor.diagnostics
    }
}

struct ShadowVisitor {
    diagnostics: Vec<Diagnostic>,
}

impl ShadowVisitor {
    fn check_name(&mut self, name: &str, location: SourceLocation) {
        if !PYTHON_BUILTINS.contains(&name) {
            return;
        }
        self.diagnostics.push(
            Diagnostic::new(
                DiagnosticKind::ShadowedBuiltin,
                Severity::Medium,
                location,
                format!("Name '{name}' shadows the Python builtin of the same name."),
            )
            .with_fix(format!(
                "Rename '{name}' to avoid shadowing the builtin (e.g. '{name}_' or a more descriptive name)."
            )),
        );
    }

    /// Every parameter group can shadow: positional-only, positional,
    /// `*args`, keyword-only and `**kwargs`. Checked in source order.
    fn check_parameters(&mut self, args: &ast::Arguments, ctx: &WalkContext) {
        for arg in args.posonlyargs.iter().chain(&args.args) {
            self.check_name(arg.def.arg.as_str(), ctx.locate(arg.def.range));
        }
        if let Some(vararg) = &args.vararg {
            self.check_name(vararg.arg.as_str(), ctx.locate(vararg.range));
        }
        for arg in &args.kwonlyargs {
            self.check_name(arg.def.arg.as_str(), ctx.locate(arg.def.range));
        }
        if let Some(kwarg) = &args.kwarg {
            self.check_name(kwarg.arg.as_str(), ctx.locate(kwarg.range));
        }
    }
}

impl AstVisitor for ShadowVisitor {
    fn visit_assign(&mut self, node: &ast::StmtAssign, ctx: &WalkContext) -> ControlFlow<()> {
        for target in &node.targets {
            if let ast::Expr::Name(name) = target {
                self.check_name(name.id.as_str(), ctx.locate(name.range));
            }
        }
        ControlFlow::Continue(())
    }

    fn visit_function_def(
        &mut self,
        node: &ast::StmtFunctionDef,
        ctx: &WalkContext,
    ) -> ControlFlow<()> {
        self.check_parameters(&node.args, ctx);
        ControlFlow::Continue(())
    }

    fn visit_async_function_def(
        &mut self,
        node: &ast::StmtAsyncFunctionDef,
        ctx: &WalkContext,
    ) -> ControlFlow<()> {
        self.check_parameters(&node.args, ctx);
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_shadowed_builtin(code: &str) -> Vec<Diagnostic> {
        let module = ParsedModule::from_source("test.py", code);
        let rule = ShadowedBuiltin::new();
        rule.check(&module)
    }

    #[test]
    fn detects_assignment_to_builtin() {
        let diagnostics = run_shadowed_builtin("list = [1, 2]\n");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::ShadowedBuiltin);
        assert_eq!(diagnostics[0].severity, Severity::Medium);
        assert_eq!(
            diagnostics[0].message.as_deref(),
            Some("Name 'list' shadows the Python builtin of the same name.")
        );
        assert_eq!(
            diagnostics[0].suggested_fix.as_deref(),
            Some("Rename 'list' to avoid shadowing the builtin (e.g. 'list_' or a more descriptive name).")
        );
    }

    #[test]
    fn detects_parameter_shadowing() {
        let diagnostics = run_shadowed_builtin("def f(input):\n    return input\n");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message.as_deref(),
            Some("Name 'input' shadows the Python builtin of the same name.")
        );
        assert_eq!(diagnostics[0].location.line, 1);
        assert_eq!(diagnostics[0].location.column, 6);
    }

    #[test]
    fn detects_every_parameter_group() {
        let code = "def f(id, /, type, *map, filter, **input):\n    pass\n";
        let diagnostics = run_shadowed_builtin(code);

        let names: Vec<&str> = diagnostics
            .iter()
            .filter_map(|d| d.message.as_deref())
            .collect();
        assert_eq!(diagnostics.len(), 5);
        assert!(names[0].contains("'id'"));
        assert!(names[2].contains("'map'"));
        assert!(names[4].contains("'input'"));
    }

    #[test]
    fn detects_in_async_function() {
        let diagnostics = run_shadowed_builtin("async def f(dict):\n    pass\n");

        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn detects_chained_assignment_target() {
        let diagnostics = run_shadowed_builtin("x = sum = 0\n");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.column, 4);
    }

    #[test]
    fn anchors_at_the_binding() {
        let diagnostics = run_shadowed_builtin("x = 1\nstr = 'oops'\n");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.line, 2);
        assert_eq!(diagnostics[0].location.column, 0);
    }

    #[test]
    fn ignores_ordinary_names() {
        let diagnostics = run_shadowed_builtin("items = [1]\ndef f(value):\n    return value\n");

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn ignores_reads_of_builtins() {
        let diagnostics = run_shadowed_builtin("x = list(range(3))\ny = len(x)\n");

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn ignores_attribute_and_subscript_targets() {
        let diagnostics = run_shadowed_builtin("obj.list = 1\nd['str'] = 2\n");

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn ignores_tuple_unpacking() {
        // Destructuring targets are not simple name bindings.
        let diagnostics = run_shadowed_builtin("a, list = 1, 2\n");

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn ignores_annotated_assignment() {
        let diagnostics = run_shadowed_builtin("list: int = 5\n");

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn ignores_uncommon_builtins() {
        // Only the curated list is protected.
        let diagnostics = run_shadowed_builtin("hash = 1\nvars = 2\n");

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn reports_in_source_order() {
        let code = "int = 1\ndef f(str):\n    float = 2.0\n";
        let diagnostics = run_shadowed_builtin(code);

        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics[0].location.line, 1);
        assert_eq!(diagnostics[1].location.line, 2);
        assert_eq!(diagnostics[2].location.line, 3);
    }

    #[test]
    fn metadata_is_correct() {
        let rule = ShadowedBuiltin::new();
        let metadata = rule.metadata();

        assert_eq!(metadata.kind, DiagnosticKind::ShadowedBuiltin);
        assert_eq!(metadata.name, "shadowed-builtin");
        assert_eq!(metadata.severity, Severity::Medium);
    }
}
