//! Visitor pattern for AST traversal.
//!
//! RustPython's AST ships no borrowing visitor, so the walk is spelled out
//! here: a pre-order traversal over every statement and expression in a
//! module, with hooks for the node kinds rules inspect. The matches over
//! `Stmt`, `Expr` and `Pattern` are exhaustive on purpose, so a parser
//! upgrade that introduces new node kinds fails to compile instead of
//! silently skipping them.

mod context;
mod traits;

pub use context::WalkContext;
pub use traits::AstVisitor;

use std::ops::ControlFlow;

use rustpython_parser::ast;

struct Walker<'a, V: AstVisitor> {
    visitor: &'a mut V,
    ctx: &'a WalkContext<'a>,
    stopped: bool,
}

/// Walk every statement and expression in `suite` in pre-order, invoking the
/// visitor's hooks as matching nodes are encountered.
pub fn walk_suite<V: AstVisitor>(suite: &[ast::Stmt], visitor: &mut V, ctx: &WalkContext) {
    let mut walker = Walker {
        visitor,
        ctx,
        stopped: false,
    };
    walker.suite(suite);
}

impl<V: AstVisitor> Walker<'_, V> {
    fn suite(&mut self, suite: &[ast::Stmt]) {
        for stmt in suite {
            if self.stopped {
                return;
            }
            self.stmt(stmt);
        }
    }

    fn stmt(&mut self, stmt: &ast::Stmt) {
        if self.stopped {
            return;
        }
        match stmt {
            ast::Stmt::FunctionDef(node) => {
                if let ControlFlow::Break(()) = self.visitor.visit_function_def(node, self.ctx) {
                    self.stopped = true;
                    return;
                }
                self.arguments(&node.args);
                self.suite(&node.body);
                self.exprs(&node.decorator_list);
                self.opt_expr(node.returns.as_deref());
            }
            ast::Stmt::AsyncFunctionDef(node) => {
                if let ControlFlow::Break(()) =
                    self.visitor.visit_async_function_def(node, self.ctx)
                {
                    self.stopped = true;
                    return;
                }
                self.arguments(&node.args);
                self.suite(&node.body);
                self.exprs(&node.decorator_list);
                self.opt_expr(node.returns.as_deref());
            }
            ast::Stmt::ClassDef(node) => {
                if let ControlFlow::Break(()) = self.visitor.visit_class_def(node, self.ctx) {
                    self.stopped = true;
                    return;
                }
                self.exprs(&node.bases);
                for keyword in &node.keywords {
                    self.expr(&keyword.value);
                }
                self.suite(&node.body);
                self.exprs(&node.decorator_list);
            }
            ast::Stmt::Return(node) => {
                if let ControlFlow::Break(()) = self.visitor.visit_return(node, self.ctx) {
                    self.stopped = true;
                    return;
                }
                self.opt_expr(node.value.as_deref());
            }
            ast::Stmt::Delete(node) => self.exprs(&node.targets),
            ast::Stmt::Assign(node) => {
                if let ControlFlow::Break(()) = self.visitor.visit_assign(node, self.ctx) {
                    self.stopped = true;
                    return;
                }
                self.exprs(&node.targets);
                self.expr(&node.value);
            }
            ast::Stmt::TypeAlias(node) => {
                self.expr(&node.name);
                self.expr(&node.value);
            }
            ast::Stmt::AugAssign(node) => {
                self.expr(&node.target);
                self.expr(&node.value);
            }
            ast::Stmt::AnnAssign(node) => {
                self.expr(&node.target);
                self.expr(&node.annotation);
                self.opt_expr(node.value.as_deref());
            }
            ast::Stmt::For(node) => {
                self.expr(&node.target);
                self.expr(&node.iter);
                self.suite(&node.body);
                self.suite(&node.orelse);
            }
            ast::Stmt::AsyncFor(node) => {
                self.expr(&node.target);
                self.expr(&node.iter);
                self.suite(&node.body);
                self.suite(&node.orelse);
            }
            ast::Stmt::While(node) => {
                self.expr(&node.test);
                self.suite(&node.body);
                self.suite(&node.orelse);
            }
            ast::Stmt::If(node) => {
                self.expr(&node.test);
                self.suite(&node.body);
                self.suite(&node.orelse);
            }
            ast::Stmt::With(node) => {
                self.with_items(&node.items);
                self.suite(&node.body);
            }
            ast::Stmt::AsyncWith(node) => {
                self.with_items(&node.items);
                self.suite(&node.body);
            }
            ast::Stmt::Match(node) => {
                self.expr(&node.subject);
                for case in &node.cases {
                    self.pattern(&case.pattern);
                    self.opt_expr(case.guard.as_deref());
                    self.suite(&case.body);
                }
            }
            ast::Stmt::Raise(node) => {
                self.opt_expr(node.exc.as_deref());
                self.opt_expr(node.cause.as_deref());
            }
            ast::Stmt::Try(node) => {
                if let ControlFlow::Break(()) = self.visitor.visit_try(node, self.ctx) {
                    self.stopped = true;
                    return;
                }
                self.suite(&node.body);
                self.handlers(&node.handlers);
                self.suite(&node.orelse);
                self.suite(&node.finalbody);
            }
            ast::Stmt::TryStar(node) => {
                self.suite(&node.body);
                self.handlers(&node.handlers);
                self.suite(&node.orelse);
                self.suite(&node.finalbody);
            }
            ast::Stmt::Assert(node) => {
                self.expr(&node.test);
                self.opt_expr(node.msg.as_deref());
            }
            ast::Stmt::Expr(node) => self.expr(&node.value),
            ast::Stmt::Import(_)
            | ast::Stmt::ImportFrom(_)
            | ast::Stmt::Global(_)
            | ast::Stmt::Nonlocal(_)
            | ast::Stmt::Pass(_)
            | ast::Stmt::Break(_)
            | ast::Stmt::Continue(_) => {}
        }
    }

    fn expr(&mut self, expr: &ast::Expr) {
        if self.stopped {
            return;
        }
        match expr {
            ast::Expr::BoolOp(node) => self.exprs(&node.values),
            ast::Expr::NamedExpr(node) => {
                self.expr(&node.target);
                self.expr(&node.value);
            }
            ast::Expr::BinOp(node) => {
                self.expr(&node.left);
                self.expr(&node.right);
            }
            ast::Expr::UnaryOp(node) => self.expr(&node.operand),
            ast::Expr::Lambda(node) => {
                self.arguments(&node.args);
                self.expr(&node.body);
            }
            ast::Expr::IfExp(node) => {
                self.expr(&node.test);
                self.expr(&node.body);
                self.expr(&node.orelse);
            }
            ast::Expr::Dict(node) => {
                for key in node.keys.iter().flatten() {
                    self.expr(key);
                }
                self.exprs(&node.values);
            }
            ast::Expr::Set(node) => self.exprs(&node.elts),
            ast::Expr::ListComp(node) => {
                self.expr(&node.elt);
                self.comprehensions(&node.generators);
            }
            ast::Expr::SetComp(node) => {
                self.expr(&node.elt);
                self.comprehensions(&node.generators);
            }
            ast::Expr::DictComp(node) => {
                self.expr(&node.key);
                self.expr(&node.value);
                self.comprehensions(&node.generators);
            }
            ast::Expr::GeneratorExp(node) => {
                self.expr(&node.elt);
                self.comprehensions(&node.generators);
            }
            ast::Expr::Await(node) => self.expr(&node.value),
            ast::Expr::Yield(node) => self.opt_expr(node.value.as_deref()),
            ast::Expr::YieldFrom(node) => self.expr(&node.value),
            ast::Expr::Compare(node) => {
                if let ControlFlow::Break(()) = self.visitor.visit_compare(node, self.ctx) {
                    self.stopped = true;
                    return;
                }
                self.expr(&node.left);
                self.exprs(&node.comparators);
            }
            ast::Expr::Call(node) => {
                if let ControlFlow::Break(()) = self.visitor.visit_call(node, self.ctx) {
                    self.stopped = true;
                    return;
                }
                self.expr(&node.func);
                self.exprs(&node.args);
                for keyword in &node.keywords {
                    self.expr(&keyword.value);
                }
            }
            ast::Expr::FormattedValue(node) => {
                self.expr(&node.value);
                self.opt_expr(node.format_spec.as_deref());
            }
            ast::Expr::JoinedStr(node) => self.exprs(&node.values),
            ast::Expr::Constant(node) => {
                if let ControlFlow::Break(()) = self.visitor.visit_constant(node, self.ctx) {
                    self.stopped = true;
                }
            }
            ast::Expr::Attribute(node) => self.expr(&node.value),
            ast::Expr::Subscript(node) => {
                self.expr(&node.value);
                self.expr(&node.slice);
            }
            ast::Expr::Starred(node) => self.expr(&node.value),
            ast::Expr::Name(node) => {
                if let ControlFlow::Break(()) = self.visitor.visit_name(node, self.ctx) {
                    self.stopped = true;
                }
            }
            ast::Expr::List(node) => self.exprs(&node.elts),
            ast::Expr::Tuple(node) => self.exprs(&node.elts),
            ast::Expr::Slice(node) => {
                self.opt_expr(node.lower.as_deref());
                self.opt_expr(node.upper.as_deref());
                self.opt_expr(node.step.as_deref());
            }
        }
    }

    fn exprs(&mut self, exprs: &[ast::Expr]) {
        for expr in exprs {
            self.expr(expr);
        }
    }

    fn opt_expr(&mut self, expr: Option<&ast::Expr>) {
        if let Some(expr) = expr {
            self.expr(expr);
        }
    }

    fn arguments(&mut self, args: &ast::Arguments) {
        for arg in &args.posonlyargs {
            self.arg_with_default(arg);
        }
        for arg in &args.args {
            self.arg_with_default(arg);
        }
        if let Some(vararg) = &args.vararg {
            self.arg(vararg);
        }
        for arg in &args.kwonlyargs {
            self.arg_with_default(arg);
        }
        if let Some(kwarg) = &args.kwarg {
            self.arg(kwarg);
        }
    }

    fn arg_with_default(&mut self, arg: &ast::ArgWithDefault) {
        self.arg(&arg.def);
        self.opt_expr(arg.default.as_deref());
    }

    fn arg(&mut self, arg: &ast::Arg) {
        self.opt_expr(arg.annotation.as_deref());
    }

    fn with_items(&mut self, items: &[ast::WithItem]) {
        for item in items {
            self.expr(&item.context_expr);
            self.opt_expr(item.optional_vars.as_deref());
        }
    }

    fn handlers(&mut self, handlers: &[ast::ExceptHandler]) {
        for handler in handlers {
            let ast::ExceptHandler::ExceptHandler(handler) = handler;
            self.opt_expr(handler.type_.as_deref());
            self.suite(&handler.body);
        }
    }

    fn comprehensions(&mut self, generators: &[ast::Comprehension]) {
        for generator in generators {
            self.expr(&generator.target);
            self.expr(&generator.iter);
            self.exprs(&generator.ifs);
        }
    }

    fn pattern(&mut self, pattern: &ast::Pattern) {
        match pattern {
            ast::Pattern::MatchValue(node) => self.expr(&node.value),
            ast::Pattern::MatchSingleton(_) => {}
            ast::Pattern::MatchSequence(node) => self.patterns(&node.patterns),
            ast::Pattern::MatchMapping(node) => {
                self.exprs(&node.keys);
                self.patterns(&node.patterns);
            }
            ast::Pattern::MatchClass(node) => {
                self.expr(&node.cls);
                self.patterns(&node.patterns);
                self.patterns(&node.kwd_patterns);
            }
            ast::Pattern::MatchStar(_) => {}
            ast::Pattern::MatchAs(node) => {
                if let Some(pattern) = &node.pattern {
                    self.pattern(pattern);
                }
            }
            ast::Pattern::MatchOr(node) => self.patterns(&node.patterns),
        }
    }

    fn patterns(&mut self, patterns: &[ast::Pattern]) {
        for pattern in patterns {
            self.pattern(pattern);
        }
    }
}
