//! Visitor hooks over Python AST nodes.

use std::ops::ControlFlow;

use rustpython_parser::ast;

use super::WalkContext;

/// Hooks invoked during a pre-order walk of a module.
///
/// Every hook defaults to continuing the walk, so an implementation only
/// overrides the node kinds it cares about. Returning `ControlFlow::Break`
/// stops the entire walk.
pub trait AstVisitor {
    fn visit_function_def(
        &mut self,
        _node: &ast::StmtFunctionDef,
        _ctx: &WalkContext,
    ) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_async_function_def(
        &mut self,
        _node: &ast::StmtAsyncFunctionDef,
        _ctx: &WalkContext,
    ) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_class_def(
        &mut self,
        _node: &ast::StmtClassDef,
        _ctx: &WalkContext,
    ) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_assign(&mut self, _node: &ast::StmtAssign, _ctx: &WalkContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_return(&mut self, _node: &ast::StmtReturn, _ctx: &WalkContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_try(&mut self, _node: &ast::StmtTry, _ctx: &WalkContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_compare(&mut self, _node: &ast::ExprCompare, _ctx: &WalkContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_call(&mut self, _node: &ast::ExprCall, _ctx: &WalkContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_name(&mut self, _node: &ast::ExprName, _ctx: &WalkContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_constant(&mut self, _node: &ast::ExprConstant, _ctx: &WalkContext) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}
