//! Contiguous storage for a parsed module's expressions, statements and
//! parameters, addressed through the index types in [`crate::arena`].

use crate::arena::{to_u16, to_u32, ExprId, ExprRange, ParamId, ParamRange, StmtId, StmtRange};
use crate::ast::expr::Expr;
use crate::ast::stmt::{Param, Stmt};

/// Owns every expression, statement and parameter parsed from a single
/// source file. Built once by `statik_parse` and handed to `statik_infer`
/// and `statik_sir` by shared reference; nothing mutates it after parsing
/// completes.
#[derive(Default)]
pub struct Arena {
    exprs: Vec<Expr>,
    expr_lists: Vec<ExprId>,
    stmts: Vec<Stmt>,
    stmt_lists: Vec<StmtId>,
    params: Vec<Param>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = to_u32(self.exprs.len(), "exprs");
        self.exprs.push(expr);
        ExprId::new(id)
    }

    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    pub fn alloc_expr_list(&mut self, items: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = to_u32(self.expr_lists.len(), "expr_lists");
        self.expr_lists.extend(items);
        let len = to_u16(self.expr_lists.len() - start as usize, "expr_lists");
        ExprRange::new(start, len)
    }

    pub fn expr_list(&self, range: ExprRange) -> &[ExprId] {
        let start = range.start as usize;
        &self.expr_lists[start..start + range.len()]
    }

    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = to_u32(self.stmts.len(), "stmts");
        self.stmts.push(stmt);
        StmtId::new(id)
    }

    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    pub fn alloc_stmt_list(&mut self, items: impl IntoIterator<Item = StmtId>) -> StmtRange {
        let start = to_u32(self.stmt_lists.len(), "stmt_lists");
        self.stmt_lists.extend(items);
        let len = to_u16(self.stmt_lists.len() - start as usize, "stmt_lists");
        StmtRange::new(start, len)
    }

    pub fn stmt_list(&self, range: StmtRange) -> &[StmtId] {
        let start = range.start as usize;
        &self.stmt_lists[start..start + range.len()]
    }

    pub fn alloc_param(&mut self, param: Param) -> ParamId {
        let id = to_u32(self.params.len(), "params");
        self.params.push(param);
        ParamId::new(id)
    }

    pub fn alloc_params(&mut self, items: impl IntoIterator<Item = Param>) -> ParamRange {
        let start = to_u32(self.params.len(), "params");
        self.params.extend(items);
        let len = to_u16(self.params.len() - start as usize, "params");
        ParamRange::new(start, len)
    }

    pub fn params(&self, range: ParamRange) -> &[Param] {
        let start = range.start as usize;
        &self.params[start..start + range.len()]
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::ast::expr::{ExprKind, Literal};
    use crate::span::Span;

    #[test]
    fn round_trips_expr_list() {
        let mut arena = Arena::new();
        let a = arena.alloc_expr(Expr {
            kind: ExprKind::Literal(Literal::Int(1)),
            span: Span::DUMMY,
        });
        let b = arena.alloc_expr(Expr {
            kind: ExprKind::Literal(Literal::Int(2)),
            span: Span::DUMMY,
        });
        let range = arena.alloc_expr_list([a, b]);
        assert_eq!(arena.expr_list(range), &[a, b]);
    }
}
