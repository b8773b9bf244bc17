//! Statement and block grammar, driven by the off-side-rule `Indent`/
//! `Dedent`/`Newline` tokens produced by `statik_lexer`.

use statik_ir::ast::{BinaryOp, ForIter, Stmt, StmtKind};
use statik_ir::{StmtId, StmtRange};
use statik_lexer::TokenKind;

use crate::error::{ParseError, UnsupportedFeatureKind};
use crate::grammar::expr::parse_expr;
use crate::grammar::item::parse_function;
use crate::grammar::ty::parse_type;
use crate::Parser;

/// Parses a colon-then-indented-block suite: `:` `Newline` `Indent` stmt*
/// `Dedent`.
pub(crate) fn parse_block(p: &mut Parser) -> Result<StmtRange, ParseError> {
    p.cursor.eat("':'", |k| matches!(k, TokenKind::Colon))?;
    p.cursor.eat("a newline", |k| matches!(k, TokenKind::Newline))?;
    p.cursor.eat("an indented block", |k| matches!(k, TokenKind::Indent))?;
    let mut stmts = Vec::new();
    loop {
        p.cursor.skip_blank_lines();
        if matches!(p.cursor.peek(), TokenKind::Dedent | TokenKind::Eof) {
            break;
        }
        stmts.push(parse_stmt(p)?);
    }
    p.cursor.eat("a dedent", |k| matches!(k, TokenKind::Dedent))?;
    Ok(p.arena.alloc_stmt_list(stmts))
}

fn augmented_op(kind: &TokenKind) -> Option<BinaryOp> {
    Some(match kind {
        TokenKind::PlusEq => BinaryOp::Add,
        TokenKind::MinusEq => BinaryOp::Sub,
        TokenKind::StarEq => BinaryOp::Mul,
        TokenKind::SlashEq => BinaryOp::Div,
        TokenKind::DoubleSlashEq => BinaryOp::FloorDiv,
        TokenKind::PercentEq => BinaryOp::Mod,
        TokenKind::DoubleStarEq => BinaryOp::Pow,
        _ => return None,
    })
}

pub(crate) fn parse_stmt(p: &mut Parser) -> Result<StmtId, ParseError> {
    let span = p.cursor.span();
    let stmt = match p.cursor.peek() {
        TokenKind::If => parse_if(p)?,
        TokenKind::While => parse_while(p)?,
        TokenKind::For => parse_for(p)?,
        TokenKind::Return => {
            p.cursor.bump();
            let value = if matches!(p.cursor.peek(), TokenKind::Newline) { None } else { Some(parse_expr(p)?) };
            Stmt::new(StmtKind::Return(value), span)
        }
        TokenKind::Pass => {
            p.cursor.bump();
            Stmt::new(StmtKind::Pass, span)
        }
        TokenKind::Def => {
            let func = parse_function(p)?;
            Stmt::new(StmtKind::NestedFunctionDef(Box::new(func)), span)
        }
        TokenKind::Async => {
            return Err(ParseError::UnsupportedFeature { kind: UnsupportedFeatureKind::AsyncSuspension, span });
        }
        _ => parse_assign_or_expr(p)?,
    };
    let stmt_id = p.arena.alloc_stmt(stmt);
    // Simple statements are terminated by a logical-line newline; block
    // statements (if/while/for/def) already consumed their own.
    if matches!(p.arena.stmt(stmt_id).kind, StmtKind::Expr(_) | StmtKind::Assign { .. } | StmtKind::Return(_) | StmtKind::Pass) {
        p.cursor.eat("a newline", |k| matches!(k, TokenKind::Newline))?;
    }
    Ok(stmt_id)
}

fn parse_assign_or_expr(p: &mut Parser) -> Result<Stmt, ParseError> {
    let span = p.cursor.span();

    // `name [: type] = expr` or `name @= expr`, distinguished from a bare
    // expression statement by lookahead on a leading identifier.
    if let TokenKind::Ident(name) = *p.cursor.peek() {
        if matches!(p.cursor.peek_at(1), TokenKind::Colon | TokenKind::Assign) {
            p.cursor.bump();
            let annotation = if matches!(p.cursor.peek(), TokenKind::Colon) {
                p.cursor.bump();
                Some(parse_type(&mut p.cursor)?)
            } else {
                None
            };
            p.cursor.eat("'='", |k| matches!(k, TokenKind::Assign))?;
            let value = parse_expr(p)?;
            return Ok(Stmt::new(StmtKind::Assign { target: name, annotation, value }, span));
        }
        if let Some(op) = augmented_op(p.cursor.peek_at(1)) {
            p.cursor.bump();
            p.cursor.bump();
            let rhs = parse_expr(p)?;
            // `x @= e` => `x = x @ e`, only valid because `name` (a bare
            // local) is always a pure lvalue (spec.md §4.1); subscript/attr
            // augmented targets are rejected here.
            let name_expr = p.arena.alloc_expr(statik_ir::ast::Expr {
                kind: statik_ir::ast::ExprKind::Name(name),
                span,
            });
            let combined = p.arena.alloc_expr(statik_ir::ast::Expr {
                kind: statik_ir::ast::ExprKind::BinOp { op, lhs: name_expr, rhs },
                span,
            });
            return Ok(Stmt::new(StmtKind::Assign { target: name, annotation: None, value: combined }, span));
        }
    }

    let value = parse_expr(p)?;
    if matches!(p.cursor.peek(), TokenKind::Assign) && matches!(p.arena.expr(value).kind, statik_ir::ast::ExprKind::Attr { .. }) {
        // `recv.field = value`: mutating an attribute through a reference
        // rather than a local's own first assignment (spec.md §4.1).
        return Err(ParseError::UnsupportedFeature { kind: UnsupportedFeatureKind::DynamicAttributeMutation, span });
    }
    if let Some(op) = augmented_op(p.cursor.peek()) {
        // `recv.attr @= e` / `recv[i] @= e`: not a pure lvalue in this
        // grammar's term (lvalues are bare locals only), so augmented
        // assignment through them is rejected rather than silently
        // normalized (spec.md §4.1: "only when x is a pure lvalue").
        let _ = op;
        return Err(ParseError::ImpureAugmentedAssignTarget { span });
    }
    Ok(Stmt::new(StmtKind::Expr(value), span))
}

fn parse_if(p: &mut Parser) -> Result<Stmt, ParseError> {
    let span = p.cursor.span();
    p.cursor.bump(); // `if`
    let condition = parse_expr(p)?;
    let then_branch = parse_block(p)?;
    let else_branch = parse_else_chain(p)?;
    Ok(Stmt::new(StmtKind::If { condition, then_branch, else_branch }, span))
}

/// `elif` chains desugar into nested `else: if ...` blocks, one `If` stmt
/// per `elif`, matching how the original dynamic parent language's own
/// grammar treats `elif` as sugar.
fn parse_else_chain(p: &mut Parser) -> Result<StmtRange, ParseError> {
    if matches!(p.cursor.peek(), TokenKind::Elif) {
        let elif_span = p.cursor.span();
        p.cursor.bump();
        let condition = parse_expr(p)?;
        let then_branch = parse_block(p)?;
        let else_branch = parse_else_chain(p)?;
        let nested = Stmt::new(StmtKind::If { condition, then_branch, else_branch }, elif_span);
        let id = p.arena.alloc_stmt(nested);
        return Ok(p.arena.alloc_stmt_list([id]));
    }
    if matches!(p.cursor.peek(), TokenKind::Else) {
        p.cursor.bump();
        return parse_block(p);
    }
    Ok(StmtRange::EMPTY)
}

fn parse_while(p: &mut Parser) -> Result<Stmt, ParseError> {
    let span = p.cursor.span();
    p.cursor.bump();
    let condition = parse_expr(p)?;
    let body = parse_block(p)?;
    Ok(Stmt::new(StmtKind::While { condition, body }, span))
}

fn parse_for(p: &mut Parser) -> Result<Stmt, ParseError> {
    let span = p.cursor.span();
    p.cursor.bump();
    let (target, _) = p.expect_ident("a loop variable")?;
    p.cursor.eat("'in'", |k| matches!(k, TokenKind::In))?;

    let iter = parse_for_iter(p)?;
    let body = parse_block(p)?;
    Ok(Stmt::new(StmtKind::For { target, iter, body }, span))
}

/// `for v in range(a[, b[, c]])` is preserved as a distinct `ForIter::Range`
/// node rather than desugared into a generic-iterable call (spec.md §4.1),
/// recognized by a literal callee name of `range`.
fn parse_for_iter(p: &mut Parser) -> Result<ForIter, ParseError> {
    if let TokenKind::Ident(name) = *p.cursor.peek() {
        if p.interner.lookup(name) == "range" && matches!(p.cursor.peek_at(1), TokenKind::LParen) {
            p.cursor.bump();
            p.cursor.bump();
            let mut args = Vec::new();
            if !matches!(p.cursor.peek(), TokenKind::RParen) {
                args.push(parse_expr(p)?);
                while matches!(p.cursor.peek(), TokenKind::Comma) {
                    p.cursor.bump();
                    if matches!(p.cursor.peek(), TokenKind::RParen) {
                        break;
                    }
                    args.push(parse_expr(p)?);
                }
            }
            p.cursor.eat("')'", |k| matches!(k, TokenKind::RParen))?;
            return Ok(match args.len() {
                1 => ForIter::Range { start: None, stop: args[0], step: None },
                2 => ForIter::Range { start: Some(args[0]), stop: args[1], step: None },
                3 => ForIter::Range { start: Some(args[0]), stop: args[1], step: Some(args[2]) },
                _ => {
                    return Err(ParseError::UnexpectedToken {
                        expected: "1 to 3 arguments to range(...)",
                        span: p.cursor.span(),
                    })
                }
            });
        }
    }
    Ok(ForIter::Iterable(parse_expr(p)?))
}
