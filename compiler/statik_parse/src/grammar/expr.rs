//! Expression grammar: a precedence-climbing (Pratt) parser.
//!
//! Grounded on `ori_parse::grammar::expr`'s split between primary/postfix/
//! infix parsing, restricted to the source subset's operator set (spec.md
//! §3 `BinOp`/`Compare`/`UnaryOp`). Chained comparisons (`a < b < c`) are
//! normalized here into a conjunction of single `Compare` nodes joined by
//! `BinOp(And, ...)` (spec.md §4.1), so no `ChainedCompare` AST node exists.

use smallvec::SmallVec;
use statik_ir::ast::{BinaryOp, CompareOp, ContainerKind, Expr, ExprKind, Generator, Literal, UnaryOp};
use statik_ir::ExprId;
use statik_lexer::TokenKind;

use crate::error::{ParseError, UnsupportedFeatureKind};
use crate::Parser;

/// Binding power of each binary operator token, lowest first. `None` means
/// the token does not start/continue a binary expression.
fn infix_binding_power(kind: &TokenKind) -> Option<(u8, u8, BinOrCompare)> {
    use BinOrCompare::{Bin, Cmp};
    Some(match kind {
        TokenKind::Or => (1, 2, Bin(BinaryOp::Or)),
        TokenKind::And => (3, 4, Bin(BinaryOp::And)),
        TokenKind::EqEq => (5, 6, Cmp(CompareOp::Eq)),
        TokenKind::NotEq => (5, 6, Cmp(CompareOp::NotEq)),
        TokenKind::Lt => (5, 6, Cmp(CompareOp::Lt)),
        TokenKind::LtEq => (5, 6, Cmp(CompareOp::LtEq)),
        TokenKind::Gt => (5, 6, Cmp(CompareOp::Gt)),
        TokenKind::GtEq => (5, 6, Cmp(CompareOp::GtEq)),
        TokenKind::In => (5, 6, Cmp(CompareOp::In)),
        TokenKind::Plus => (7, 8, Bin(BinaryOp::Add)),
        TokenKind::Minus => (7, 8, Bin(BinaryOp::Sub)),
        TokenKind::Star => (9, 10, Bin(BinaryOp::Mul)),
        TokenKind::Slash => (9, 10, Bin(BinaryOp::Div)),
        TokenKind::DoubleSlash => (9, 10, Bin(BinaryOp::FloorDiv)),
        TokenKind::Percent => (9, 10, Bin(BinaryOp::Mod)),
        TokenKind::DoubleStar => (12, 11, Bin(BinaryOp::Pow)), // right-assoc
        _ => return None,
    })
}

enum BinOrCompare {
    Bin(BinaryOp),
    Cmp(CompareOp),
}

pub(crate) fn parse_expr(p: &mut Parser) -> Result<ExprId, ParseError> {
    parse_expr_bp(p, 0)
}

fn parse_expr_bp(p: &mut Parser, min_bp: u8) -> Result<ExprId, ParseError> {
    let mut lhs = parse_unary(p)?;
    let mut is_compare_chain = false;

    loop {
        // `not in` spans two tokens; everything else is decided by the
        // token directly under the cursor.
        if matches!(p.cursor.peek(), TokenKind::Not) && matches!(p.cursor.peek_at(1), TokenKind::In) {
            if 5 < min_bp {
                break;
            }
            p.cursor.bump();
            p.cursor.bump();
            let rhs = parse_expr_bp(p, 6)?;
            let span = p.arena.expr(lhs).span.merge(p.arena.expr(rhs).span);
            let this_compare =
                p.arena.alloc_expr(Expr { kind: ExprKind::Compare { op: CompareOp::NotIn, lhs, rhs }, span });
            lhs = if is_compare_chain {
                p.arena.alloc_expr(Expr {
                    kind: ExprKind::BinOp { op: BinaryOp::And, lhs, rhs: this_compare },
                    span,
                })
            } else {
                is_compare_chain = true;
                this_compare
            };
            continue;
        }

        let Some((l_bp, r_bp, op)) = infix_binding_power(p.cursor.peek()) else { break };
        if l_bp < min_bp {
            break;
        }
        p.cursor.bump();
        let rhs = parse_expr_bp(p, r_bp)?;

        lhs = match op {
            BinOrCompare::Bin(bin) => {
                let span = p.arena.expr(lhs).span.merge(p.arena.expr(rhs).span);
                p.arena.alloc_expr(Expr { kind: ExprKind::BinOp { op: bin, lhs, rhs }, span })
            }
            BinOrCompare::Cmp(cmp) => {
                let span = p.arena.expr(lhs).span.merge(p.arena.expr(rhs).span);
                let this_compare =
                    p.arena.alloc_expr(Expr { kind: ExprKind::Compare { op: cmp, lhs, rhs }, span });
                if is_compare_chain {
                    // a < b < c  =>  (a<b) and (b<c): fold the new compare
                    // into a conjunction with the previous one.
                    p.arena.alloc_expr(Expr {
                        kind: ExprKind::BinOp { op: BinaryOp::And, lhs, rhs: this_compare },
                        span,
                    })
                } else {
                    is_compare_chain = true;
                    this_compare
                }
            }
        };
    }

    Ok(lhs)
}

fn parse_unary(p: &mut Parser) -> Result<ExprId, ParseError> {
    let start = p.cursor.span();
    if matches!(p.cursor.peek(), TokenKind::Minus) {
        p.cursor.bump();
        let operand = parse_unary(p)?;
        let span = start.merge(p.arena.expr(operand).span);
        return Ok(p.arena.alloc_expr(Expr { kind: ExprKind::UnaryOp { op: UnaryOp::Neg, operand }, span }));
    }
    if matches!(p.cursor.peek(), TokenKind::Not) {
        p.cursor.bump();
        let operand = parse_unary(p)?;
        let span = start.merge(p.arena.expr(operand).span);
        return Ok(p.arena.alloc_expr(Expr { kind: ExprKind::UnaryOp { op: UnaryOp::Not, operand }, span }));
    }
    parse_postfix(p)
}

fn parse_postfix(p: &mut Parser) -> Result<ExprId, ParseError> {
    let mut expr = parse_primary(p)?;
    loop {
        match p.cursor.peek() {
            TokenKind::Dot => {
                p.cursor.bump();
                let (field, field_span) = p.expect_ident("a field or method name")?;
                if matches!(p.cursor.peek(), TokenKind::LParen) {
                    p.cursor.bump();
                    let args = parse_arg_list(p)?;
                    let end = p.cursor.eat("')'", |k| matches!(k, TokenKind::RParen))?.span;
                    let span = p.arena.expr(expr).span.merge(end);
                    expr = p.arena.alloc_expr(Expr {
                        kind: ExprKind::MethodCall { receiver: expr, method: field, args },
                        span,
                    });
                } else {
                    let span = p.arena.expr(expr).span.merge(field_span);
                    expr = p.arena.alloc_expr(Expr { kind: ExprKind::Attr { receiver: expr, field }, span });
                }
            }
            TokenKind::LBracket => {
                p.cursor.bump();
                expr = parse_index_or_slice(p, expr)?;
            }
            TokenKind::LParen => {
                // Only reachable for a call on a parenthesized/primary expr
                // when the callee was a bare `Name` already turned into a
                // `Name` expr node; the grammar handles the common case
                // (`f(...)`) directly in `parse_primary`, so this arm only
                // covers chained calls on a call result, which the source
                // subset's grammar does not produce. Stop here.
                break;
            }
            _ => break,
        }
    }
    Ok(expr)
}

fn parse_index_or_slice(p: &mut Parser, receiver: ExprId) -> Result<ExprId, ParseError> {
    // `recv[a]`, `recv[a:b]`, `recv[a:b:c]`, with any slice part optional.
    let start_span = p.arena.expr(receiver).span;
    if matches!(p.cursor.peek(), TokenKind::Colon) {
        return parse_slice_tail(p, receiver, None, start_span);
    }
    let first = parse_expr(p)?;
    if matches!(p.cursor.peek(), TokenKind::Colon) {
        return parse_slice_tail(p, receiver, Some(first), start_span);
    }
    let end = p.cursor.eat("']'", |k| matches!(k, TokenKind::RBracket))?.span;
    let span = start_span.merge(end);
    Ok(p.arena.alloc_expr(Expr { kind: ExprKind::Index { receiver, index: first }, span }))
}

fn parse_slice_tail(
    p: &mut Parser,
    receiver: ExprId,
    start: Option<ExprId>,
    start_span: statik_ir::Span,
) -> Result<ExprId, ParseError> {
    p.cursor.eat("':'", |k| matches!(k, TokenKind::Colon))?;
    let stop = if matches!(p.cursor.peek(), TokenKind::Colon | TokenKind::RBracket) {
        None
    } else {
        Some(parse_expr(p)?)
    };
    let step = if matches!(p.cursor.peek(), TokenKind::Colon) {
        p.cursor.bump();
        if matches!(p.cursor.peek(), TokenKind::RBracket) { None } else { Some(parse_expr(p)?) }
    } else {
        None
    };
    let end = p.cursor.eat("']'", |k| matches!(k, TokenKind::RBracket))?.span;
    let span = start_span.merge(end);
    Ok(p.arena.alloc_expr(Expr { kind: ExprKind::SliceIndex { receiver, start, stop, step }, span }))
}

fn parse_arg_list(p: &mut Parser) -> Result<statik_ir::ExprRange, ParseError> {
    let mut args: SmallVec<[ExprId; 4]> = SmallVec::new();
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
    Ok(p.arena.alloc_expr_list(args))
}

fn parse_primary(p: &mut Parser) -> Result<ExprId, ParseError> {
    let span = p.cursor.span();
    match p.cursor.peek().clone() {
        TokenKind::Int(v) => {
            p.cursor.bump();
            Ok(p.arena.alloc_expr(Expr { kind: ExprKind::Literal(Literal::Int(v)), span }))
        }
        TokenKind::Float(v) => {
            p.cursor.bump();
            Ok(p.arena.alloc_expr(Expr { kind: ExprKind::Literal(Literal::Float(v)), span }))
        }
        TokenKind::True => {
            p.cursor.bump();
            Ok(p.arena.alloc_expr(Expr { kind: ExprKind::Literal(Literal::Bool(true)), span }))
        }
        TokenKind::False => {
            p.cursor.bump();
            Ok(p.arena.alloc_expr(Expr { kind: ExprKind::Literal(Literal::Bool(false)), span }))
        }
        TokenKind::None => {
            p.cursor.bump();
            Ok(p.arena.alloc_expr(Expr { kind: ExprKind::Literal(Literal::None), span }))
        }
        TokenKind::Str(name) => {
            p.cursor.bump();
            // String-literal concatenation: adjacent string literals fold
            // into one (spec.md §4.1).
            let mut text = p.interner.lookup(name).to_string();
            let mut end_span = span;
            while let TokenKind::Str(next) = p.cursor.peek() {
                text.push_str(p.interner.lookup(*next));
                end_span = p.cursor.span();
                p.cursor.bump();
            }
            let folded = p.intern_mut(&text);
            Ok(p.arena.alloc_expr(Expr { kind: ExprKind::Literal(Literal::Str(folded)), span: span.merge(end_span) }))
        }
        TokenKind::Yield => Err(ParseError::UnsupportedFeature { kind: UnsupportedFeatureKind::GeneratorFunction, span }),
        TokenKind::Await => Err(ParseError::UnsupportedFeature { kind: UnsupportedFeatureKind::AsyncSuspension, span }),
        TokenKind::Ident(name) => {
            p.cursor.bump();
            if matches!(p.cursor.peek(), TokenKind::LParen) {
                let callee_text = p.interner.lookup(name);
                if callee_text == "eval" || callee_text == "exec" {
                    return Err(ParseError::UnsupportedFeature { kind: UnsupportedFeatureKind::EvalExec, span });
                }
                p.cursor.bump();
                let args = parse_arg_list(p)?;
                let end = p.cursor.eat("')'", |k| matches!(k, TokenKind::RParen))?.span;
                Ok(p.arena.alloc_expr(Expr { kind: ExprKind::Call { callee: name, args }, span: span.merge(end) }))
            } else {
                Ok(p.arena.alloc_expr(Expr { kind: ExprKind::Name(name), span }))
            }
        }
        TokenKind::LParen => {
            p.cursor.bump();
            // Parenthesized expression or a tuple literal `(a, b, ...)`.
            if matches!(p.cursor.peek(), TokenKind::RParen) {
                let end = p.cursor.bump().span;
                let elements = p.arena.alloc_expr_list([]);
                let values = p.arena.alloc_expr_list([]);
                return Ok(p.arena.alloc_expr(Expr {
                    kind: ExprKind::ContainerLit { kind: ContainerKind::Tuple, elements, values },
                    span: span.merge(end),
                }));
            }
            let first = parse_expr(p)?;
            if matches!(p.cursor.peek(), TokenKind::Comma) {
                let mut items = vec![first];
                while matches!(p.cursor.peek(), TokenKind::Comma) {
                    p.cursor.bump();
                    if matches!(p.cursor.peek(), TokenKind::RParen) {
                        break;
                    }
                    items.push(parse_expr(p)?);
                }
                let end = p.cursor.eat("')'", |k| matches!(k, TokenKind::RParen))?.span;
                let elements = p.arena.alloc_expr_list(items);
                let values = p.arena.alloc_expr_list([]);
                Ok(p.arena.alloc_expr(Expr {
                    kind: ExprKind::ContainerLit { kind: ContainerKind::Tuple, elements, values },
                    span: span.merge(end),
                }))
            } else {
                p.cursor.eat("')'", |k| matches!(k, TokenKind::RParen))?;
                Ok(first)
            }
        }
        TokenKind::LBracket => parse_list_literal_or_comprehension(p, span),
        TokenKind::LBrace => parse_dict_or_set_literal_or_comprehension(p, span),
        _ => Err(ParseError::UnexpectedToken { expected: "an expression", span }),
    }
}

fn parse_generators(p: &mut Parser) -> Result<Vec<Generator>, ParseError> {
    let mut generators = Vec::new();
    loop {
        let g_span = p.cursor.span();
        p.cursor.eat("'for'", |k| matches!(k, TokenKind::For))?;
        let (target, _) = p.expect_ident("a loop variable")?;
        p.cursor.eat("'in'", |k| matches!(k, TokenKind::In))?;
        let iter = parse_expr(p)?;
        generators.push(Generator { target, iter, span: g_span.merge(p.arena.expr(iter).span) });
        if !matches!(p.cursor.peek(), TokenKind::For) {
            break;
        }
    }
    Ok(generators)
}

fn parse_list_literal_or_comprehension(p: &mut Parser, span: statik_ir::Span) -> Result<ExprId, ParseError> {
    p.cursor.bump();
    if matches!(p.cursor.peek(), TokenKind::RBracket) {
        let end = p.cursor.bump().span;
        let elements = p.arena.alloc_expr_list([]);
        let values = p.arena.alloc_expr_list([]);
        return Ok(p.arena.alloc_expr(Expr {
            kind: ExprKind::ContainerLit { kind: ContainerKind::List, elements, values },
            span: span.merge(end),
        }));
    }
    let first = parse_expr(p)?;
    if matches!(p.cursor.peek(), TokenKind::For) {
        let generators = parse_generators(p)?;
        let condition = if matches!(p.cursor.peek(), TokenKind::If) {
            p.cursor.bump();
            Some(parse_expr(p)?)
        } else {
            None
        };
        let end = p.cursor.eat("']'", |k| matches!(k, TokenKind::RBracket))?.span;
        return Ok(p.arena.alloc_expr(Expr {
            kind: ExprKind::Comprehension {
                kind: ContainerKind::List,
                generators,
                condition,
                element: first,
                value: None,
            },
            span: span.merge(end),
        }));
    }
    let mut items = vec![first];
    while matches!(p.cursor.peek(), TokenKind::Comma) {
        p.cursor.bump();
        if matches!(p.cursor.peek(), TokenKind::RBracket) {
            break;
        }
        items.push(parse_expr(p)?);
    }
    let end = p.cursor.eat("']'", |k| matches!(k, TokenKind::RBracket))?.span;
    let elements = p.arena.alloc_expr_list(items);
    let values = p.arena.alloc_expr_list([]);
    Ok(p.arena.alloc_expr(Expr {
        kind: ExprKind::ContainerLit { kind: ContainerKind::List, elements, values },
        span: span.merge(end),
    }))
}

fn parse_dict_or_set_literal_or_comprehension(p: &mut Parser, span: statik_ir::Span) -> Result<ExprId, ParseError> {
    p.cursor.bump();
    if matches!(p.cursor.peek(), TokenKind::RBrace) {
        let end = p.cursor.bump().span;
        let elements = p.arena.alloc_expr_list([]);
        let values = p.arena.alloc_expr_list([]);
        return Ok(p.arena.alloc_expr(Expr {
            kind: ExprKind::ContainerLit { kind: ContainerKind::Dict, elements, values },
            span: span.merge(end),
        }));
    }
    let first_key = parse_expr(p)?;
    if matches!(p.cursor.peek(), TokenKind::Colon) {
        // dict literal or dict comprehension
        p.cursor.bump();
        let first_value = parse_expr(p)?;
        if matches!(p.cursor.peek(), TokenKind::For) {
            let generators = parse_generators(p)?;
            let condition = if matches!(p.cursor.peek(), TokenKind::If) {
                p.cursor.bump();
                Some(parse_expr(p)?)
            } else {
                None
            };
            let end = p.cursor.eat("'}'", |k| matches!(k, TokenKind::RBrace))?.span;
            return Ok(p.arena.alloc_expr(Expr {
                kind: ExprKind::Comprehension {
                    kind: ContainerKind::Dict,
                    generators,
                    condition,
                    element: first_key,
                    value: Some(first_value),
                },
                span: span.merge(end),
            }));
        }
        let mut keys = vec![first_key];
        let mut values = vec![first_value];
        while matches!(p.cursor.peek(), TokenKind::Comma) {
            p.cursor.bump();
            if matches!(p.cursor.peek(), TokenKind::RBrace) {
                break;
            }
            keys.push(parse_expr(p)?);
            p.cursor.eat("':'", |k| matches!(k, TokenKind::Colon))?;
            values.push(parse_expr(p)?);
        }
        let end = p.cursor.eat("'}'", |k| matches!(k, TokenKind::RBrace))?.span;
        let elements = p.arena.alloc_expr_list(keys);
        let values = p.arena.alloc_expr_list(values);
        return Ok(p.arena.alloc_expr(Expr {
            kind: ExprKind::ContainerLit { kind: ContainerKind::Dict, elements, values },
            span: span.merge(end),
        }));
    }

    // set literal or set comprehension
    if matches!(p.cursor.peek(), TokenKind::For) {
        let generators = parse_generators(p)?;
        let condition = if matches!(p.cursor.peek(), TokenKind::If) {
            p.cursor.bump();
            Some(parse_expr(p)?)
        } else {
            None
        };
        let end = p.cursor.eat("'}'", |k| matches!(k, TokenKind::RBrace))?.span;
        return Ok(p.arena.alloc_expr(Expr {
            kind: ExprKind::Comprehension {
                kind: ContainerKind::Set,
                generators,
                condition,
                element: first_key,
                value: None,
            },
            span: span.merge(end),
        }));
    }
    let mut items = vec![first_key];
    while matches!(p.cursor.peek(), TokenKind::Comma) {
        p.cursor.bump();
        if matches!(p.cursor.peek(), TokenKind::RBrace) {
            break;
        }
        items.push(parse_expr(p)?);
    }
    let end = p.cursor.eat("'}'", |k| matches!(k, TokenKind::RBrace))?.span;
    let elements = p.arena.alloc_expr_list(items);
    let values = p.arena.alloc_expr_list([]);
    Ok(p.arena.alloc_expr(Expr {
        kind: ExprKind::ContainerLit { kind: ContainerKind::Set, elements, values },
        span: span.merge(end),
    }))
}
