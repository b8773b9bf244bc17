//! Top-level item grammar: function and class definitions.

use rustc_hash::FxHashSet;
use statik_ir::ast::{Arena, Class, Function, Item, Param, ParsedType, StmtKind};
use statik_ir::{Name, StmtRange};
use statik_lexer::TokenKind;

use crate::error::{ParseError, UnsupportedFeatureKind};
use crate::grammar::stmt::parse_block;
use crate::grammar::ty::parse_type;
use crate::Parser;

/// The (empty-by-default) decorator allow-list (spec.md §4.1). Nothing is
/// allow-listed for this translator; any `@decorator` is rejected.
const DECORATOR_ALLOWLIST: &[&str] = &[];

pub(crate) fn parse_item(p: &mut Parser) -> Result<Item, ParseError> {
    let decorators = parse_decorators(p)?;
    match p.cursor.peek() {
        TokenKind::Async => {
            Err(ParseError::UnsupportedFeature { kind: UnsupportedFeatureKind::AsyncSuspension, span: p.cursor.span() })
        }
        TokenKind::Def => {
            let mut func = parse_function(p)?;
            func.decorators = decorators;
            Ok(Item::Function(func))
        }
        TokenKind::Class => parse_class(p).map(Item::Class),
        _ => Err(ParseError::UnexpectedToken { expected: "a function or class definition", span: p.cursor.span() }),
    }
}

fn parse_decorators(p: &mut Parser) -> Result<Vec<Name>, ParseError> {
    let mut decorators = Vec::new();
    while matches!(p.cursor.peek(), TokenKind::At) {
        let span = p.cursor.span();
        p.cursor.bump();
        let (name, _) = p.expect_ident("a decorator name")?;
        if matches!(p.cursor.peek(), TokenKind::LParen) {
            p.cursor.bump();
            while !matches!(p.cursor.peek(), TokenKind::RParen | TokenKind::Eof) {
                p.cursor.bump();
            }
            p.cursor.eat("')'", |k| matches!(k, TokenKind::RParen))?;
        }
        p.cursor.eat("a newline", |k| matches!(k, TokenKind::Newline))?;
        if !DECORATOR_ALLOWLIST.contains(&p.interner.lookup(name)) {
            return Err(ParseError::UnsupportedFeature { kind: UnsupportedFeatureKind::Decorator, span });
        }
        decorators.push(name);
    }
    Ok(decorators)
}

pub(crate) fn parse_function(p: &mut Parser) -> Result<Function, ParseError> {
    let span = p.cursor.span();
    p.cursor.bump(); // `def`
    let (name, _) = p.expect_ident("a function name")?;
    p.cursor.eat("'('", |k| matches!(k, TokenKind::LParen))?;
    let mut params = Vec::new();
    if !matches!(p.cursor.peek(), TokenKind::RParen) {
        params.push(parse_param(p)?);
        while matches!(p.cursor.peek(), TokenKind::Comma) {
            p.cursor.bump();
            if matches!(p.cursor.peek(), TokenKind::RParen) {
                break;
            }
            params.push(parse_param(p)?);
        }
    }
    p.cursor.eat("')'", |k| matches!(k, TokenKind::RParen))?;

    let return_annotation = if matches!(p.cursor.peek(), TokenKind::Arrow) {
        p.cursor.bump();
        Some(parse_type(&mut p.cursor)?)
    } else {
        None
    };

    let body = parse_block(p)?;

    let mut locals: FxHashSet<Name> = params.iter().map(|param| param.name).collect();
    collect_assigned_names(&p.arena, body, &mut locals);
    check_nested_captures(&p.arena, body, &locals)?;

    let params = p.arena.alloc_params(params);
    Ok(Function { name, params, return_annotation, decorators: Vec::new(), body, span })
}

/// Collects every name assigned by a plain `target = ...` or `for target in
/// ...` within `stmts`, recursing through `if`/`while`/`for` bodies but not
/// into a nested function's own body (its assignments are its own scope).
fn collect_assigned_names(arena: &Arena, stmts: StmtRange, names: &mut FxHashSet<Name>) {
    for &stmt_id in arena.stmt_list(stmts) {
        match &arena.stmt(stmt_id).kind {
            StmtKind::Assign { target, .. } => {
                names.insert(*target);
            }
            StmtKind::If { then_branch, else_branch, .. } => {
                collect_assigned_names(arena, *then_branch, names);
                collect_assigned_names(arena, *else_branch, names);
            }
            StmtKind::While { body, .. } => collect_assigned_names(arena, *body, names),
            StmtKind::For { target, body, .. } => {
                names.insert(*target);
                collect_assigned_names(arena, *body, names);
            }
            StmtKind::NestedFunctionDef(_) | StmtKind::Expr(_) | StmtKind::Return(_) | StmtKind::Pass => {}
        }
    }
}

/// Walks `stmts` looking for a nested function definition that assigns a
/// name already a local of some enclosing function (spec.md §4.1: this
/// source subset has no `nonlocal`, so that assignment can only mean the
/// nested function meant to mutate the enclosing local, not shadow it).
fn check_nested_captures(arena: &Arena, stmts: StmtRange, enclosing_locals: &FxHashSet<Name>) -> Result<(), ParseError> {
    for &stmt_id in arena.stmt_list(stmts) {
        let stmt = arena.stmt(stmt_id);
        match &stmt.kind {
            StmtKind::NestedFunctionDef(nested) => {
                let own_params: FxHashSet<Name> = arena.params(nested.params).iter().map(|param| param.name).collect();
                let mut own_locals = FxHashSet::default();
                collect_assigned_names(arena, nested.body, &mut own_locals);
                let captures = own_locals.iter().any(|name| enclosing_locals.contains(name) && !own_params.contains(name));
                if captures {
                    return Err(ParseError::UnsupportedFeature {
                        kind: UnsupportedFeatureKind::CapturingNestedFunction,
                        span: stmt.span,
                    });
                }
                let mut inner_locals = enclosing_locals.clone();
                inner_locals.extend(own_params);
                inner_locals.extend(own_locals);
                check_nested_captures(arena, nested.body, &inner_locals)?;
            }
            StmtKind::If { then_branch, else_branch, .. } => {
                check_nested_captures(arena, *then_branch, enclosing_locals)?;
                check_nested_captures(arena, *else_branch, enclosing_locals)?;
            }
            StmtKind::While { body, .. } => check_nested_captures(arena, *body, enclosing_locals)?,
            StmtKind::For { body, .. } => check_nested_captures(arena, *body, enclosing_locals)?,
            StmtKind::Expr(_) | StmtKind::Return(_) | StmtKind::Pass | StmtKind::Assign { .. } => {}
        }
    }
    Ok(())
}

fn parse_param(p: &mut Parser) -> Result<Param, ParseError> {
    let span = p.cursor.span();
    if matches!(p.cursor.peek(), TokenKind::Star | TokenKind::DoubleStar) {
        return Err(ParseError::UnsupportedFeature { kind: UnsupportedFeatureKind::VarArgs, span });
    }
    let (name, _) = p.expect_ident("a parameter name")?;
    let annotation = if matches!(p.cursor.peek(), TokenKind::Colon) {
        p.cursor.bump();
        Some(parse_type(&mut p.cursor)?)
    } else {
        None
    };
    let default = if matches!(p.cursor.peek(), TokenKind::Assign) {
        p.cursor.bump();
        Some(crate::grammar::expr::parse_expr(p)?)
    } else {
        None
    };
    Ok(Param { name, annotation, default, span })
}

fn parse_class(p: &mut Parser) -> Result<Class, ParseError> {
    let span = p.cursor.span();
    p.cursor.bump(); // `class`
    let (name, _) = p.expect_ident("a class name")?;

    let mut base = None;
    if matches!(p.cursor.peek(), TokenKind::LParen) {
        let paren_span = p.cursor.span();
        p.cursor.bump();
        if !matches!(p.cursor.peek(), TokenKind::RParen) {
            let (first_base, _) = p.expect_ident("a base class name")?;
            base = Some(first_base);
            if matches!(p.cursor.peek(), TokenKind::Comma) {
                return Err(ParseError::UnsupportedFeature {
                    kind: UnsupportedFeatureKind::MultipleInheritance,
                    span: paren_span,
                });
            }
        }
        p.cursor.eat("')'", |k| matches!(k, TokenKind::RParen))?;
    }

    p.cursor.eat("':'", |k| matches!(k, TokenKind::Colon))?;
    p.cursor.eat("a newline", |k| matches!(k, TokenKind::Newline))?;
    p.cursor.eat("an indented class body", |k| matches!(k, TokenKind::Indent))?;

    let mut fields: Vec<(Name, Option<ParsedType>)> = Vec::new();
    let mut methods = Vec::new();
    loop {
        p.cursor.skip_blank_lines();
        if matches!(p.cursor.peek(), TokenKind::Dedent | TokenKind::Eof) {
            break;
        }
        if matches!(p.cursor.peek(), TokenKind::Def) {
            methods.push(parse_function(p)?);
            continue;
        }
        if matches!(p.cursor.peek(), TokenKind::Pass) {
            p.cursor.bump();
            p.cursor.eat("a newline", |k| matches!(k, TokenKind::Newline))?;
            continue;
        }
        // A bare `name: Type` field declaration.
        if let TokenKind::Ident(field_name) = *p.cursor.peek() {
            p.cursor.bump();
            p.cursor.eat("':'", |k| matches!(k, TokenKind::Colon))?;
            let annotation = parse_type(&mut p.cursor)?;
            p.cursor.eat("a newline", |k| matches!(k, TokenKind::Newline))?;
            fields.push((field_name, Some(annotation)));
            continue;
        }
        return Err(ParseError::UnexpectedToken { expected: "a field or method", span: p.cursor.span() });
    }
    p.cursor.eat("a dedent", |k| matches!(k, TokenKind::Dedent))?;

    Ok(Class { name, base, fields, methods, span })
}
