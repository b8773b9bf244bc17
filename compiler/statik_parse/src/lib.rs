//! Recursive-descent parser and normalizer for the static-subset source
//! language.
//!
//! Grounded on `ori_parse`'s split of a grammar module per construct
//! (`grammar/expr`, `grammar/item`), layered over a token cursor. Produces
//! `statik_ir::ast::Module` plus the `statik_ir::ast::Arena` that owns every
//! expression/statement/param it references.

mod cursor;
pub mod error;
mod grammar;

use statik_ir::ast::{Arena, Module};
use statik_ir::{Name, Span, StringInterner};
use statik_lexer::{tokenize, Token};

use cursor::Cursor;
use error::ParseError;

pub struct ParseOutcome {
    pub arena: Arena,
    pub module: Module,
    pub errors: Vec<ParseError>,
}

/// Parses a full source file: lexes it, then runs the item grammar over the
/// resulting token stream. Always returns the arena built so far alongside
/// any errors, so a caller choosing to keep going (e.g. a language-server
/// use of this crate) has a best-effort tree to work with; `statik_compiler`
/// treats a non-empty `errors` as a hard stop (spec.md §7: "no error is
/// silently recovered").
pub fn parse(source: &str, interner: &mut StringInterner) -> ParseOutcome {
    let (tokens, lex_errors) = tokenize(source, interner);
    let mut parser = Parser::new(&tokens, interner);
    let module = parser.parse_module();
    let mut errors: Vec<ParseError> = lex_errors
        .into_iter()
        .map(|e| ParseError::UnexpectedToken { expected: "valid source text", span: e.span() })
        .collect();
    errors.extend(parser.errors);
    ParseOutcome { arena: parser.arena, module, errors }
}

pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
    arena: Arena,
    interner: &'a mut StringInterner,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], interner: &'a mut StringInterner) -> Self {
        Parser { cursor: Cursor::new(tokens), arena: Arena::new(), interner, errors: Vec::new() }
    }

    fn parse_module(&mut self) -> Module {
        let mut items = Vec::new();
        loop {
            self.cursor.skip_blank_lines();
            if self.cursor.at_eof() {
                break;
            }
            match grammar::item::parse_item(self) {
                Ok(item) => items.push(item),
                Err(e) => {
                    self.errors.push(e);
                    self.resync_to_next_item();
                }
            }
        }
        Module { items }
    }

    /// Error recovery: skip tokens until the next top-level `def`/`class`
    /// or end of file, so a single malformed item doesn't abort collection
    /// of diagnostics for the rest of the file.
    fn resync_to_next_item(&mut self) {
        use statik_lexer::TokenKind;
        loop {
            if self.cursor.at_eof() || matches!(self.cursor.peek(), TokenKind::Def | TokenKind::Class) {
                return;
            }
            self.cursor.bump();
        }
    }

    fn expect_ident(&mut self, expected: &'static str) -> Result<(Name, Span), ParseError> {
        use statik_lexer::TokenKind;
        let span = self.cursor.span();
        match self.cursor.peek() {
            TokenKind::Ident(name) => {
                let name = *name;
                self.cursor.bump();
                Ok((name, span))
            }
            _ => Err(ParseError::UnexpectedToken { expected, span }),
        }
    }

    fn intern_mut(&mut self, s: &str) -> Name {
        self.interner.intern(s)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use statik_ir::ast::{ExprKind, Item, Literal, StmtKind};

    #[test]
    fn parses_simple_adder() {
        let mut interner = StringInterner::new();
        let outcome = parse("def add(x: int, y: int) -> int:\n    return x + y\n", &mut interner);
        assert!(outcome.errors.is_empty(), "unexpected errors: {:?}", outcome.errors);
        assert_eq!(outcome.module.items.len(), 1);
        let Item::Function(f) = &outcome.module.items[0] else { panic!("expected function") };
        assert_eq!(interner.lookup(f.name), "add");
        let stmts = outcome.arena.stmt_list(f.body);
        assert_eq!(stmts.len(), 1);
        let StmtKind::Return(Some(expr_id)) = &outcome.arena.stmt(stmts[0]).kind else {
            panic!("expected return")
        };
        assert!(matches!(outcome.arena.expr(*expr_id).kind, ExprKind::BinOp { .. }));
    }

    #[test]
    fn public_function_with_a_partially_unannotated_signature_still_parses() {
        // Whether `x` can be recovered from usage is a question for
        // `statik_infer`'s Stage B, not the parser (spec.md §7).
        let mut interner = StringInterner::new();
        let outcome = parse("def add(x, y: int) -> int:\n    return x + y\n", &mut interner);
        assert!(outcome.errors.is_empty(), "unexpected errors: {:?}", outcome.errors);
    }

    #[test]
    fn parses_chained_comparison_as_conjunction() {
        let mut interner = StringInterner::new();
        let outcome = parse("def f(x: int) -> bool:\n    return 0 < x < 10\n", &mut interner);
        assert!(outcome.errors.is_empty(), "unexpected errors: {:?}", outcome.errors);
        let Item::Function(f) = &outcome.module.items[0] else { panic!() };
        let stmts = outcome.arena.stmt_list(f.body);
        let StmtKind::Return(Some(expr_id)) = &outcome.arena.stmt(stmts[0]).kind else { panic!() };
        assert!(matches!(outcome.arena.expr(*expr_id).kind, ExprKind::BinOp { op: statik_ir::ast::BinaryOp::And, .. }));
    }

    #[test]
    fn parses_list_comprehension_with_filter() {
        let mut interner = StringInterner::new();
        let outcome = parse(
            "def f(numbers: list[int]) -> list[int]:\n    return [x * 2 for x in numbers if x > 5]\n",
            &mut interner,
        );
        assert!(outcome.errors.is_empty(), "unexpected errors: {:?}", outcome.errors);
        let Item::Function(f) = &outcome.module.items[0] else { panic!() };
        let stmts = outcome.arena.stmt_list(f.body);
        let StmtKind::Return(Some(expr_id)) = &outcome.arena.stmt(stmts[0]).kind else { panic!() };
        assert!(matches!(outcome.arena.expr(*expr_id).kind, ExprKind::Comprehension { .. }));
    }

    #[test]
    fn rejects_multiple_inheritance() {
        let mut interner = StringInterner::new();
        let outcome = parse("class A(B, C):\n    pass\n", &mut interner);
        assert!(!outcome.errors.is_empty());
        assert!(matches!(
            outcome.errors[0],
            ParseError::UnsupportedFeature { kind: error::UnsupportedFeatureKind::MultipleInheritance, .. }
        ));
    }

    #[test]
    fn rejects_generator_function() {
        let mut interner = StringInterner::new();
        let outcome = parse("def g(x: int) -> int:\n    yield x\n", &mut interner);
        assert!(!outcome.errors.is_empty());
        assert!(matches!(
            outcome.errors[0],
            ParseError::UnsupportedFeature { kind: error::UnsupportedFeatureKind::GeneratorFunction, .. }
        ));
    }

    #[test]
    fn rejects_async_def() {
        let mut interner = StringInterner::new();
        let outcome = parse("async def f(x: int) -> int:\n    return x\n", &mut interner);
        assert!(!outcome.errors.is_empty());
        assert!(matches!(
            outcome.errors[0],
            ParseError::UnsupportedFeature { kind: error::UnsupportedFeatureKind::AsyncSuspension, .. }
        ));
    }

    #[test]
    fn rejects_await_expression() {
        let mut interner = StringInterner::new();
        let outcome = parse("def f(x: int) -> int:\n    return await x\n", &mut interner);
        assert!(!outcome.errors.is_empty());
        assert!(matches!(
            outcome.errors[0],
            ParseError::UnsupportedFeature { kind: error::UnsupportedFeatureKind::AsyncSuspension, .. }
        ));
    }

    #[test]
    fn rejects_eval_and_exec_calls() {
        let mut interner = StringInterner::new();
        let outcome = parse("def f(x: str) -> int:\n    return eval(x)\n", &mut interner);
        assert!(!outcome.errors.is_empty());
        assert!(matches!(
            outcome.errors[0],
            ParseError::UnsupportedFeature { kind: error::UnsupportedFeatureKind::EvalExec, .. }
        ));
    }

    #[test]
    fn rejects_dynamic_attribute_mutation() {
        let mut interner = StringInterner::new();
        let outcome = parse("def f(obj) -> int:\n    obj.value = 1\n    return 0\n", &mut interner);
        assert!(!outcome.errors.is_empty());
        assert!(matches!(
            outcome.errors[0],
            ParseError::UnsupportedFeature { kind: error::UnsupportedFeatureKind::DynamicAttributeMutation, .. }
        ));
    }

    #[test]
    fn rejects_nested_function_capturing_an_enclosing_local() {
        let mut interner = StringInterner::new();
        let outcome = parse(
            "def outer() -> int:\n    total = 0\n    def inner() -> int:\n        total = 1\n        return total\n    return inner()\n",
            &mut interner,
        );
        assert!(!outcome.errors.is_empty());
        assert!(matches!(
            outcome.errors[0],
            ParseError::UnsupportedFeature { kind: error::UnsupportedFeatureKind::CapturingNestedFunction, .. }
        ));
    }

    #[test]
    fn allows_nested_function_with_only_its_own_locals() {
        let mut interner = StringInterner::new();
        let outcome = parse(
            "def outer() -> int:\n    def inner() -> int:\n        total = 1\n        return total\n    return inner()\n",
            &mut interner,
        );
        assert!(outcome.errors.is_empty(), "unexpected errors: {:?}", outcome.errors);
    }

    #[test]
    fn folds_adjacent_string_literals() {
        let mut interner = StringInterner::new();
        let outcome = parse("def f() -> str:\n    return \"a\" \"b\"\n", &mut interner);
        assert!(outcome.errors.is_empty(), "unexpected errors: {:?}", outcome.errors);
        let Item::Function(f) = &outcome.module.items[0] else { panic!() };
        let stmts = outcome.arena.stmt_list(f.body);
        let StmtKind::Return(Some(expr_id)) = &outcome.arena.stmt(stmts[0]).kind else { panic!() };
        let ExprKind::Literal(Literal::Str(name)) = &outcome.arena.expr(*expr_id).kind else { panic!() };
        assert_eq!(interner.lookup(*name), "ab");
    }
}
