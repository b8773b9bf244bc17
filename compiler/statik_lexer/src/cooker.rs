//! Drives the logos [`RawToken`] stream into cooked [`Token`]s: escapes are
//! resolved, numeric literals parsed, identifiers/strings interned,
//! indentation converted to `Indent`/`Dedent`, and docstrings discarded
//! (spec.md's non-goal "preserving source comments" extends to docstrings —
//! the original source's triple-quoted strings parse but carry no meaning
//! here).

use logos::Logos;
use statik_ir::{Span, StringInterner};

use crate::error::LexError;
use crate::escape;
use crate::indent::IndentTracker;
use crate::raw::RawToken;
use crate::token::{Token, TokenKind};

/// Tokenize an entire source file.
///
/// Returns the cooked token stream (always ending in `Eof`) plus any lexical
/// errors encountered; errors do not stop tokenization early so the parser
/// can still attempt error recovery on the rest of the file (teacher
/// precedent: `ori_parse::recovery`).
pub fn tokenize(source: &str, interner: &mut StringInterner) -> (Vec<Token>, Vec<LexError>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut indent = IndentTracker::new();
    let mut lexer = RawToken::lexer(source);
    let mut at_line_start = true;

    while let Some(result) = lexer.next() {
        let span = Span::new(lexer.span().start as u32, lexer.span().end as u32);
        let raw = match result {
            Ok(raw) => raw,
            Err(()) => {
                errors.push(LexError::UnexpectedCharacter { span });
                at_line_start = false;
                continue;
            }
        };

        if at_line_start && !indent.inside_brackets() && raw != RawToken::Newline {
            let column = column_of(source, span.start);
            match indent.levels_for_column(column, span) {
                Ok(n) if n > 0 => {
                    for _ in 0..n {
                        tokens.push(Token::new(TokenKind::Indent, Span::new(span.start, span.start)));
                    }
                }
                Ok(n) if n < 0 => {
                    for _ in 0..(-n) {
                        tokens.push(Token::new(TokenKind::Dedent, Span::new(span.start, span.start)));
                    }
                }
                Ok(_) => {}
                Err(e) => errors.push(e),
            }
            at_line_start = false;
        }

        match raw {
            RawToken::Newline => {
                if indent.inside_brackets() {
                    continue;
                }
                // Collapse consecutive blank logical-line newlines into one.
                if !matches!(tokens.last().map(|t| &t.kind), Some(TokenKind::Newline) | None) {
                    tokens.push(Token::new(TokenKind::Newline, span));
                }
                at_line_start = true;
                continue;
            }
            RawToken::Docstring => continue,
            RawToken::LParen | RawToken::LBracket | RawToken::LBrace => indent.enter_bracket(),
            RawToken::RParen | RawToken::RBracket | RawToken::RBrace => indent.exit_bracket(),
            _ => {}
        }

        let kind = cook(raw, lexer.slice(), span, interner, &mut errors);
        tokens.push(Token::new(kind, span));
    }

    let tail_span = Span::new(source.len() as u32, source.len() as u32);
    if !matches!(tokens.last().map(|t| &t.kind), Some(TokenKind::Newline) | None) {
        tokens.push(Token::new(TokenKind::Newline, tail_span));
    }
    for _ in 0..indent.final_dedents() {
        tokens.push(Token::new(TokenKind::Dedent, tail_span));
    }
    tokens.push(Token::new(TokenKind::Eof, tail_span));

    (tokens, errors)
}

fn column_of(source: &str, offset: u32) -> u32 {
    let line_start = source[..offset as usize].rfind('\n').map_or(0, |i| i + 1);
    (offset as usize - line_start) as u32
}

fn cook(
    raw: RawToken,
    slice: &str,
    span: Span,
    interner: &mut StringInterner,
    errors: &mut Vec<LexError>,
) -> TokenKind {
    match raw {
        RawToken::Ident => TokenKind::Ident(interner.intern(slice)),
        RawToken::Int => {
            let digits: String = slice.chars().filter(|c| *c != '_').collect();
            match digits.parse::<i64>() {
                Ok(v) => TokenKind::Int(v),
                Err(_) => {
                    errors.push(LexError::UnexpectedCharacter { span });
                    TokenKind::Int(0)
                }
            }
        }
        RawToken::Float => {
            let digits: String = slice.chars().filter(|c| *c != '_').collect();
            match digits.parse::<f64>() {
                Ok(v) => TokenKind::Float(v),
                Err(_) => {
                    errors.push(LexError::UnexpectedCharacter { span });
                    TokenKind::Float(0.0)
                }
            }
        }
        RawToken::StringDouble | RawToken::StringSingle => {
            let content = &slice[1..slice.len() - 1];
            let cooked = escape::unescape(content, span.start + 1, errors);
            let name = interner.intern(cooked.as_deref().unwrap_or(content));
            TokenKind::Str(name)
        }
        RawToken::Def => TokenKind::Def,
        RawToken::Class => TokenKind::Class,
        RawToken::If => TokenKind::If,
        RawToken::Elif => TokenKind::Elif,
        RawToken::Else => TokenKind::Else,
        RawToken::While => TokenKind::While,
        RawToken::For => TokenKind::For,
        RawToken::In => TokenKind::In,
        RawToken::Return => TokenKind::Return,
        RawToken::Pass => TokenKind::Pass,
        RawToken::And => TokenKind::And,
        RawToken::Or => TokenKind::Or,
        RawToken::Not => TokenKind::Not,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::None => TokenKind::None,
        RawToken::Yield => TokenKind::Yield,
        RawToken::Async => TokenKind::Async,
        RawToken::Await => TokenKind::Await,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Arrow => TokenKind::Arrow,
        RawToken::At => TokenKind::At,
        RawToken::DoubleStarEq => TokenKind::DoubleStarEq,
        RawToken::DoubleSlashEq => TokenKind::DoubleSlashEq,
        RawToken::PlusEq => TokenKind::PlusEq,
        RawToken::MinusEq => TokenKind::MinusEq,
        RawToken::StarEq => TokenKind::StarEq,
        RawToken::SlashEq => TokenKind::SlashEq,
        RawToken::PercentEq => TokenKind::PercentEq,
        RawToken::DoubleStar => TokenKind::DoubleStar,
        RawToken::DoubleSlash => TokenKind::DoubleSlash,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Eq => TokenKind::Assign,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Newline | RawToken::Docstring => {
            unreachable!("handled before cook() is called")
        }
    }
}

#[allow(clippy::unwrap_used, reason = "test assertions")]
#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut interner = StringInterner::new();
        let (tokens, errors) = tokenize(source, &mut interner);
        assert!(errors.is_empty(), "unexpected lex errors: {errors:?}");
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn tokenizes_simple_function() {
        let kinds = kinds("def add(x: int, y: int) -> int:\n    return x + y\n");
        assert!(matches!(kinds[0], TokenKind::Def));
        assert!(kinds.iter().any(|k| matches!(k, TokenKind::Indent)));
        assert!(kinds.iter().any(|k| matches!(k, TokenKind::Dedent)));
        assert!(matches!(kinds.last(), Some(TokenKind::Eof)));
    }

    #[test]
    fn brackets_suppress_newlines() {
        let kinds = kinds("x = (1 +\n     2)\n");
        let newline_count = kinds.iter().filter(|k| matches!(k, TokenKind::Newline)).count();
        assert_eq!(newline_count, 1);
    }

    #[test]
    fn nested_blocks_balance_indent_and_dedent() {
        let source = "def f(x: int) -> int:\n    if x > 0:\n        return x\n    return 0\n";
        let kinds = kinds(source);
        let indents = kinds.iter().filter(|k| matches!(k, TokenKind::Indent)).count();
        let dedents = kinds.iter().filter(|k| matches!(k, TokenKind::Dedent)).count();
        assert_eq!(indents, dedents);
        assert_eq!(indents, 2);
    }

    #[test]
    fn recognizes_yield_async_await_keywords() {
        let kinds = kinds("async def f():\n    await g()\n    yield 1\n");
        assert!(kinds.iter().any(|k| matches!(k, TokenKind::Async)));
        assert!(kinds.iter().any(|k| matches!(k, TokenKind::Await)));
        assert!(kinds.iter().any(|k| matches!(k, TokenKind::Yield)));
    }

    #[test]
    fn docstrings_are_discarded() {
        let kinds = kinds("def f() -> int:\n    \"\"\"does a thing\"\"\"\n    return 0\n");
        assert!(!kinds.iter().any(|k| matches!(k, TokenKind::Str(_))));
    }
}
