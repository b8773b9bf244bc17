//! Parses type annotations (`int`, `list[int]`, `Optional[str]`) into
//! [`ParsedType`]. Resolution to the `TypeTerm` lattice happens later, in
//! `statik_infer` (spec.md §4.2's declaration-driven Stage A).

use statik_ir::ast::ParsedType;
use statik_lexer::TokenKind;

use crate::cursor::Cursor;
use crate::error::ParseError;

pub(crate) fn parse_type(cursor: &mut Cursor) -> Result<ParsedType, ParseError> {
    let name = match cursor.peek() {
        TokenKind::Ident(name) => {
            let name = *name;
            cursor.bump();
            name
        }
        _ => return Err(ParseError::UnexpectedToken { expected: "a type annotation", span: cursor.span() }),
    };

    if !matches!(cursor.peek(), TokenKind::LBracket) {
        return Ok(ParsedType::Name(name));
    }

    cursor.bump();
    let mut args = vec![parse_type(cursor)?];
    while matches!(cursor.peek(), TokenKind::Comma) {
        cursor.bump();
        args.push(parse_type(cursor)?);
    }
    cursor.eat("']'", |k| matches!(k, TokenKind::RBracket))?;
    Ok(ParsedType::Generic(name, args))
}
