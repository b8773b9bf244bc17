use statik_ir::{Name, Span};

/// A cooked token: a logos `RawToken` that has been escape-processed
/// (strings), parsed (numeric literals) and interned (identifiers/strings).
#[derive(Clone, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

#[derive(Copy, Clone, Debug)]
pub enum TokenKind {
    Int(i64),
    Float(f64),
    Str(Name),
    Ident(Name),

    Def,
    Class,
    If,
    Elif,
    Else,
    While,
    For,
    In,
    Return,
    Pass,
    And,
    Or,
    Not,
    True,
    False,
    None,
    Yield,
    Async,
    Await,

    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Colon,
    Comma,
    Dot,
    Arrow,
    At,

    Assign,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    DoubleSlashEq,
    PercentEq,
    DoubleStarEq,

    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    Plus,
    Minus,
    Star,
    Slash,
    DoubleSlash,
    Percent,
    DoubleStar,

    /// End of a logical line (blank lines and lines inside brackets never
    /// produce one; see [`crate::indent`]).
    Newline,
    /// One new indentation level opened.
    Indent,
    /// One indentation level closed.
    Dedent,
    Eof,
}
