use statik_ir::Span;
use thiserror::Error;

/// Lexical errors, grounded on `ori_lexer::lex_error::LexError`'s shape
/// (one variant per malformed-input case, each carrying the offending span).
#[derive(Error, Debug, Clone)]
pub enum LexError {
    #[error("unrecognized character at byte {}", span.start)]
    UnexpectedCharacter { span: Span },

    #[error("unterminated string literal")]
    UnterminatedString { span: Span },

    #[error("invalid escape sequence `\\{ch}` in string literal")]
    InvalidEscape { span: Span, ch: char },

    #[error("inconsistent indentation: mixed tabs and spaces")]
    InconsistentIndent { span: Span },

    #[error("unindent does not match any outer indentation level")]
    DedentMismatch { span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedCharacter { span }
            | LexError::UnterminatedString { span }
            | LexError::InvalidEscape { span, .. }
            | LexError::InconsistentIndent { span }
            | LexError::DedentMismatch { span } => *span,
        }
    }
}
