//! Tokenizer for the static-subset source language.
//!
//! Three layers, grounded on `ori_lexer`'s split (`raw_token` → `cooker` →
//! `Token`): a logos-derived [`raw`] scanner produces untyped lexical
//! classes, [`cooker::tokenize`] resolves escapes, parses numeric literals,
//! interns identifiers/strings and folds indentation into `Indent`/`Dedent`
//! tokens via [`indent`].

mod cooker;
mod escape;
mod indent;
mod raw;

pub mod error;
pub mod token;

pub use cooker::tokenize;
pub use error::LexError;
pub use token::{Token, TokenKind};
