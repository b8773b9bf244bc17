//! Top-level (and nested) item definitions: functions, classes, modules.
//!
//! Grounded on `ori_ir::ast::items::function::Function`, trimmed to the
//! subset spec.md requires: no generics, capabilities, guard clauses, or
//! where-clauses, since this source language doesn't have them. Decorators
//! are kept (spec.md §4.1 allows an empty-by-default allow-list of them).

use crate::arena::{ParamRange, StmtRange};
use crate::ast::types::ParsedType;
use crate::name::Name;
use crate::span::{Span, Spanned};

/// A function or method definition.
///
/// A public (non-underscore-prefixed) function is expected to resolve every
/// parameter and its return type by the end of inference; an unannotated
/// boundary is only an error once Stage B's usage-based recovery has had a
/// chance to narrow it (spec.md §4.2/§7). This type itself carries the raw
/// (possibly absent) annotations as written.
#[derive(Clone, Debug)]
pub struct Function {
    pub name: Name,
    pub params: ParamRange,
    pub return_annotation: Option<ParsedType>,
    /// Allow-listed decorator names, in source order, applied outermost first.
    pub decorators: Vec<Name>,
    pub body: StmtRange,
    pub span: Span,
}

impl Spanned for Function {
    fn span(&self) -> Span {
        self.span
    }
}

/// A class definition: at most one base class (multiple inheritance and
/// mixins are rejected at parse time, spec.md §4.1/§3 `ClassRecord`).
#[derive(Clone, Debug)]
pub struct Class {
    pub name: Name,
    pub base: Option<Name>,
    pub fields: Vec<(Name, Option<ParsedType>)>,
    pub methods: Vec<Function>,
    pub span: Span,
}

impl Spanned for Class {
    fn span(&self) -> Span {
        self.span
    }
}

#[derive(Clone, Debug)]
pub enum Item {
    Function(Function),
    Class(Class),
}

/// A parsed source file: a flat, ordered list of top-level items.
#[derive(Clone, Debug, Default)]
pub struct Module {
    pub items: Vec<Item>,
}
