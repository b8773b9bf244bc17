//! Parsed type annotations (syntax only; resolved to `TypeTerm`s by
//! `statik_infer`). Kept separate from the inferred `TypeTerm` lattice, the
//! same split the teacher draws between `ParsedType` and `ori_types::TypeData`.

use crate::name::Name;

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ParsedType {
    /// A bare name: `int`, `str`, `MyClass`, ...
    Name(Name),
    /// A generic name with bracketed arguments: `List[int]`, `Dict[str, int]`.
    Generic(Name, Vec<ParsedType>),
    /// `Optional[T]` / `T | None`, both of which the parser folds here.
    Optional(Box<ParsedType>),
}
