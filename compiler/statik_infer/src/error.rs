use statik_ir::Span;
use thiserror::Error;

#[derive(Error, Debug, Eq, PartialEq)]
pub enum InferError {
    /// A `Union` survived to a function boundary (parameter, return, or a
    /// name still live on exit from the function) with no annotation to
    /// pin it down (spec.md §4.2).
    #[error("ambiguous inference: {what} could be more than one type")]
    AmbiguousInference { what: &'static str, span: Span },

    /// A type annotation names something that isn't a builtin primitive or
    /// recognized generic container shape (`int/float/bool/str/None`,
    /// `list/dict/set/tuple[...]`, `Optional[...]`). Class-valued
    /// annotations are out of scope for the `TypeTerm` lattice (they are
    /// tracked separately by `statik_sir::ClassRecord`), so this also
    /// fires for any as-yet-unregistered class name.
    #[error("unknown type name")]
    UnknownType { span: Span },

    /// A generic annotation was used with the wrong number of type
    /// arguments for its shape (`dict[int]`, `tuple[]`, ...).
    #[error("wrong number of type arguments for '{name}': expected {expected}, found {found}")]
    GenericArityMismatch { name: &'static str, expected: &'static str, found: usize, span: Span },

    /// A public parameter or return type is still `Unknown` after Stage B's
    /// usage-based recovery had its chance to narrow it (spec.md §7).
    #[error("a public function parameter or return value is missing a type annotation")]
    MissingAnnotation { span: Span },
}

impl InferError {
    pub fn span(&self) -> Span {
        match self {
            InferError::AmbiguousInference { span, .. }
            | InferError::UnknownType { span }
            | InferError::GenericArityMismatch { span, .. }
            | InferError::MissingAnnotation { span } => *span,
        }
    }
}
