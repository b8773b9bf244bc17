//! The per-target container lowering table (spec.md §4.5). `statik_sir`
//! decides *which* abstract operation a method call performs
//! ([`statik_sir::ContainerOpKind`]); a `ContainerSystem` decides how that
//! operation, and the container kind it applies to, render in one target's
//! surface syntax — keyed on `(op, container kind, element type)` exactly as
//! spec.md prescribes, rather than a flat name table, since `append` on a
//! `List[Int]` and a `List[Str]` can lower to different primitives on a
//! target whose collections are monomorphized.

use statik_ir::ast::ContainerKind;
use statik_sir::ContainerOpKind;

/// A fragment of already-emitted target source, opaque to this crate.
/// `statik_sir` only ever hands a `ContainerSystem` already-rendered operand
/// text — rendering a whole expression tree is each target crate's job, kept
/// out of `statik_backend` itself since it is target-specific text, not
/// contract.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct EmittedExpr(pub String);

impl EmittedExpr {
    pub fn new(text: impl Into<String>) -> Self {
        EmittedExpr(text.into())
    }
}

pub trait ContainerSystem {
    /// Whether this target accepts a container whose elements joined to a
    /// `Union` rather than rejecting it with `HeterogeneousContainer`
    /// (spec.md §4.3's per-target escape hatch, open question §9).
    fn supports_heterogeneous(&self) -> bool {
        false
    }

    /// The surface type spelling for a container kind over the given
    /// (already-mapped) element type spellings — one element type for
    /// `List`/`Set`, two (key, value) for `Dict`.
    fn type_spelling(&self, kind: ContainerKind, elem_types: &[String]) -> String;

    /// Lowers one resolved container operation applied to `receiver` with
    /// `args` into this target's surface syntax.
    fn build_expr(&self, op: ContainerOpKind, receiver: &EmittedExpr, args: &[EmittedExpr]) -> EmittedExpr;
}
