use statik_ir::Name;

use crate::{Confidence, TypeId};

/// Where a value's type came from. Stage A only ever produces `Annotated`;
/// Stage B's worklist pass produces the rest as it narrows `Unknown`
/// parameters and joins branches (spec.md §4.2).
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Origin {
    /// Declared by an explicit type annotation; always `Confidence::CERTAIN`.
    Annotated,
    /// Narrowed from how the value is used (an operand of `+`, an argument
    /// to a call with a known parameter type, ...).
    UsageConstraint,
    /// The join of two or more `return` sites in the same function body.
    ReturnJoined,
    /// No constraint was ever found; held at `TypeTerm::Unknown` for
    /// diagnostic purposes rather than silently defaulted.
    Defaulted,
}

/// A type paired with how confidently it was derived and why.
#[derive(Copy, Clone, Debug)]
pub struct TypedValue {
    pub type_id: TypeId,
    pub confidence: Confidence,
    pub origin: Origin,
}

impl TypedValue {
    pub fn annotated(type_id: TypeId) -> Self {
        TypedValue { type_id, confidence: Confidence::CERTAIN, origin: Origin::Annotated }
    }

    pub fn defaulted(type_id: TypeId) -> Self {
        TypedValue { type_id, confidence: Confidence::new(0.0), origin: Origin::Defaulted }
    }
}

/// A function's fully-resolved parameter and return types, the unit Stage A
/// produces per top-level `def` and Stage B then narrows using the body.
/// Params keep declaration order (not a `Name`-keyed map) so callers can
/// line up positional call arguments against them; the `__return__` key the
/// original dynamic-language dataflow engine uses is modeled here as its own
/// field instead of a sentinel string key into a single map, since this
/// grammar requires every parameter name to be a distinct, non-reserved
/// identifier.
#[derive(Clone, Debug)]
pub struct FunctionSignature {
    pub params: Vec<(Name, TypedValue)>,
    pub return_type: TypedValue,
}

impl FunctionSignature {
    pub fn new(return_type: TypedValue) -> Self {
        FunctionSignature { params: Vec::new(), return_type }
    }

    pub fn param(&self, name: Name) -> Option<TypedValue> {
        self.params.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }

    pub fn set_param(&mut self, name: Name, value: TypedValue) {
        match self.params.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.params.push((name, value)),
        }
    }
}
