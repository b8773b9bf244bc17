//! The stable, target-independent runtime operation vocabulary (spec.md
//! §4.6). `statik_sir`'s builder resolves recognized builtin free-function
//! calls (`len(x)`, `abs(x)`, `print(x)`, ...) and built-in method calls
//! (`s.upper()`, ...) to one of these at SIR-construction time, so no
//! backend's emitter ever has to re-derive "is this the builtin `len` or a
//! user function named `len`" from a bare name.
//!
//! Grounded on `ori_codegen::c::runtime`'s closed runtime-helper-name set,
//! generalized from "one target's C helper names" to "one vocabulary every
//! target maps independently" (spec.md §4.6: "the emitter never emits
//! source-language identifiers").

use statik_types::{TypeId, TypeInterner, TypeTerm};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum RuntimeOp {
    AbsInt,
    AbsFloat,
    BoolOf,
    StrOf,
    IntOfFloat,
    FloatOfInt,
    LenString,
    LenList,
    LenDict,
    LenSet,
    Min2Int,
    Max2Int,
    Min2Float,
    Max2Float,
    PrintValue,
    StrUpper,
    StrLower,
    StrStrip,
    StrSplit,
    StrReplace,
    ListComprehensionWithFilter,
    DictComprehension,
    SetComprehension,
}

impl RuntimeOp {
    /// The `op.*` spelling spec.md §4.6 prescribes; every target's name
    /// mapper is keyed on this rather than on `Debug`/variant names, so
    /// renaming a Rust variant never silently changes a stable ABI symbol.
    pub const fn abi_name(self) -> &'static str {
        match self {
            Self::AbsInt => "op.abs_int",
            Self::AbsFloat => "op.abs_float",
            Self::BoolOf => "op.bool_of",
            Self::StrOf => "op.str_of",
            Self::IntOfFloat => "op.int_of_float",
            Self::FloatOfInt => "op.float_of_int",
            Self::LenString => "op.len_string",
            Self::LenList => "op.len_list",
            Self::LenDict => "op.len_dict",
            Self::LenSet => "op.len_set",
            Self::Min2Int => "op.min2_int",
            Self::Max2Int => "op.max2_int",
            Self::Min2Float => "op.min2_float",
            Self::Max2Float => "op.max2_float",
            Self::PrintValue => "op.print_value",
            Self::StrUpper => "op.str_upper",
            Self::StrLower => "op.str_lower",
            Self::StrStrip => "op.str_strip",
            Self::StrSplit => "op.str_split",
            Self::StrReplace => "op.str_replace",
            Self::ListComprehensionWithFilter => "op.list_comprehension_with_filter",
            Self::DictComprehension => "op.dict_comprehension",
            Self::SetComprehension => "op.set_comprehension",
        }
    }
}

/// Resolves a free-function call (`len(x)`, `abs(x)`, `min(a, b)`, ...) to
/// a [`RuntimeOp`] given the already-inferred type of its first argument.
/// Returns `None` for any name not in the closed builtin set, leaving the
/// caller to treat it as a user-defined function call.
pub fn resolve_builtin_call(name: &str, arg_count: usize, first_arg_type: Option<TypeId>, types: &TypeInterner) -> Option<RuntimeOp> {
    let is_float = |id: TypeId| matches!(types.lookup(id), TypeTerm::Float);
    match (name, arg_count) {
        ("len", 1) => first_arg_type.map(|t| match types.lookup(t) {
            TypeTerm::Str => RuntimeOp::LenString,
            TypeTerm::Dict(_, _) => RuntimeOp::LenDict,
            TypeTerm::Set(_) => RuntimeOp::LenSet,
            _ => RuntimeOp::LenList,
        }),
        ("abs", 1) => first_arg_type.map(|t| if is_float(t) { RuntimeOp::AbsFloat } else { RuntimeOp::AbsInt }),
        ("bool", 1) => Some(RuntimeOp::BoolOf),
        ("str", 1) => Some(RuntimeOp::StrOf),
        ("int", 1) => first_arg_type.filter(|&t| is_float(t)).map(|_| RuntimeOp::IntOfFloat),
        ("float", 1) => first_arg_type.filter(|&t| !is_float(t)).map(|_| RuntimeOp::FloatOfInt),
        ("min", 2) => first_arg_type.map(|t| if is_float(t) { RuntimeOp::Min2Float } else { RuntimeOp::Min2Int }),
        ("max", 2) => first_arg_type.map(|t| if is_float(t) { RuntimeOp::Max2Float } else { RuntimeOp::Max2Int }),
        ("print", 1) => Some(RuntimeOp::PrintValue),
        _ => None,
    }
}

/// Resolves a method call (`s.upper()`, ...) to a [`RuntimeOp`] given the
/// receiver's inferred type. Only string methods are in the closed
/// runtime-ABI method set (spec.md §4.6); container methods (`append`,
/// `get`, ...) are modeled as [`crate::ContainerOp`]s instead, since their
/// lowering is per-container-kind rather than a flat name dispatch.
pub fn resolve_builtin_method(method: &str, receiver_type: TypeId, types: &TypeInterner) -> Option<RuntimeOp> {
    if !matches!(types.lookup(receiver_type), TypeTerm::Str) {
        return None;
    }
    match method {
        "upper" => Some(RuntimeOp::StrUpper),
        "lower" => Some(RuntimeOp::StrLower),
        "strip" => Some(RuntimeOp::StrStrip),
        "split" => Some(RuntimeOp::StrSplit),
        "replace" => Some(RuntimeOp::StrReplace),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn len_dispatches_on_receiver_kind() {
        let mut types = TypeInterner::new();
        let list_int = types.intern(TypeTerm::List(types.int()));
        assert_eq!(resolve_builtin_call("len", 1, Some(list_int), &types), Some(RuntimeOp::LenList));
        assert_eq!(resolve_builtin_call("len", 1, Some(types.str()), &types), Some(RuntimeOp::LenString));
    }

    #[test]
    fn abs_dispatches_on_numeric_kind() {
        let types = TypeInterner::new();
        assert_eq!(resolve_builtin_call("abs", 1, Some(types.int()), &types), Some(RuntimeOp::AbsInt));
        assert_eq!(resolve_builtin_call("abs", 1, Some(types.float()), &types), Some(RuntimeOp::AbsFloat));
    }

    #[test]
    fn unknown_names_resolve_to_none() {
        let types = TypeInterner::new();
        assert_eq!(resolve_builtin_call("fib", 1, Some(types.int()), &types), None);
    }

    #[test]
    fn string_methods_resolve_only_for_string_receivers() {
        let types = TypeInterner::new();
        assert_eq!(resolve_builtin_method("upper", types.str(), &types), Some(RuntimeOp::StrUpper));
        assert_eq!(resolve_builtin_method("upper", types.int(), &types), None);
    }
}
