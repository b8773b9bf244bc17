//! Runtime-ABI rendering for the functional target: scalar conversions and
//! numeric helpers map onto OCaml's `Stdlib` directly (`abs`, `string_of_int`,
//! ...); string/comprehension operations route to a small generated
//! `Statik` module, the same "inline where the host stdlib already has it,
//! else a named helper" split `statik_target_go::runtime_abi` uses.

use statik_backend::RuntimeAbi;
use statik_sir::RuntimeOp;

pub struct MlRuntimeAbi;

impl RuntimeAbi for MlRuntimeAbi {
    fn is_inlined(&self, op: RuntimeOp) -> bool {
        matches!(
            op,
            RuntimeOp::AbsInt
                | RuntimeOp::AbsFloat
                | RuntimeOp::BoolOf
                | RuntimeOp::StrOf
                | RuntimeOp::IntOfFloat
                | RuntimeOp::FloatOfInt
                | RuntimeOp::PrintValue
        )
    }

    fn helper_symbol(&self, op: RuntimeOp) -> &str {
        match op {
            RuntimeOp::AbsInt => "abs",
            RuntimeOp::AbsFloat => "abs_float",
            RuntimeOp::BoolOf => "Statik.bool_of",
            RuntimeOp::StrOf => "Statik.str_of",
            RuntimeOp::IntOfFloat => "int_of_float",
            RuntimeOp::FloatOfInt => "float_of_int",
            RuntimeOp::LenString => "String.length",
            RuntimeOp::LenList => "List.length",
            RuntimeOp::LenDict => "Statik.len_dict",
            RuntimeOp::LenSet => "Statik.len_set",
            RuntimeOp::Min2Int | RuntimeOp::Min2Float => "min",
            RuntimeOp::Max2Int | RuntimeOp::Max2Float => "max",
            RuntimeOp::PrintValue => "print_endline",
            RuntimeOp::StrUpper => "String.uppercase_ascii",
            RuntimeOp::StrLower => "String.lowercase_ascii",
            RuntimeOp::StrStrip => "String.trim",
            RuntimeOp::StrSplit => "Statik.str_split",
            RuntimeOp::StrReplace => "Statik.str_replace",
            RuntimeOp::ListComprehensionWithFilter => "Statik.list_comprehension_with_filter",
            RuntimeOp::DictComprehension => "Statik.dict_comprehension",
            RuntimeOp::SetComprehension => "Statik.set_comprehension",
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn min_max_are_inlined_onto_stdlib_but_min2int_itself_routes_through_the_helper_table() {
        let abi = MlRuntimeAbi;
        assert_eq!(abi.helper_symbol(RuntimeOp::Min2Int), "min");
        assert!(!abi.is_inlined(RuntimeOp::Min2Int), "min/max still go through the table, they just resolve to a stdlib name");
    }

    #[test]
    fn scalar_conversions_are_inlined() {
        let abi = MlRuntimeAbi;
        assert!(abi.is_inlined(RuntimeOp::IntOfFloat));
        assert_eq!(abi.helper_symbol(RuntimeOp::IntOfFloat), "int_of_float");
    }
}
