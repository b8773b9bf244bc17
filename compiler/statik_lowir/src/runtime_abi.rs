//! Runtime-ABI rendering for the scalar low-level-IR target. Only the
//! scalar-int/float helpers are ever actually reached by [`crate::lower`]
//! (this target rejects strings and containers before a call ever gets
//! this far), but [`RuntimeAbi`] is total over [`RuntimeOp`], so every
//! variant still gets a stable `rt.*` symbol, matching the
//! `rt.ipow`/`rt.floordiv_i64`-style names [`crate::lower::lower_binop`]
//! already emits for the operators that lower to helper calls directly.

use statik_backend::RuntimeAbi;
use statik_sir::RuntimeOp;

pub struct LowIrRuntimeAbi;

impl RuntimeAbi for LowIrRuntimeAbi {
    fn is_inlined(&self, op: RuntimeOp) -> bool {
        matches!(
            op,
            RuntimeOp::AbsInt
                | RuntimeOp::AbsFloat
                | RuntimeOp::IntOfFloat
                | RuntimeOp::FloatOfInt
                | RuntimeOp::Min2Int
                | RuntimeOp::Min2Float
                | RuntimeOp::Max2Int
                | RuntimeOp::Max2Float
        )
    }

    fn helper_symbol(&self, op: RuntimeOp) -> &str {
        match op {
            RuntimeOp::AbsInt => "rt.abs_i64",
            RuntimeOp::AbsFloat => "rt.abs_f64",
            RuntimeOp::BoolOf => "rt.bool_of",
            RuntimeOp::StrOf => "rt.str_of",
            RuntimeOp::IntOfFloat => "rt.int_of_float",
            RuntimeOp::FloatOfInt => "rt.float_of_int",
            RuntimeOp::LenString => "rt.len_string",
            RuntimeOp::LenList => "rt.len_list",
            RuntimeOp::LenDict => "rt.len_dict",
            RuntimeOp::LenSet => "rt.len_set",
            RuntimeOp::Min2Int | RuntimeOp::Min2Float => "rt.min2",
            RuntimeOp::Max2Int | RuntimeOp::Max2Float => "rt.max2",
            RuntimeOp::PrintValue => "rt.print_value",
            RuntimeOp::StrUpper => "rt.str_upper",
            RuntimeOp::StrLower => "rt.str_lower",
            RuntimeOp::StrStrip => "rt.str_strip",
            RuntimeOp::StrSplit => "rt.str_split",
            RuntimeOp::StrReplace => "rt.str_replace",
            RuntimeOp::ListComprehensionWithFilter => "rt.list_comprehension_with_filter",
            RuntimeOp::DictComprehension => "rt.dict_comprehension",
            RuntimeOp::SetComprehension => "rt.set_comprehension",
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn scalar_conversions_are_inlined_but_still_have_a_stable_symbol() {
        let abi = LowIrRuntimeAbi;
        assert!(abi.is_inlined(RuntimeOp::AbsInt));
        assert!(abi.is_inlined(RuntimeOp::IntOfFloat));
        assert_eq!(abi.helper_symbol(RuntimeOp::AbsInt), "rt.abs_i64");
    }

    #[test]
    fn container_and_string_ops_are_not_inlined() {
        let abi = LowIrRuntimeAbi;
        assert!(!abi.is_inlined(RuntimeOp::LenList));
        assert!(!abi.is_inlined(RuntimeOp::StrUpper));
    }
}
