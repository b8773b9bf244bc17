//! Runtime-ABI rendering for the systems target, grounded on
//! `ori_codegen::c::runtime::CRuntime::emit_functions`'s `ori_*` helper
//! declarations, renamed to the `statik_*` prefix this target's generated
//! runtime header uses.

use statik_backend::RuntimeAbi;
use statik_sir::RuntimeOp;

pub struct CRuntimeAbi;

impl RuntimeAbi for CRuntimeAbi {
    fn is_inlined(&self, op: RuntimeOp) -> bool {
        matches!(
            op,
            RuntimeOp::AbsInt
                | RuntimeOp::AbsFloat
                | RuntimeOp::Min2Int
                | RuntimeOp::Min2Float
                | RuntimeOp::Max2Int
                | RuntimeOp::Max2Float
        )
    }

    fn helper_symbol(&self, op: RuntimeOp) -> &str {
        match op {
            RuntimeOp::AbsInt => "llabs",
            RuntimeOp::AbsFloat => "fabs",
            RuntimeOp::BoolOf => "statik_bool_of",
            RuntimeOp::StrOf => "statik_str_of",
            RuntimeOp::IntOfFloat => "statik_int_of_float",
            RuntimeOp::FloatOfInt => "statik_float_of_int",
            RuntimeOp::LenString => "statik_len_string",
            RuntimeOp::LenList => "statik_len_list",
            RuntimeOp::LenDict => "statik_len_dict",
            RuntimeOp::LenSet => "statik_len_set",
            RuntimeOp::Min2Int | RuntimeOp::Min2Float => "statik_min2",
            RuntimeOp::Max2Int | RuntimeOp::Max2Float => "statik_max2",
            RuntimeOp::PrintValue => "statik_print_value",
            RuntimeOp::StrUpper => "statik_str_upper",
            RuntimeOp::StrLower => "statik_str_lower",
            RuntimeOp::StrStrip => "statik_str_strip",
            RuntimeOp::StrSplit => "statik_str_split",
            RuntimeOp::StrReplace => "statik_str_replace",
            RuntimeOp::ListComprehensionWithFilter => "statik_list_comprehension_with_filter",
            RuntimeOp::DictComprehension => "statik_dict_comprehension",
            RuntimeOp::SetComprehension => "statik_set_comprehension",
        }
    }
}
