//! Runtime-ABI rendering for the service target: most ops are one call
//! into a small generated `statik` support package, following the same
//! `op.*` -> stable-symbol mapping the manual-memory target uses, rendered
//! in Go's `camelCase` package-function convention.

use statik_backend::RuntimeAbi;
use statik_sir::RuntimeOp;

pub struct GoRuntimeAbi;

impl RuntimeAbi for GoRuntimeAbi {
    fn is_inlined(&self, op: RuntimeOp) -> bool {
        matches!(op, RuntimeOp::LenString | RuntimeOp::LenList | RuntimeOp::LenDict | RuntimeOp::LenSet)
    }

    fn helper_symbol(&self, op: RuntimeOp) -> &str {
        match op {
            RuntimeOp::AbsInt | RuntimeOp::AbsFloat => "math.Abs",
            RuntimeOp::BoolOf => "statik.BoolOf",
            RuntimeOp::StrOf => "statik.StrOf",
            RuntimeOp::IntOfFloat => "statik.IntOfFloat",
            RuntimeOp::FloatOfInt => "statik.FloatOfInt",
            RuntimeOp::LenString | RuntimeOp::LenList | RuntimeOp::LenDict | RuntimeOp::LenSet => "len",
            RuntimeOp::Min2Int | RuntimeOp::Min2Float => "statik.Min2",
            RuntimeOp::Max2Int | RuntimeOp::Max2Float => "statik.Max2",
            RuntimeOp::PrintValue => "fmt.Println",
            RuntimeOp::StrUpper => "strings.ToUpper",
            RuntimeOp::StrLower => "strings.ToLower",
            RuntimeOp::StrStrip => "strings.TrimSpace",
            RuntimeOp::StrSplit => "strings.Split",
            RuntimeOp::StrReplace => "strings.ReplaceAll",
            RuntimeOp::ListComprehensionWithFilter => "statik.ListComprehensionWithFilter",
            RuntimeOp::DictComprehension => "statik.DictComprehension",
            RuntimeOp::SetComprehension => "statik.SetComprehension",
        }
    }
}
