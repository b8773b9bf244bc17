//! Container lowering for the systems target: every container operation is
//! a call into a small generated runtime (spec.md §4.5's "expression
//! builder"), grounded on `ori_codegen::c::runtime::CRuntime`'s
//! ARC-managed `ori_list_t`/`ori_map_t` shape.

use statik_backend::{ContainerSystem, EmittedExpr};
use statik_ir::ast::ContainerKind;
use statik_sir::ContainerOpKind;

pub struct CContainerSystem;

impl ContainerSystem for CContainerSystem {
    fn supports_heterogeneous(&self) -> bool {
        false
    }

    fn type_spelling(&self, kind: ContainerKind, elem_types: &[String]) -> String {
        match kind {
            ContainerKind::List => format!("statik_list_{}_t", elem_types[0]),
            ContainerKind::Set => format!("statik_set_{}_t", elem_types[0]),
            ContainerKind::Dict => format!("statik_dict_{}_{}_t", elem_types[0], elem_types[1]),
            ContainerKind::Tuple => format!("statik_tuple_{}_t", elem_types.join("_")),
        }
    }

    fn build_expr(&self, op: ContainerOpKind, receiver: &EmittedExpr, args: &[EmittedExpr]) -> EmittedExpr {
        let joined: Vec<&str> = args.iter().map(|a| a.0.as_str()).collect();
        let text = match op {
            ContainerOpKind::Len => format!("statik_len(&{})", receiver.0),
            ContainerOpKind::Append => format!("statik_append(&{}, {})", receiver.0, joined.join(", ")),
            ContainerOpKind::Get => format!("statik_get(&{}, {})", receiver.0, joined.join(", ")),
            ContainerOpKind::Set => format!("statik_set(&{}, {})", receiver.0, joined.join(", ")),
            ContainerOpKind::Contains => format!("statik_contains(&{}, {})", receiver.0, joined.join(", ")),
            ContainerOpKind::Iter => format!("statik_iter(&{})", receiver.0),
            ContainerOpKind::Map => format!("statik_map(&{}, {})", receiver.0, joined.join(", ")),
            ContainerOpKind::Filter => format!("statik_filter(&{}, {})", receiver.0, joined.join(", ")),
        };
        EmittedExpr::new(text)
    }
}
