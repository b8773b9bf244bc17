//! Container lowering for the service target: Go's native slice/map
//! operations, available as built-in syntax rather than a generated helper
//! library (unlike the manual-memory target's `statik_*` runtime calls).

use statik_backend::{ContainerSystem, EmittedExpr};
use statik_ir::ast::ContainerKind;
use statik_sir::ContainerOpKind;

pub struct GoContainerSystem;

impl ContainerSystem for GoContainerSystem {
    fn supports_heterogeneous(&self) -> bool {
        true
    }

    fn type_spelling(&self, kind: ContainerKind, elem_types: &[String]) -> String {
        match kind {
            ContainerKind::List => format!("[]{}", elem_types[0]),
            ContainerKind::Set => format!("map[{}]struct{{}}", elem_types[0]),
            ContainerKind::Dict => format!("map[{}]{}", elem_types[0], elem_types[1]),
            ContainerKind::Tuple => format!("struct {{ {} }}", elem_types.iter().enumerate().map(|(i, t)| format!("F{i} {t}")).collect::<Vec<_>>().join("; ")),
        }
    }

    fn build_expr(&self, op: ContainerOpKind, receiver: &EmittedExpr, args: &[EmittedExpr]) -> EmittedExpr {
        let a: Vec<&str> = args.iter().map(|e| e.0.as_str()).collect();
        let text = match op {
            ContainerOpKind::Len => format!("len({})", receiver.0),
            ContainerOpKind::Append => format!("{} = append({}, {})", receiver.0, receiver.0, a.join(", ")),
            ContainerOpKind::Get => format!("{}[{}]", receiver.0, a.join(", ")),
            ContainerOpKind::Set => format!("{}[{}] = {}", receiver.0, a.first().copied().unwrap_or_default(), a.get(1).copied().unwrap_or_default()),
            ContainerOpKind::Contains => format!("statikContains({}, {})", receiver.0, a.join(", ")),
            ContainerOpKind::Iter => format!("range {}", receiver.0),
            ContainerOpKind::Map => format!("statikMap({}, {})", receiver.0, a.join(", ")),
            ContainerOpKind::Filter => format!("statikFilter({}, {})", receiver.0, a.join(", ")),
        };
        EmittedExpr::new(text)
    }
}
