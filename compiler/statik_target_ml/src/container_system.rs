//! Container lowering for the functional target. A dictionary's concrete
//! implementation is a preference (spec.md §4.5's "selected by preference"
//! example), so unlike `statik_target_c`/`statik_target_go`'s fixed tables
//! this one carries the chosen [`HashtableStrategy`] and renders a
//! different primitive set for it.

use statik_backend::{ContainerSystem, EmittedExpr, HashtableStrategy};
use statik_ir::ast::ContainerKind;
use statik_sir::ContainerOpKind;

pub struct MlContainerSystem {
    pub hashtables: HashtableStrategy,
}

impl ContainerSystem for MlContainerSystem {
    fn supports_heterogeneous(&self) -> bool {
        // `Obj.t` gives this target a real (if unsafe) escape hatch for a
        // union element type, unlike the systems target's monomorphized
        // generated containers.
        true
    }

    fn type_spelling(&self, kind: ContainerKind, elem_types: &[String]) -> String {
        match kind {
            ContainerKind::List => format!("{} list", elem_types[0]),
            ContainerKind::Set => format!("{} StatikSet.t", elem_types[0]),
            ContainerKind::Dict => match self.hashtables {
                HashtableStrategy::Stdlib => format!("({}, {}) Hashtbl.t", elem_types[0], elem_types[1]),
                HashtableStrategy::Map => format!("{} StatikMap.t", elem_types[1]),
            },
            ContainerKind::Tuple => elem_types.join(" * "),
        }
    }

    fn build_expr(&self, op: ContainerOpKind, receiver: &EmittedExpr, args: &[EmittedExpr]) -> EmittedExpr {
        let a: Vec<&str> = args.iter().map(|e| e.0.as_str()).collect();
        let text = match (op, self.hashtables) {
            (ContainerOpKind::Len, HashtableStrategy::Stdlib) => format!("Hashtbl.length {}", receiver.0),
            (ContainerOpKind::Len, HashtableStrategy::Map) => format!("StatikMap.cardinal {}", receiver.0),
            (ContainerOpKind::Append, _) => format!("({} @ [{}])", receiver.0, a.join("; ")),
            (ContainerOpKind::Get, HashtableStrategy::Stdlib) => format!("Hashtbl.find {} {}", receiver.0, a.join(" ")),
            (ContainerOpKind::Get, HashtableStrategy::Map) => format!("StatikMap.find {} {}", a.join(" "), receiver.0),
            (ContainerOpKind::Set, HashtableStrategy::Stdlib) => format!("Hashtbl.replace {} {}", receiver.0, a.join(" ")),
            (ContainerOpKind::Set, HashtableStrategy::Map) => format!("StatikMap.add {} {}", a.join(" "), receiver.0),
            (ContainerOpKind::Contains, HashtableStrategy::Stdlib) => format!("Hashtbl.mem {} {}", receiver.0, a.join(" ")),
            (ContainerOpKind::Contains, HashtableStrategy::Map) => format!("StatikMap.mem {} {}", a.join(" "), receiver.0),
            (ContainerOpKind::Iter, _) => format!("List.to_seq {}", receiver.0),
            (ContainerOpKind::Map, _) => format!("List.map ({}) {}", a.join(" "), receiver.0),
            (ContainerOpKind::Filter, _) => format!("List.filter ({}) {}", a.join(" "), receiver.0),
        };
        EmittedExpr::new(text)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn append_is_functional_concatenation() {
        let containers = MlContainerSystem { hashtables: HashtableStrategy::Stdlib };
        let result = containers.build_expr(ContainerOpKind::Append, &EmittedExpr::new("xs"), &[EmittedExpr::new("4")]);
        assert_eq!(result.0, "(xs @ [4])");
    }

    #[test]
    fn dict_get_follows_the_hashtable_strategy() {
        let stdlib = MlContainerSystem { hashtables: HashtableStrategy::Stdlib };
        assert_eq!(stdlib.build_expr(ContainerOpKind::Get, &EmittedExpr::new("d"), &[EmittedExpr::new("k")]).0, "Hashtbl.find d k");

        let map = MlContainerSystem { hashtables: HashtableStrategy::Map };
        assert_eq!(map.build_expr(ContainerOpKind::Get, &EmittedExpr::new("d"), &[EmittedExpr::new("k")]).0, "StatikMap.find k d");
    }
}
