//! Static IR: the typed, immutable tree every backend emitter lowers from.
//!
//! Grounded on `ori_ir`'s arena-indexed AST design
//! (`compiler/ori_ir/src/lib.rs`) one layer further down the pipeline:
//! [`SirArena`] is the same struct-of-arrays shape, but every node already
//! carries its resolved [`statik_types::TypeId`] and every `Call`/`MethodCall`
//! target is already resolved to a closed vocabulary (a user function, a
//! [`RuntimeOp`], or a [`ContainerOpKind`]) rather than a bare source name.

mod arena;
mod builder;
mod container_op;
mod error;
mod module;
mod node;
mod runtime_op;

pub use arena::{SirArena, SirId, SirRange};
pub use builder::{build_module, SirBuildOutcome};
pub use container_op::ContainerOpKind;
pub use error::SirError;
pub use module::{ClassRecord, SirFunction, SirModule};
pub use node::{CallTarget, Comprehension, Const, SirGenerator, SirNodeKind};
pub use runtime_op::RuntimeOp;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use statik_ir::StringInterner;
    use statik_types::{TypeInterner, TypeTerm};

    fn build(source: &str, allow_heterogeneous_containers: bool) -> (SirBuildOutcome, TypeInterner, StringInterner) {
        let mut interner = StringInterner::new();
        let outcome = statik_parse::parse(source, &mut interner);
        assert!(outcome.errors.is_empty(), "unexpected parse errors: {:?}", outcome.errors);
        let mut types = TypeInterner::new();
        let inference = statik_infer::infer_module(&outcome.arena, &outcome.module, &interner, &mut types);
        assert!(inference.errors.is_empty(), "unexpected infer errors: {:?}", inference.errors);
        let build = build_module(&outcome.arena, &outcome.module, &interner, &mut types, &inference, allow_heterogeneous_containers);
        (build, types, interner)
    }

    #[test]
    fn lowers_a_simple_adder() {
        let (build, types, interner) = build("def add(x: int, y: int) -> int:\n    return x + y\n", false);
        assert!(build.errors.is_empty(), "unexpected SIR errors: {:?}", build.errors);
        let name = *build.module.functions.keys().find(|n| interner.lookup(**n) == "add").expect("add function lowered");
        let f = build.module.function(name).expect("add function lowered");
        assert_eq!(types.lookup(f.return_type), &TypeTerm::Int);
        assert_eq!(f.params.len(), 2);
        for (_, type_id) in &f.params {
            assert_eq!(types.lookup(*type_id), &TypeTerm::Int);
        }
    }

    #[test]
    fn resolves_len_call_to_the_runtime_builtin_for_lists() {
        let (build, _types, interner) = build(
            "def _count(xs: list[int]) -> int:\n    return len(xs)\n",
            false,
        );
        assert!(build.errors.is_empty(), "unexpected SIR errors: {:?}", build.errors);
        let name = *build.module.functions.keys().find(|n| interner.lookup(**n) == "_count").expect("function lowered");
        let f = build.module.function(name).expect("function lowered");
        let stmts = build.module.arena.children(f.body);
        let SirNodeKind::Return(Some(call_id)) = build.module.arena.kind(stmts[0]) else { panic!("expected a return") };
        let SirNodeKind::Call { target, .. } = build.module.arena.kind(*call_id) else { panic!("expected a call") };
        assert_eq!(*target, CallTarget::Builtin(RuntimeOp::LenList));
    }

    #[test]
    fn heterogeneous_list_literal_is_rejected_without_target_support() {
        let (build, _types, _interner) = build("def _mixed() -> None:\n    x = [1, \"a\"]\n", false);
        assert!(build.errors.iter().any(|e| matches!(e, SirError::HeterogeneousContainer { .. })));
    }

    #[test]
    fn heterogeneous_list_literal_is_accepted_when_the_target_allows_it() {
        let (build, _types, _interner) = build("def _mixed() -> None:\n    x = [1, \"a\"]\n", true);
        assert!(build.errors.is_empty(), "unexpected SIR errors: {:?}", build.errors);
    }
}
