//! Container lowering for the scalar low-level-IR target. This target has
//! no typed-aggregate ABI (DESIGN.md) — every container kind and operation
//! is rejected at the point [`crate::lower`] would otherwise call into this
//! table, so these two methods only exist to satisfy [`ContainerSystem`]'s
//! object-safety and are never reached in practice.

use statik_backend::{ContainerSystem, EmittedExpr};
use statik_ir::ast::ContainerKind;
use statik_sir::ContainerOpKind;

pub struct LowIrContainerSystem;

impl ContainerSystem for LowIrContainerSystem {
    fn supports_heterogeneous(&self) -> bool {
        false
    }

    fn type_spelling(&self, kind: ContainerKind, _elem_types: &[String]) -> String {
        unreachable!("container {kind:?} has no type spelling on a scalar-only target; lower.rs rejects it first")
    }

    fn build_expr(&self, op: ContainerOpKind, _receiver: &EmittedExpr, _args: &[EmittedExpr]) -> EmittedExpr {
        unreachable!("container op {op:?} has no expression lowering on a scalar-only target; lower.rs rejects it first")
    }
}
