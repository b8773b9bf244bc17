//! Renders a built SIR module as this target's typed SSA IR text,
//! grounded on the same `Emitter::emit(module, interner, types,
//! preferences)` contract every other target crate implements — the
//! `preferences` argument is unused here since this target has no naming
//! convention or hashtable-strategy choice left to make once
//! [`crate::lower::lower_module`] has produced [`crate::ir::Module`].

use statik_backend::{EmitError, Emitter, Preferences};
use statik_ir::StringInterner;
use statik_sir::SirModule;
use statik_types::TypeInterner;

use crate::lower::lower_module;

pub struct LowIrEmitter;

impl Emitter for LowIrEmitter {
    fn emit(&self, module: &SirModule, interner: &StringInterner, types: &TypeInterner, _preferences: &Preferences) -> Result<String, EmitError> {
        let ir = lower_module(module, interner, types)?;
        Ok(ir.to_string())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use statik_ir::ast::operators::BinaryOp;
    use statik_ir::Span;
    use statik_sir::{SirArena, SirFunction, SirNodeKind};
    use statik_types::TypeInterner;

    #[test]
    fn a_function_returning_a_sum_lowers_to_an_add_and_a_ret() {
        let mut interner = StringInterner::new();
        let mut types = TypeInterner::new();
        let mut arena = SirArena::new();

        let int_ty = types.int();
        let a = interner.intern("a");
        let b = interner.intern("b");
        let fn_name = interner.intern("add");

        let a_var = arena.alloc(SirNodeKind::Var(a), int_ty, Span::DUMMY);
        let b_var = arena.alloc(SirNodeKind::Var(b), int_ty, Span::DUMMY);
        let sum = arena.alloc(SirNodeKind::BinOp { op: BinaryOp::Add, lhs: a_var, rhs: b_var }, int_ty, Span::DUMMY);
        let ret = arena.alloc(SirNodeKind::Return(Some(sum)), int_ty, Span::DUMMY);
        let body = arena.alloc_children([ret]);
        let fn_def = arena.alloc(SirNodeKind::FunctionDef(fn_name), int_ty, Span::DUMMY);
        let module_items = arena.alloc_children([fn_def]);
        let root = arena.alloc(SirNodeKind::Module(module_items), int_ty, Span::DUMMY);

        let function = SirFunction { name: fn_name, params: vec![(a, int_ty), (b, int_ty)], return_type: int_ty, body, span: Span::DUMMY };

        let mut functions = rustc_hash::FxHashMap::default();
        functions.insert(fn_name, function);
        let module = SirModule { arena, functions, classes: rustc_hash::FxHashMap::default(), root };

        let preferences = Preferences::default();
        let emitter = LowIrEmitter;
        let out = emitter.emit(&module, &interner, &types, &preferences).expect("scalar add lowers cleanly");
        assert!(out.contains("add i64"));
        assert!(out.contains("ret i64"));
    }
}
