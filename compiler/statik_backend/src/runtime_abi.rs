//! Per-target rendering of the closed [`statik_sir::RuntimeOp`] vocabulary
//! (spec.md §4.6). Grounded on `ori_codegen::c::CRuntime`'s "one emitted
//! helper per runtime operation" shape, generalized from one fixed C helper
//! table to a trait every target implements — the emitter itself never
//! spells out a source-language identifier for a runtime operation, it only
//! ever asks the `RuntimeAbi` how.

use statik_sir::RuntimeOp;

pub trait RuntimeAbi {
    /// `true` if this target lowers `op` to an inline expression (e.g. a
    /// native operator or a single intrinsic call) rather than a call to a
    /// named helper function.
    fn is_inlined(&self, op: RuntimeOp) -> bool;

    /// The target-spelled helper symbol for `op`. Only meaningful when
    /// `is_inlined` is `false` for this op; callers should not call this for
    /// an inlined operation.
    fn helper_symbol(&self, op: RuntimeOp) -> &str;
}
