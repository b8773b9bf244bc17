//! Abstract container operations (spec.md §3 `ContainerOp`), resolved once
//! by the SIR builder from a `MethodCall`'s method name and receiver
//! container kind. Consumed downstream by each target's `ContainerSystem`
//! (spec.md §4.5), keyed on `(op, container kind, element type)` — the SIR
//! only carries the operation tag and lets the per-target table decide the
//! concrete primitive.

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ContainerOpKind {
    Len,
    Append,
    Get,
    Set,
    Contains,
    Iter,
    Map,
    Filter,
}

impl ContainerOpKind {
    /// Resolves a built-in container method name to its abstract
    /// operation. `len` is deliberately excluded here — it is a free
    /// function (`len(x)`), not a method, and already routed through
    /// [`crate::runtime_op::resolve_builtin_call`] to a `RuntimeOp`
    /// instead, since `op.len_list`/`op.len_dict`/`op.len_set` are in the
    /// closed runtime ABI vocabulary rather than the container-table one.
    pub fn from_method_name(name: &str) -> Option<Self> {
        Some(match name {
            "append" => Self::Append,
            "get" => Self::Get,
            "contains" => Self::Contains,
            "__setitem__" => Self::Set,
            _ => return None,
        })
    }
}
