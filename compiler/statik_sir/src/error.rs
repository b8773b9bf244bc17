use statik_ir::{Name, Span};
use thiserror::Error;

/// SIR-construction-time errors, grounded on `ori_parse::error::ParseError`'s
/// shape (one variant per malformed-input case, span-carrying) one layer
/// further down the pipeline. `statik_compiler` folds these into its own
/// `CompileError` (spec.md §7).
#[derive(Error, Debug, Clone)]
pub enum SirError {
    /// A container literal or comprehension joined elements of incompatible
    /// types and the chosen target does not declare
    /// `ContainerSystem::supports_heterogeneous()` (spec.md §4.3).
    #[error("container elements have incompatible types and the target backend does not support heterogeneous containers")]
    HeterogeneousContainer { span: Span },

    /// A call or method call whose callee resolves to neither a user
    /// function, a runtime-ABI builtin, nor a container operation.
    #[error("call to undefined function or unsupported builtin `{name}`")]
    UnknownCallee { name: Name, span: Span },

    /// A name referenced in an expression position has no binding reachable
    /// at this point (should already be excluded by inference, kept here as
    /// a defensive boundary check rather than a silent `Unknown`).
    #[error("reference to an unbound name")]
    UnboundName { name: Name, span: Span },
}

impl SirError {
    pub fn span(&self) -> Span {
        match self {
            SirError::HeterogeneousContainer { span }
            | SirError::UnknownCallee { span, .. }
            | SirError::UnboundName { span, .. } => *span,
        }
    }
}
