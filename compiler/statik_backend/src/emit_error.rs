use statik_ir::Span;
use thiserror::Error;

use crate::feature::Feature;

/// Failures an [`crate::Backend::emit`] can raise, folded by `statik_compiler`
/// into its own `CompileError` (spec.md §7).
#[derive(Error, Debug, Clone)]
pub enum EmitError {
    /// SIR uses a language construct this backend declares unsupported via
    /// `supports_feature` (spec.md §7 `UnsupportedFeature`).
    #[error("target does not support the `{feature:?}` feature")]
    UnsupportedFeature { feature: Feature, span: Span },

    /// A specific node could be emitted by no target-specific lowering rule
    /// this backend defines (spec.md §7 `UnsupportedByBackend`) — distinct
    /// from `UnsupportedFeature`, which rejects a whole capability class up
    /// front; this is raised for a narrower gap within an otherwise
    /// supported feature.
    #[error("{detail}")]
    UnsupportedByBackend { detail: String, span: Span },
}

impl EmitError {
    pub fn span(&self) -> Span {
        match self {
            EmitError::UnsupportedFeature { span, .. } | EmitError::UnsupportedByBackend { span, .. } => *span,
        }
    }
}
