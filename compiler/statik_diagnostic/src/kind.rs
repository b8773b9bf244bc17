use std::fmt;

/// The `kind` tag of a diagnostic record (spec.md §6/§7). Mirrors the eight
/// `CompileError` variants `statik_compiler` raises; kept as a separate,
/// field-less enum here so a diagnostic can be rendered without depending on
/// the compiler crate's error type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DiagnosticKind {
    SyntaxError,
    UnsupportedFeature,
    MissingAnnotation,
    AmbiguousInference,
    HeterogeneousContainer,
    UnsupportedByBackend,
    IrParseError,
    InvalidOptimizationLevel,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiagnosticKind::SyntaxError => "syntax-error",
            DiagnosticKind::UnsupportedFeature => "unsupported-feature",
            DiagnosticKind::MissingAnnotation => "missing-annotation",
            DiagnosticKind::AmbiguousInference => "ambiguous-inference",
            DiagnosticKind::HeterogeneousContainer => "heterogeneous-container",
            DiagnosticKind::UnsupportedByBackend => "unsupported-by-backend",
            DiagnosticKind::IrParseError => "ir-parse-error",
            DiagnosticKind::InvalidOptimizationLevel => "invalid-optimization-level",
        };
        write!(f, "{s}")
    }
}
