use statik_ir::Span;
use thiserror::Error;

/// The specific construct rejected by [`UnsupportedFeatureKind`] (spec.md
/// §4.1's closed list of constructs the core does not model).
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum UnsupportedFeatureKind {
    DynamicAttributeMutation,
    VarArgs,
    MultipleInheritance,
    GeneratorFunction,
    AsyncSuspension,
    EvalExec,
    Decorator,
    CapturingNestedFunction,
}

impl UnsupportedFeatureKind {
    pub const fn description(self) -> &'static str {
        match self {
            Self::DynamicAttributeMutation => "dynamic attribute mutation",
            Self::VarArgs => "*args/**kwargs parameters",
            Self::MultipleInheritance => "multiple inheritance or mixins",
            Self::GeneratorFunction => "generator functions (yield)",
            Self::AsyncSuspension => "async/await",
            Self::EvalExec => "eval/exec",
            Self::Decorator => "a decorator outside the allow-list",
            Self::CapturingNestedFunction => "a nested function capturing a mutable enclosing local",
        }
    }
}

/// Parse-time errors, grounded on `ori_parse::error::ParseErrorKind`'s shape
/// (one variant per malformed-input case, each carrying span context) but
/// trimmed to the two parse-time diagnostic kinds spec.md §7 names:
/// `SyntaxError` and `UnsupportedFeature`.
#[derive(Error, Debug, Clone)]
pub enum ParseError {
    #[error("unexpected token, expected {expected}")]
    UnexpectedToken { expected: &'static str, span: Span },

    #[error("unexpected end of file, expected {expected}")]
    UnexpectedEof { expected: &'static str, span: Span },

    #[error("{}", kind.description())]
    UnsupportedFeature { kind: UnsupportedFeatureKind, span: Span },

    #[error("invalid augmented-assignment target: left-hand side is not a pure lvalue")]
    ImpureAugmentedAssignTarget { span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::UnexpectedEof { span, .. }
            | ParseError::UnsupportedFeature { span, .. }
            | ParseError::ImpureAugmentedAssignTarget { span } => *span,
        }
    }
}
