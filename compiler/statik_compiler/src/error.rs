//! The eight fatal error kinds spec.md §7 names, each carrying enough
//! context to render a [`statik_diagnostic::Diagnostic`]. Grounded on
//! `ori_parse`/`ori_types`'s per-crate error enums folded into one
//! umbrella type the way `oric::problem::Problem` folds phase errors into
//! a single CLI-facing type (`compiler/oric/src/problem.rs`).

use statik_ir::Span;
use thiserror::Error;

use statik_diagnostic::DiagnosticKind;

#[derive(Error, Debug, Clone)]
pub enum CompileError {
    #[error("{message}")]
    SyntaxError { message: String, span: Span },

    #[error("{message}")]
    UnsupportedFeature { message: String, span: Span },

    #[error("{message}")]
    MissingAnnotation { message: String, span: Span },

    #[error("{message}")]
    AmbiguousInference { message: String, span: Span },

    #[error("{message}")]
    HeterogeneousContainer { message: String, span: Span },

    #[error("{message}")]
    UnsupportedByBackend { message: String, span: Span },

    #[error("{message}")]
    IRParseError { message: String },

    #[error("{message}")]
    InvalidOptimizationLevel { message: String },
}

impl CompileError {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            CompileError::SyntaxError { .. } => DiagnosticKind::SyntaxError,
            CompileError::UnsupportedFeature { .. } => DiagnosticKind::UnsupportedFeature,
            CompileError::MissingAnnotation { .. } => DiagnosticKind::MissingAnnotation,
            CompileError::AmbiguousInference { .. } => DiagnosticKind::AmbiguousInference,
            CompileError::HeterogeneousContainer { .. } => DiagnosticKind::HeterogeneousContainer,
            CompileError::UnsupportedByBackend { .. } => DiagnosticKind::UnsupportedByBackend,
            CompileError::IRParseError { .. } => DiagnosticKind::IrParseError,
            CompileError::InvalidOptimizationLevel { .. } => DiagnosticKind::InvalidOptimizationLevel,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            CompileError::SyntaxError { span, .. }
            | CompileError::UnsupportedFeature { span, .. }
            | CompileError::MissingAnnotation { span, .. }
            | CompileError::AmbiguousInference { span, .. }
            | CompileError::HeterogeneousContainer { span, .. }
            | CompileError::UnsupportedByBackend { span, .. } => *span,
            CompileError::IRParseError { .. } | CompileError::InvalidOptimizationLevel { .. } => Span::DUMMY,
        }
    }

    pub fn to_diagnostic(&self) -> statik_diagnostic::Diagnostic {
        statik_diagnostic::Diagnostic::new(self.kind(), self.span(), self.to_string())
    }

    pub(crate) fn unknown_target(name: &str) -> Self {
        CompileError::UnsupportedFeature {
            message: format!("unknown compilation target `{name}`"),
            span: Span::DUMMY,
        }
    }
}

impl From<statik_parse::error::ParseError> for CompileError {
    fn from(e: statik_parse::error::ParseError) -> Self {
        let span = e.span();
        let message = e.to_string();
        match &e {
            statik_parse::error::ParseError::UnsupportedFeature { .. } => CompileError::UnsupportedFeature { message, span },
            _ => CompileError::SyntaxError { message, span },
        }
    }
}

impl From<statik_infer::InferError> for CompileError {
    fn from(e: statik_infer::InferError) -> Self {
        let span = e.span();
        let message = e.to_string();
        match &e {
            statik_infer::InferError::AmbiguousInference { .. } => CompileError::AmbiguousInference { message, span },
            statik_infer::InferError::MissingAnnotation { .. } => CompileError::MissingAnnotation { message, span },
            _ => CompileError::SyntaxError { message, span },
        }
    }
}

impl From<statik_sir::SirError> for CompileError {
    fn from(e: statik_sir::SirError) -> Self {
        let span = e.span();
        let message = e.to_string();
        match &e {
            statik_sir::SirError::HeterogeneousContainer { .. } => CompileError::HeterogeneousContainer { message, span },
            _ => CompileError::UnsupportedFeature { message, span },
        }
    }
}

impl From<statik_backend::EmitError> for CompileError {
    fn from(e: statik_backend::EmitError) -> Self {
        let span = e.span();
        CompileError::UnsupportedByBackend { message: e.to_string(), span }
    }
}

impl From<statik_lowir::error::IrParseError> for CompileError {
    fn from(e: statik_lowir::error::IrParseError) -> Self {
        CompileError::IRParseError { message: e.to_string() }
    }
}

impl From<statik_lowir::error::InvalidOptimizationLevel> for CompileError {
    fn from(e: statik_lowir::error::InvalidOptimizationLevel) -> Self {
        CompileError::InvalidOptimizationLevel { message: e.to_string() }
    }
}

impl From<statik_backend::UnknownPreferenceKey> for CompileError {
    fn from(e: statik_backend::UnknownPreferenceKey) -> Self {
        CompileError::UnsupportedFeature { message: e.to_string(), span: Span::DUMMY }
    }
}
