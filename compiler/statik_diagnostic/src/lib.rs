//! Diagnostic records and pretty rendering.
//!
//! Grounded on `ori_diagnostic::diagnostic`'s `Severity`/`Diagnostic` split,
//! trimmed to the flat `{kind, location, message}` record spec.md §6
//! prescribes (no suggestion/fix machinery — this translator is a one-shot
//! pass, not an interactive compiler with an `ori fix`-style apply step).

mod kind;
mod render;

pub use kind::DiagnosticKind;
pub use render::render_to_string;

use statik_ir::{LineCol, LineIndex, Span};

/// A single structured diagnostic: what went wrong, where, and a message for
/// a human reader.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, span: Span, message: impl Into<String>) -> Self {
        Diagnostic {
            kind,
            span,
            message: message.into(),
        }
    }

    /// Resolve this diagnostic's span to a 1-based (line, column) for
    /// display, per spec.md §6's `location(line, col)`.
    pub fn location(&self, lines: &LineIndex) -> LineCol {
        lines.line_col(self.span.start)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn location_resolves_through_line_index() {
        let source = "x = 1\ny = bogus\n";
        let lines = LineIndex::new(source);
        let diag = Diagnostic::new(
            DiagnosticKind::MissingAnnotation,
            Span::new(6, 7),
            "parameter is missing a type annotation",
        );
        let loc = diag.location(&lines);
        assert_eq!(loc, LineCol { line: 2, col: 1 });
    }
}
