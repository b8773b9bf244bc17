use ariadne::{Label, Report, ReportKind, Source};

use crate::Diagnostic;

/// Render a diagnostic against its source text into a plain `String`,
/// the way `oric`'s driver would print straight to a terminal — kept as a
/// string here instead of writing to a `Write` directly so callers (tests,
/// `staticc`) can assert on the exact output.
#[expect(clippy::expect_used, reason = "writing/encoding to an in-memory buffer cannot fail")]
pub fn render_to_string(source: &str, file_name: &str, diagnostic: &Diagnostic) -> String {
    let start = diagnostic.span.start as usize;
    let end = diagnostic.span.end.max(diagnostic.span.start + 1) as usize;
    let mut buf = Vec::new();
    Report::build(ReportKind::Error, file_name, start)
        .with_message(format!("{}: {}", diagnostic.kind, diagnostic.message))
        .with_label(
            Label::new((file_name, start..end)).with_message(diagnostic.message.clone()),
        )
        .finish()
        .write((file_name, Source::from(source)), &mut buf)
        .expect("writing to an in-memory buffer never fails");
    String::from_utf8(buf).expect("ariadne only emits UTF-8 output")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::DiagnosticKind;
    use statik_ir::Span;

    #[test]
    fn renders_message_and_kind() {
        let source = "x = 1\n";
        let diag = Diagnostic::new(DiagnosticKind::SyntaxError, Span::new(0, 1), "unexpected token");
        let rendered = render_to_string(source, "test.src", &diag);
        assert!(rendered.contains("unexpected token"));
        assert!(rendered.contains("syntax-error"));
    }
}
