//! Result types for one compilation (spec.md §6): either a produced
//! artifact pair or a non-empty diagnostic list, never both (spec.md §7:
//! "a compilation either succeeds fully or returns a non-empty diagnostic
//! list with no artifact").

use statik_diagnostic::Diagnostic;

/// The two files a successful compilation returns (spec.md §6): the
/// target-language/IR source, and its build recipe.
#[derive(Clone, Debug)]
pub struct Artifact {
    pub source: String,
    pub file_extension: &'static str,
    pub build_recipe: String,
}

#[derive(Clone, Debug)]
pub struct CompileOutput {
    pub artifact: Option<Artifact>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileOutput {
    pub fn success(&self) -> bool {
        self.artifact.is_some() && self.diagnostics.is_empty()
    }

    fn failed(diagnostics: Vec<Diagnostic>) -> Self {
        CompileOutput { artifact: None, diagnostics }
    }

    pub(crate) fn from_error(error: &crate::error::CompileError) -> Self {
        Self::failed(vec![error.to_diagnostic()])
    }
}
