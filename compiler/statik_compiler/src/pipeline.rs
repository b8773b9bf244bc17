//! The pure `(source text, target, preferences) -> (artifact, diagnostics)`
//! function spec.md §5 describes: lex -> parse -> infer -> build SIR ->
//! select backend -> emit -> generate build recipe. No IO, no retries, no
//! partial success (spec.md §7) — grounded on `ori_compiler::pipeline`'s
//! `compile_and_run` shape (`compiler/ori_compiler/src/pipeline.rs`), one
//! layer further toward a multi-target AOT translator instead of a
//! tree-walking interpreter.

use statik_backend::{BackendRegistry, Preferences};
use statik_ir::StringInterner;
use statik_types::TypeInterner;

use crate::error::CompileError;
use crate::output::{Artifact, CompileOutput};
use crate::targets::default_registry;

pub struct CompileConfig {
    /// The registry key of the selected target (`"c"`, `"go"`, `"ml"`, `"ir"`).
    pub target: String,
    /// The program name the build recipe links (spec.md §4.9).
    pub program_name: String,
    pub preferences: Preferences,
    /// Whether the SIR builder should accept `List[Union[...]]` for a
    /// heterogeneous literal rather than reject it outright — looked up
    /// from the selected backend's `ContainerSystem::supports_heterogeneous`
    /// once the target is resolved, so callers normally leave this `None`.
    allow_heterogeneous_override: Option<bool>,
}

impl CompileConfig {
    pub fn new(target: impl Into<String>) -> Self {
        CompileConfig {
            target: target.into(),
            program_name: "program".to_string(),
            preferences: Preferences::default(),
            allow_heterogeneous_override: None,
        }
    }
}

/// Compiles `source` against the backend named by `config.target`, using a
/// fresh [`default_registry`]. Equivalent to [`compile_with_registry`] for
/// every caller except a test harness that wants to register a stub
/// backend.
pub fn compile(source: &str, config: &CompileConfig) -> CompileOutput {
    compile_with_registry(source, config, &default_registry())
}

pub fn compile_with_registry(source: &str, config: &CompileConfig, registry: &BackendRegistry) -> CompileOutput {
    let Some(backend) = registry.get(&config.target) else {
        return CompileOutput::from_error(&CompileError::unknown_target(&config.target));
    };

    tracing::debug!(target = config.target, "starting compilation");

    let mut interner = StringInterner::new();

    tracing::debug!("lexing and parsing");
    let parse_outcome = statik_parse::parse(source, &mut interner);
    if !parse_outcome.errors.is_empty() {
        return CompileOutput {
            artifact: None,
            diagnostics: parse_outcome
                .errors
                .into_iter()
                .map(|e| CompileError::from(e).to_diagnostic())
                .collect(),
        };
    }

    tracing::debug!("running two-stage type inference");
    let mut types = TypeInterner::new();
    let inference = statik_infer::infer_module(&parse_outcome.arena, &parse_outcome.module, &interner, &mut types);
    if !inference.errors.is_empty() {
        return CompileOutput {
            artifact: None,
            diagnostics: inference
                .errors
                .into_iter()
                .map(|e| CompileError::from(e).to_diagnostic())
                .collect(),
        };
    }

    tracing::debug!("building static IR");
    let allow_heterogeneous = config
        .allow_heterogeneous_override
        .unwrap_or_else(|| backend.container_system().supports_heterogeneous());
    let sir_outcome = statik_sir::build_module(&parse_outcome.arena, &parse_outcome.module, &interner, &mut types, &inference, allow_heterogeneous);
    if !sir_outcome.errors.is_empty() {
        return CompileOutput {
            artifact: None,
            diagnostics: sir_outcome
                .errors
                .into_iter()
                .map(|e| CompileError::from(e).to_diagnostic())
                .collect(),
        };
    }

    tracing::debug!(target = config.target, "lowering SIR to target text");
    let source_text = match backend.emitter().emit(&sir_outcome.module, &interner, &types, &config.preferences) {
        Ok(text) => text,
        Err(e) => return CompileOutput::from_error(&CompileError::from(e)),
    };

    let artifact_name = format!("{}.{}", config.program_name, backend.file_extension());
    let build_recipe = backend.builder().generate_build_file(&[artifact_name.as_str()], &config.program_name);

    CompileOutput {
        artifact: Some(Artifact {
            source: source_text,
            file_extension: backend.file_extension(),
            build_recipe,
        }),
        diagnostics: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn adder_compiles_cleanly_on_the_ir_target() {
        let source = "def add(x: int, y: int) -> int:\n    return x + y\n";
        let output = compile(source, &CompileConfig::new("ir"));
        assert!(output.success(), "unexpected diagnostics: {:?}", output.diagnostics);
        let artifact = output.artifact.expect("artifact produced");
        assert!(artifact.source.contains("add i64"));
        assert!(artifact.build_recipe.contains(".PHONY"));
    }

    #[test]
    fn unknown_target_is_reported_without_an_artifact() {
        let output = compile("def add(x: int, y: int) -> int:\n    return x + y\n", &CompileConfig::new("bogus"));
        assert!(!output.success());
        assert!(output.artifact.is_none());
        assert_eq!(output.diagnostics.len(), 1);
    }

    #[test]
    fn an_unannotated_public_parameter_recovered_from_usage_still_compiles() {
        let output = compile("def add(x, y: int) -> int:\n    return x + y\n", &CompileConfig::new("ir"));
        assert!(output.success(), "unexpected diagnostics: {:?}", output.diagnostics);
    }

    #[test]
    fn missing_annotation_unrecoverable_from_usage_is_an_inference_stage_diagnostic() {
        // `y` is never used in any type-revealing expression, so Stage B
        // has nothing to narrow it from.
        let output = compile("def add(x: int, y) -> int:\n    return x\n", &CompileConfig::new("ir"));
        assert!(!output.success());
        assert_eq!(output.diagnostics[0].kind, statik_diagnostic::DiagnosticKind::MissingAnnotation);
    }

    #[test]
    fn ambiguous_branch_return_is_reported_before_sir_construction() {
        let source = "def _maybe(flag: bool, a: int, b: str):\n    if flag:\n        return a\n    return b\n";
        let output = compile(source, &CompileConfig::new("ir"));
        assert!(!output.success());
        assert_eq!(output.diagnostics[0].kind, statik_diagnostic::DiagnosticKind::AmbiguousInference);
    }

    #[test]
    fn containers_are_rejected_by_the_low_level_ir_backend() {
        let source = "def total(xs: list[int]) -> int:\n    return len(xs)\n";
        let output = compile(source, &CompileConfig::new("ir"));
        assert!(!output.success());
        assert_eq!(output.diagnostics[0].kind, statik_diagnostic::DiagnosticKind::UnsupportedByBackend);
    }

    #[test]
    fn same_sir_and_preferences_yield_byte_identical_output() {
        let source = "def add(x: int, y: int) -> int:\n    return x + y\n";
        let a = compile(source, &CompileConfig::new("ir"));
        let b = compile(source, &CompileConfig::new("ir"));
        assert_eq!(a.artifact.expect("first compile succeeds").source, b.artifact.expect("second compile succeeds").source);
    }

    #[test]
    fn recursive_fibonacci_lowers_to_a_self_referencing_call() {
        let source = "def fib(n: int) -> int:\n    if n < 2:\n        return n\n    return fib(n - 1) + fib(n - 2)\n";
        let output = compile(source, &CompileConfig::new("ir"));
        assert!(output.success(), "unexpected diagnostics: {:?}", output.diagnostics);
        let artifact = output.artifact.expect("artifact produced");
        assert!(artifact.source.contains("define i64 @fib"));
        assert!(artifact.source.matches("call i64 @fib").count() >= 2);
    }
}
