//! Build-artifact generation (spec.md §4.9): text only, never a shell-out
//! (spec.md §5). Grounded on
//! `original_source/tests/test_backend_llvm_basic.py::TestLLVMBuilder`'s
//! asserted makefile shape for the low-level IR target; other targets
//! implement the same trait with their own canonical single-command recipe.

pub trait Builder {
    /// A build recipe (e.g. a makefile) that turns `artifacts` into an
    /// executable named `program_name`, referencing only the produced
    /// artifacts and the canonical toolchain for this target.
    fn generate_build_file(&self, artifacts: &[&str], program_name: &str) -> String;

    /// The flags the canonical toolchain invocation passes, for callers that
    /// want to report or validate them without parsing the recipe text back
    /// out.
    fn get_compile_flags(&self) -> Vec<String>;
}
